use crate::reading_time;
use crate::traits::ContentSource;
use crate::types::{ContentRecord, PipelineError, Result, SourceKind};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Reads one content-type directory of frontmatter documents into records.
pub struct FrontmatterSource {
    content_dir: PathBuf,
    kind_dir: String,
}

#[derive(Debug, Deserialize)]
struct Frontmatter {
    title: Option<String>,
    slug: Option<String>,
    date: Option<serde_yaml::Value>,
    description: Option<String>,
    tags: Option<Vec<String>>,
}

impl FrontmatterSource {
    pub fn new(content_dir: impl Into<PathBuf>, kind_dir: impl Into<String>) -> Self {
        Self {
            content_dir: content_dir.into(),
            kind_dir: kind_dir.into(),
        }
    }

    fn parse_document(&self, path: &Path, raw: &str) -> Result<ContentRecord> {
        let (header, body) = split_document(raw).ok_or_else(|| PipelineError::Frontmatter {
            path: path.to_path_buf(),
            message: "missing front matter block".to_string(),
        })?;

        let meta: Frontmatter =
            serde_yaml::from_str(header).map_err(|e| PipelineError::Frontmatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        // A record without a slug would break the uniqueness check
        // downstream, so required fields abort the build here.
        let slug = match meta.slug.filter(|s| !s.is_empty()) {
            Some(slug) => slug,
            None => {
                return Err(PipelineError::MissingField {
                    field: "slug",
                    path: path.to_path_buf(),
                })
            }
        };
        let title = match meta.title.filter(|t| !t.is_empty()) {
            Some(title) => title,
            None => {
                return Err(PipelineError::MissingField {
                    field: "title",
                    path: path.to_path_buf(),
                })
            }
        };

        debug!("parsed {} from {}", slug, path.display());

        Ok(ContentRecord {
            reading_time: reading_time::estimate(Some(body)),
            slug,
            title,
            date: coerce_date(meta.date),
            description: meta.description.unwrap_or_default(),
            tags: meta.tags.unwrap_or_default(),
            body_raw: body.to_string(),
            source: SourceKind::Local,
        })
    }
}

#[async_trait]
impl ContentSource for FrontmatterSource {
    fn source_name(&self) -> &'static str {
        "frontmatter"
    }

    async fn load(&self) -> Result<Vec<ContentRecord>> {
        let dir = self.content_dir.join(&self.kind_dir);
        if !dir.is_dir() {
            info!("content directory {} does not exist, skipping", dir.display());
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            match path.extension().and_then(|e| e.to_str()) {
                Some("md") | Some("mdx") => {}
                _ => continue,
            }
            let raw = std::fs::read_to_string(path)?;
            records.push(self.parse_document(path, &raw)?);
        }

        info!("loaded {} records from {}", records.len(), dir.display());
        Ok(records)
    }
}

/// Splits a document into its YAML header and body. Returns `None` when the
/// file does not start with a `---` delimited block.
fn split_document(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---\n")?;
    match rest.find("\n---\n") {
        Some(end) => Some((&rest[..end], &rest[end + 5..])),
        None => rest.strip_suffix("\n---").map(|header| (header, "")),
    }
}

/// Frontmatter dates arrive as strings or as YAML scalars; either way the
/// record carries the ISO text form.
fn coerce_date(value: Option<serde_yaml::Value>) -> String {
    match value {
        Some(serde_yaml::Value::String(s)) => s,
        Some(other) => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        None => String::new(),
    }
}
