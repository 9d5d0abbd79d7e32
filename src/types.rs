use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a record was ingested from. Carried for diagnostics only; ranking
/// and estimation never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Local,
    Remote,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Local => write!(f, "local"),
            SourceKind::Remote => write!(f, "remote"),
        }
    }
}

/// The normalized unit flowing through the pipeline, regardless of origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub slug: String,
    pub title: String,
    /// ISO-8601 date or datetime string.
    pub date: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Full marked-up source text of the item.
    pub body_raw: String,
    /// Whole minutes, stamped at ingestion time.
    pub reading_time: u32,
    pub source: SourceKind,
}

impl ContentRecord {
    /// Instant used for recency sorting. Records with a missing or
    /// unparseable date sort as oldest.
    pub fn sort_timestamp(&self) -> DateTime<Utc> {
        parse_date(&self.date).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Parses an ISO-8601 datetime, accepting a bare `YYYY-MM-DD` date as
/// midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Settings for the remote content API source.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub collection_id: Option<String>,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: None,
            collection_id: None,
            user_agent: "content-aggregator/0.1".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

impl RemoteConfig {
    /// Reads the remote API settings from the environment. Unset variables
    /// leave the source unconfigured and the pipeline local-only.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CONTENT_API_URL").unwrap_or_default(),
            api_token: std::env::var("CONTENT_API_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),
            collection_id: std::env::var("CONTENT_API_COLLECTION")
                .ok()
                .filter(|v| !v.is_empty()),
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed front matter in {}: {message}", .path.display())]
    Frontmatter { path: PathBuf, message: String },

    #[error("missing required field `{field}` in {}", .path.display())]
    MissingField {
        field: &'static str,
        path: PathBuf,
    },

    #[error("duplicate slug `{slug}` found in {first} and {second} content")]
    DuplicateSlug {
        slug: String,
        first: SourceKind,
        second: SourceKind,
    },

    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("remote API returned HTTP {status}")]
    RemoteStatus { status: u16 },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
