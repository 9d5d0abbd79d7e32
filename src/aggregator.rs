use crate::traits::ContentSource;
use crate::types::{ContentRecord, PipelineError, Result, SourceKind};
use futures::future;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Merged, sorted, deduplicated view over every content source.
///
/// The merged collection is computed once per process and memoized. The
/// mutex is held across the first ingestion, so concurrent early callers
/// share that one computation instead of racing duplicate fetch sequences.
pub struct ContentStore {
    sources: Vec<Arc<dyn ContentSource>>,
    cache: Mutex<Option<Arc<Vec<ContentRecord>>>>,
}

impl ContentStore {
    /// Sources are consulted in order; the duplicate check sees earlier
    /// sources' slugs first.
    pub fn new(sources: Vec<Arc<dyn ContentSource>>) -> Self {
        Self {
            sources,
            cache: Mutex::new(None),
        }
    }

    pub async fn get_all_records(&self) -> Result<Arc<Vec<ContentRecord>>> {
        let mut cache = self.cache.lock().await;
        if let Some(records) = cache.as_ref() {
            debug!("returning {} cached records", records.len());
            return Ok(records.clone());
        }

        let records = Arc::new(self.ingest().await?);
        *cache = Some(records.clone());
        Ok(records)
    }

    /// Drops the memoized collection so the next call re-ingests. Test
    /// isolation hook; production builds never need it.
    pub async fn reset(&self) {
        *self.cache.lock().await = None;
    }

    async fn ingest(&self) -> Result<Vec<ContentRecord>> {
        let loads = self.sources.iter().map(|source| source.load());
        let results = future::try_join_all(loads).await?;

        // A slug collision across sources is an authoring mistake; failing
        // fast beats silently shipping one of the two.
        let mut seen: HashMap<String, SourceKind> = HashMap::new();
        let mut merged = Vec::new();
        for records in results {
            for record in records {
                if let Some(first) = seen.get(&record.slug) {
                    return Err(PipelineError::DuplicateSlug {
                        slug: record.slug,
                        first: *first,
                        second: record.source,
                    });
                }
                seen.insert(record.slug.clone(), record.source);
                merged.push(record);
            }
        }

        merged.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp()));

        info!(
            "aggregated {} records from {} sources",
            merged.len(),
            self.sources.len()
        );
        Ok(merged)
    }
}
