use crate::types::{ContentRecord, Result};
use async_trait::async_trait;

/// Trait for loading content records from a source (frontmatter files,
/// remote content APIs, ...).
///
/// Whether a failure is fatal belongs to the implementation: the local
/// reader propagates authoring mistakes, the remote adapter degrades to an
/// empty list instead of erroring.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short name used in logs.
    fn source_name(&self) -> &'static str;

    /// Load every record this source currently provides.
    async fn load(&self) -> Result<Vec<ContentRecord>>;
}
