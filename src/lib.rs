pub mod aggregator;
pub mod query;
pub mod reading_time;
pub mod related;
pub mod sources;
pub mod traits;
pub mod types;

pub use aggregator::ContentStore;
pub use related::{rank, DEFAULT_RELATED_LIMIT};
pub use sources::frontmatter::FrontmatterSource;
pub use sources::remote::RemoteSource;
pub use traits::ContentSource;
pub use types::*;
