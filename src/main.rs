use clap::Parser;
use content_aggregator::{
    query, rank, ContentSource, ContentStore, FrontmatterSource, RemoteConfig, RemoteSource,
    DEFAULT_RELATED_LIMIT,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "content-aggregator",
    about = "Aggregate local and remote content into one collection"
)]
struct Args {
    /// Root directory holding frontmatter content
    #[arg(long, default_value = "content")]
    content_dir: PathBuf,

    /// Content-type subdirectory to ingest
    #[arg(long, default_value = "posts")]
    kind: String,

    /// Print related records for this slug
    #[arg(long)]
    related: Option<String>,

    /// How many related records to print
    #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
    limit: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let store = ContentStore::new(vec![
        Arc::new(FrontmatterSource::new(args.content_dir.clone(), args.kind.clone()))
            as Arc<dyn ContentSource>,
        Arc::new(RemoteSource::new(RemoteConfig::from_env())),
    ]);

    let records = store.get_all_records().await?;
    info!("aggregated {} records", records.len());
    for record in records.iter() {
        info!(
            "  {} [{}] {} ({} min read)",
            record.date, record.source, record.slug, record.reading_time
        );
    }

    if let Some(slug) = args.related {
        match query::find_by_slug(&records, &slug) {
            Some(current) => {
                for related in rank(current, &records, args.limit) {
                    info!("related to {}: {}", slug, related.slug);
                }
            }
            None => warn!("no record with slug {}", slug),
        }
    }

    Ok(())
}
