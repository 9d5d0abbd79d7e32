use crate::types::ContentRecord;
use std::collections::HashMap;

/// Looks up one record by slug.
pub fn find_by_slug<'a>(records: &'a [ContentRecord], slug: &str) -> Option<&'a ContentRecord> {
    records.iter().find(|r| r.slug == slug)
}

/// Resolves an ordered slug list (a series or collection page) into
/// records, preserving the requested order and skipping unknown slugs.
pub fn records_for_slugs(records: &[ContentRecord], slugs: &[String]) -> Vec<ContentRecord> {
    let by_slug: HashMap<&str, &ContentRecord> =
        records.iter().map(|r| (r.slug.as_str(), r)).collect();

    slugs
        .iter()
        .filter_map(|slug| by_slug.get(slug.as_str()).map(|r| (*r).clone()))
        .collect()
}

/// Oldest-first ordering, used where a series reads front to back.
pub fn sort_by_date_ascending(records: &[ContentRecord]) -> Vec<ContentRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.sort_timestamp().cmp(&b.sort_timestamp()));
    sorted
}
