use crate::types::ContentRecord;
use std::collections::HashSet;

pub const DEFAULT_RELATED_LIMIT: usize = 3;

struct RelatedScore<'a> {
    record: &'a ContentRecord,
    score: usize,
}

/// Top `limit` records most topically related to `current`, ranked by
/// case-insensitive tag overlap with a strict recency tiebreak.
///
/// A current record without tags falls back to pure recency. Candidates
/// with no overlap score zero but stay in as filler, so short collections
/// still fill the limit. A collection containing only the current record
/// yields an empty result.
pub fn rank(current: &ContentRecord, all: &[ContentRecord], limit: usize) -> Vec<ContentRecord> {
    let candidates: Vec<&ContentRecord> =
        all.iter().filter(|r| r.slug != current.slug).collect();

    if current.tags.is_empty() {
        let mut by_recency = candidates;
        by_recency.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp()));
        return by_recency.into_iter().take(limit).cloned().collect();
    }

    let current_tags: HashSet<String> =
        current.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut scored: Vec<RelatedScore<'_>> = candidates
        .into_iter()
        .map(|record| RelatedScore {
            score: record
                .tags
                .iter()
                .filter(|t| current_tags.contains(&t.to_lowercase()))
                .count(),
            record,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.record.sort_timestamp().cmp(&a.record.sort_timestamp()))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|s| s.record.clone())
        .collect()
}
