use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::trace;

use super::timestamp::timestamp_value;
use super::RankedRecord;
use crate::error::{PipelineError, Result};

/// Result of a ranked selection. `invalid` holds the records dropped for their
/// timestamp, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSelection<K = String> {
    pub selected: Vec<RankedRecord<K>>,
    pub invalid: Vec<RankedRecord<K>>,
}

/// Keeps at most `limit` records, one per identity, newest timestamp first.
///
/// Records with an invalid timestamp never compete. Equal timestamps keep their input
/// order, so among duplicates the newest wins and on a tie the earliest one does.
/// Fewer unique records than `limit` is not an error.
pub fn select_ranked<K>(records: &[RankedRecord<K>], limit: usize) -> Result<RankedSelection<K>>
where
    K: Eq + Hash + Clone,
{
    if limit == 0 {
        return Err(PipelineError::InvalidArgument(
            "selection limit must be greater than zero".to_string(),
        ));
    }

    let mut ranked = Vec::with_capacity(records.len());
    let mut invalid = Vec::new();
    for record in records {
        match timestamp_value(record.timestamp.as_ref()) {
            Some(value) => ranked.push((value, record)),
            None => invalid.push(record.clone()),
        }
    }

    // `sort_by` is stable.
    ranked.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let mut seen: HashSet<&K> = HashSet::new();
    let mut selected = Vec::with_capacity(limit.min(ranked.len()));
    for (value, record) in ranked {
        if !seen.insert(&record.identity) {
            trace!(timestamp = value, "skipping lower-ranked duplicate");
            continue;
        }
        selected.push(record.clone());
        if selected.len() == limit {
            break;
        }
    }

    Ok(RankedSelection { selected, invalid })
}

pub fn top_n_unique<K>(records: &[RankedRecord<K>], n: usize) -> Result<Vec<RankedRecord<K>>>
where
    K: Eq + Hash + Clone,
{
    select_ranked(records, n).map(|selection| selection.selected)
}
