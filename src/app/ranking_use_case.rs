use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{info, warn};

use crate::config::RankingConfig;
use crate::constants::DEFAULT_SELECTION_LIMIT;
use crate::error::Result;
use crate::observability::metrics::{emit_counter, emit_gauge, MetricName};
use crate::pipeline::ranking::{select_ranked, RankedRecord, RankedSelection};
use crate::types::RecordIdentity;

/// Selection over raw JSON input. `malformed` holds entries that are not objects
/// with a `userId`, in input order; they never compete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingReport {
    pub selected: Vec<RankedRecord<RecordIdentity>>,
    pub invalid: Vec<RankedRecord<RecordIdentity>>,
    pub malformed: Vec<Value>,
}

/// Use case for picking the newest unique records out of a time-stamped stream
#[derive(Debug, Clone)]
pub struct RankingUseCase {
    limit: usize,
}

impl Default for RankingUseCase {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION_LIMIT)
    }
}

impl RankingUseCase {
    /// A zero limit is accepted here and reported by `run`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.limit)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn run<K>(&self, records: &[RankedRecord<K>]) -> Result<RankedSelection<K>>
    where
        K: Eq + Hash + Clone + Debug,
    {
        info!(
            "Starting ranked selection: {} records, limit {}",
            records.len(),
            self.limit
        );
        emit_counter(MetricName::RankingBatchesProcessed, 1);
        emit_gauge(MetricName::RankingBatchSize, records.len() as f64);

        let selection = select_ranked(records, self.limit)?;

        emit_counter(MetricName::RankingRecordsInvalid, selection.invalid.len() as u64);
        emit_counter(MetricName::RankingRecordsSelected, selection.selected.len() as u64);
        for record in &selection.invalid {
            warn!(identity = ?record.identity, timestamp = ?record.timestamp, "Invalid timestamp, record dropped");
        }

        info!(
            "Ranked selection completed: {} selected, {} dropped for invalid timestamps",
            selection.selected.len(),
            selection.invalid.len()
        );

        Ok(selection)
    }

    /// Runs the selection over raw JSON records whose `userId` may be any JSON value.
    pub fn run_values(&self, values: &[Value]) -> Result<RankingReport> {
        let mut records = Vec::with_capacity(values.len());
        let mut malformed = Vec::new();
        for value in values {
            match RankedRecord::<RecordIdentity>::from_value(value) {
                Some(record) => records.push(record),
                None => {
                    warn!(record = %value, "Record without userId, record dropped");
                    malformed.push(value.clone());
                }
            }
        }

        let selection = self.run(&records)?;
        Ok(RankingReport {
            selected: selection.selected,
            invalid: selection.invalid,
            malformed,
        })
    }
}
