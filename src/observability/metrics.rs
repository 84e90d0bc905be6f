//! Metric names and emit helpers for the record pipelines
//!
//! Recording goes through the `metrics` facade; without an installed recorder
//! every call is a no-op, so the pipelines never depend on an exporter.

use std::fmt;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Directory join metrics
    DirectoryJoinBatchesProcessed,
    DirectoryClientsAccepted,
    DirectoryClientsRejected,
    DirectoryIndexOverwrites,
    DirectoryIndexSize,
    DirectoryOrdersResolved,
    DirectoryOrdersUnresolved,

    // Ranking metrics
    RankingBatchesProcessed,
    RankingRecordsInvalid,
    RankingRecordsSelected,
    RankingBatchSize,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::DirectoryJoinBatchesProcessed => "rp_directory_join_batches_processed_total",
            MetricName::DirectoryClientsAccepted => "rp_directory_clients_accepted_total",
            MetricName::DirectoryClientsRejected => "rp_directory_clients_rejected_total",
            MetricName::DirectoryIndexOverwrites => "rp_directory_index_overwrites_total",
            MetricName::DirectoryIndexSize => "rp_directory_index_size",
            MetricName::DirectoryOrdersResolved => "rp_directory_orders_resolved_total",
            MetricName::DirectoryOrdersUnresolved => "rp_directory_orders_unresolved_total",

            MetricName::RankingBatchesProcessed => "rp_ranking_batches_processed_total",
            MetricName::RankingRecordsInvalid => "rp_ranking_records_invalid_total",
            MetricName::RankingRecordsSelected => "rp_ranking_records_selected_total",
            MetricName::RankingBatchSize => "rp_ranking_batch_size",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        [
            MetricName::DirectoryJoinBatchesProcessed,
            MetricName::DirectoryClientsAccepted,
            MetricName::DirectoryClientsRejected,
            MetricName::DirectoryIndexOverwrites,
            MetricName::DirectoryIndexSize,
            MetricName::DirectoryOrdersResolved,
            MetricName::DirectoryOrdersUnresolved,
            MetricName::RankingBatchesProcessed,
            MetricName::RankingRecordsInvalid,
            MetricName::RankingRecordsSelected,
            MetricName::RankingBatchSize,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn emit_counter(name: MetricName, value: u64) {
    ::metrics::counter!(name.as_str()).increment(value);
}

pub fn emit_gauge(name: MetricName, value: f64) {
    ::metrics::gauge!(name.as_str()).set(value);
}
