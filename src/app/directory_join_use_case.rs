use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::DirectoryJoinConfig;
use crate::error::Result;
use crate::observability::metrics::{emit_counter, emit_gauge, MetricName};
use crate::pipeline::directory::{
    build_phone_index_with_policy, join_order, partition_clients, CollisionPolicy,
    EnrichedOrder, OrderRecord, RejectedClient,
};

/// Everything a caller needs after a join: enriched orders plus both reject buckets.
///
/// Unresolved orders are returned exactly as supplied, in input order, whatever their shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryJoinReport {
    pub resolved: Vec<EnrichedOrder>,
    pub unresolved: Vec<Value>,
    pub rejected_clients: Vec<RejectedClient>,
}

/// Use case for joining a raw client directory with an order list
#[derive(Debug, Clone, Default)]
pub struct DirectoryJoinUseCase {
    policy: CollisionPolicy,
}

impl DirectoryJoinUseCase {
    /// Create a use case with the last-write-wins collision policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &DirectoryJoinConfig) -> Self {
        Self::with_policy(config.collision_policy)
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Validate clients, index their phones and enrich the orders.
    ///
    /// Each order is decided on its own: anything that is not an object with a known
    /// text name and an order id lands in `unresolved`. Fails only when the strict
    /// policy meets a conflicting name.
    pub fn run(&self, clients: &[Value], orders: &[Value]) -> Result<DirectoryJoinReport> {
        info!(
            "Starting directory join: {} client records, {} orders",
            clients.len(),
            orders.len()
        );
        emit_counter(MetricName::DirectoryJoinBatchesProcessed, 1);

        let partition = partition_clients(clients);
        emit_counter(MetricName::DirectoryClientsAccepted, partition.accepted.len() as u64);
        emit_counter(MetricName::DirectoryClientsRejected, partition.rejected.len() as u64);
        for rejected in &partition.rejected {
            warn!(reason = rejected.reason.as_str(), record = %rejected.record, "Client record rejected");
        }

        let index = build_phone_index_with_policy(&partition.accepted, self.policy)?;
        emit_gauge(MetricName::DirectoryIndexSize, index.len() as f64);
        if index.overwrites() > 0 {
            emit_counter(MetricName::DirectoryIndexOverwrites, index.overwrites() as u64);
            warn!(
                "{} client records shared a normalized name; later records replaced earlier ones",
                index.overwrites()
            );
        }
        debug!("Phone index built with {} names", index.len());

        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for value in orders {
            match OrderRecord::from_value(value).and_then(|order| join_order(&order, &index)) {
                Some(enriched) => resolved.push(enriched),
                None => {
                    warn!(order = %value, "No phone number found for order");
                    unresolved.push(value.clone());
                }
            }
        }
        emit_counter(MetricName::DirectoryOrdersResolved, resolved.len() as u64);
        emit_counter(MetricName::DirectoryOrdersUnresolved, unresolved.len() as u64);

        info!(
            "Directory join completed: {} resolved, {} unresolved, {} clients rejected",
            resolved.len(),
            unresolved.len(),
            partition.rejected.len()
        );

        Ok(DirectoryJoinReport {
            resolved,
            unresolved,
            rejected_clients: partition.rejected,
        })
    }
}
