use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::normalize::normalized_name;
use super::ClientRecord;
use crate::constants::PHONE_NUMBER_FIELD;
use crate::error::{PipelineError, Result};

/// What to do when two records normalize to the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later record silently replaces the earlier one
    #[default]
    LastWriteWins,
    /// Fail with `DuplicateKey` when the phones differ; identical phones are not a conflict
    RejectConflicts,
}

/// Phone numbers keyed by normalized name, built fresh for every join.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneIndex {
    entries: HashMap<String, String>,
    overwrites: usize,
}

impl PhoneIndex {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many inserts replaced an existing key while building.
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }
}

/// Indexes already-validated records with last-write-wins on name collisions.
pub fn build_phone_index(records: &[ClientRecord]) -> Result<PhoneIndex> {
    build_phone_index_with_policy(records, CollisionPolicy::LastWriteWins)
}

pub fn build_phone_index_with_policy(
    records: &[ClientRecord],
    policy: CollisionPolicy,
) -> Result<PhoneIndex> {
    let mut index = PhoneIndex::default();

    for record in records {
        let name = normalized_name(record)?.into_string();
        let phone = record
            .phone_number
            .as_ref()
            .and_then(|phone| phone.scalar_string())
            .ok_or_else(|| PipelineError::MissingField(PHONE_NUMBER_FIELD.to_string()))?;

        if let Some(existing) = index.entries.get(&name) {
            if policy == CollisionPolicy::RejectConflicts && *existing != phone {
                return Err(PipelineError::DuplicateKey {
                    key: name,
                    existing: existing.clone(),
                    incoming: phone,
                });
            }
            debug!(name = %name, previous = %existing, phone = %phone, "Phone index key overwritten");
            index.overwrites += 1;
        }

        index.entries.insert(name, phone);
    }

    Ok(index)
}
