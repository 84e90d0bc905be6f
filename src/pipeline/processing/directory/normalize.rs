use serde::{Deserialize, Serialize};
use std::fmt;

use super::validate::usable_name_part;
use super::ClientRecord;
use crate::constants::{FIRST_NAME_FIELD, SECOND_NAME_FIELD};
use crate::error::{PipelineError, Result};

/// Join key built from a client's name parts, e.g. "Vitaliy Braun".
///
/// Not unique across a directory: two clients may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Upper-cases the first character and lower-cases the rest.
fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Builds the join key from the usable name parts, first name before second name.
///
/// Fails with `MissingField` when neither part is usable, which validation rules out.
pub fn normalized_name(record: &ClientRecord) -> Result<NormalizedName> {
    let parts: Vec<String> = [record.first_name.as_ref(), record.second_name.as_ref()]
        .into_iter()
        .filter_map(usable_name_part)
        .map(title_case)
        .collect();

    if parts.is_empty() {
        return Err(PipelineError::MissingField(format!(
            "{} or {}",
            FIRST_NAME_FIELD, SECOND_NAME_FIELD
        )));
    }

    Ok(NormalizedName(parts.join(" ")))
}
