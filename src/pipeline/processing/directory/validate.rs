use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::ClientRecord;
use crate::constants::MAX_UNFORMATTED_PHONE_DIGITS;
use crate::types::{trim_loose, FieldValue};

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("static regex"));

static SHORT_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[0-9]{{0,{}}}$", MAX_UNFORMATTED_PHONE_DIGITS)).expect("static regex")
});

/// The first rule a client record failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRejection {
    /// The input was not a JSON object
    NotAnObject,
    /// Neither name part is non-blank text
    MissingName,
    /// No phone field at all
    MissingPhone,
    /// The phone field failed the syntax rule, including an explicit `null`
    InvalidPhone,
}

impl ClientRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAnObject => "not_an_object",
            Self::MissingName => "missing_name",
            Self::MissingPhone => "missing_phone",
            Self::InvalidPhone => "invalid_phone",
        }
    }
}

/// A raw input that did not make it into the directory, with the rule it broke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedClient {
    pub record: Value,
    pub reason: ClientRejection,
}

/// Raw client inputs split into usable records and rejects, both in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPartition {
    pub accepted: Vec<ClientRecord>,
    pub rejected: Vec<RejectedClient>,
}

/// Name part usable for the join key: present, text and not blank. Returns it trimmed.
pub(crate) fn usable_name_part(part: Option<&FieldValue>) -> Option<&str> {
    part.and_then(FieldValue::as_text)
        .map(trim_loose)
        .filter(|text| !text.is_empty())
}

/// Phone syntax rule.
///
/// Only text and numbers qualify. A value containing `\n` is rejected. Otherwise the
/// value passes if it contains any non-digit character or is a run of at most
/// ten digits, so only unformatted numbers of eleven or more digits fail.
/// The empty string passes.
pub fn is_valid_phone_number(value: &FieldValue) -> bool {
    let Some(text) = value.scalar_string() else {
        return false;
    };
    !text.contains('\n') && (NON_DIGIT.is_match(&text) || SHORT_DIGIT_RUN.is_match(&text))
}

pub fn check_client_record(record: &ClientRecord) -> Result<(), ClientRejection> {
    let has_name = usable_name_part(record.first_name.as_ref()).is_some()
        || usable_name_part(record.second_name.as_ref()).is_some();
    if !has_name {
        return Err(ClientRejection::MissingName);
    }

    let phone = record
        .phone_number
        .as_ref()
        .ok_or(ClientRejection::MissingPhone)?;
    if !is_valid_phone_number(phone) {
        return Err(ClientRejection::InvalidPhone);
    }

    Ok(())
}

/// Reads and checks one raw input, returning the typed record when it is usable.
pub fn validate_client_record(value: &Value) -> Result<ClientRecord, ClientRejection> {
    let record = ClientRecord::from_value(value).ok_or(ClientRejection::NotAnObject)?;
    check_client_record(&record)?;
    Ok(record)
}

pub fn is_valid_client_record(value: &Value) -> bool {
    validate_client_record(value).is_ok()
}

pub fn partition_clients(values: &[Value]) -> ClientPartition {
    let mut partition = ClientPartition::default();

    for value in values {
        match validate_client_record(value) {
            Ok(record) => partition.accepted.push(record),
            Err(reason) => {
                trace!(reason = reason.as_str(), "client record rejected");
                partition.rejected.push(RejectedClient {
                    record: value.clone(),
                    reason,
                });
            }
        }
    }

    partition
}
