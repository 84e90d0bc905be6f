// Directory join: validate client records, index phones by normalized name,
// then enrich orders with the indexed phone number.

pub mod index;
pub mod join;
pub mod normalize;
pub mod validate;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{present_field, FieldValue};

pub use index::{build_phone_index, build_phone_index_with_policy, CollisionPolicy, PhoneIndex};
pub use join::{join_order, join_orders, EnrichedOrder, JoinOutcome};
pub use normalize::{normalized_name, NormalizedName};
pub use validate::{
    check_client_record, is_valid_client_record, is_valid_phone_number, partition_clients,
    validate_client_record, ClientPartition, ClientRejection, RejectedClient,
};

/// A client directory entry as supplied by an untrusted source.
///
/// Every known field is optional; anything else the source sends is kept in `extra`
/// and otherwise ignored. A field sent as `null` is present, not absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub second_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<FieldValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientRecord {
    /// Reads a record out of an arbitrary JSON value. Only objects qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// An order as supplied by the caller. `name` is expected in "First Last" form already.
///
/// Both fields are read loosely so one odd order never fails a batch; only a text
/// `name` can match the directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(
        default,
        alias = "orderId",
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<FieldValue>,
}

impl OrderRecord {
    pub fn new(name: &str, order: impl Into<FieldValue>) -> Self {
        Self {
            name: Some(FieldValue::text(name)),
            order: Some(order.into()),
        }
    }

    /// Reads an order out of an arbitrary JSON value. Only objects qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn name_text(&self) -> Option<&str> {
        self.name.as_ref().and_then(FieldValue::as_text)
    }
}
