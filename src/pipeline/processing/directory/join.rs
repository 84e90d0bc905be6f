use serde::Serialize;

use super::index::PhoneIndex;
use super::OrderRecord;

/// An order whose customer name resolved to a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedOrder {
    pub name: String,
    pub phone_number: String,
    pub order: String,
}

/// Orders split by whether their name resolved; both sides keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinOutcome {
    pub resolved: Vec<EnrichedOrder>,
    pub unresolved: Vec<OrderRecord>,
}

/// Enriches one order, or `None` when its name is not text, is not in the index,
/// or the order carries no order id.
///
/// The name is looked up verbatim (case-sensitive, not normalized).
pub fn join_order(order: &OrderRecord, index: &PhoneIndex) -> Option<EnrichedOrder> {
    let name = order.name_text()?;
    let phone = index.get(name)?;
    let order_id = order.order.as_ref()?;

    Some(EnrichedOrder {
        name: name.to_string(),
        phone_number: phone.to_string(),
        order: order_id.to_string(),
    })
}

pub fn join_orders(orders: &[OrderRecord], index: &PhoneIndex) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();

    for order in orders {
        match join_order(order, index) {
            Some(enriched) => outcome.resolved.push(enriched),
            None => outcome.unresolved.push(order.clone()),
        }
    }

    outcome
}
