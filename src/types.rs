use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A loosely-typed input value, classified once when it crosses the JSON boundary.
///
/// Validators match on the variant instead of inspecting raw JSON again.
/// `Other` keeps the input value so rejected records serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Other(Value),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// String form of a text or numeric value; `None` for every other shape.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some(text.clone()),
            FieldValue::Number(number) => Some(number_string(number)),
            FieldValue::Other(_) => None,
        }
    }
}

/// Decimal form of a JSON number as loosely-typed producers print it.
///
/// Integral floats below 1e21 drop their fraction (`3452.0` is `"3452"`, `-0.0` is `"0"`);
/// every other float keeps the shortest round-trip form.
pub fn number_string(number: &Number) -> String {
    if number.is_f64() {
        if let Some(value) = number.as_f64() {
            if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
                return format!("{:.0}", value + 0.0);
            }
        }
    }
    number.to_string()
}

/// Whitespace and line terminators stripped around loosely-typed text.
///
/// Narrower than `char::is_whitespace`: U+0085 is not included, U+FEFF is.
pub fn is_loose_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn trim_loose(text: &str) -> &str {
    text.trim_matches(is_loose_whitespace)
}

/// Deserializes an optional field so that an explicit `null` stays `Some`.
///
/// Pair with `#[serde(default)]`: only an absent key becomes `None`.
pub(crate) fn present_field<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| Some(FieldValue::from(value)))
}

/// An identity of any JSON shape, usable as a dedup key.
///
/// Strings and numbers never collide (`"1"` and `1` differ), while numbers compare
/// by their printed form, so `1` and `1.0` are the same identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordIdentity(Value);

impl RecordIdentity {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn key(&self) -> String {
        match &self.0 {
            Value::String(text) => format!("s:{}", text),
            Value::Number(number) => format!("n:{}", number_string(number)),
            other => format!("j:{}", other),
        }
    }
}

impl PartialEq for RecordIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RecordIdentity {}

impl Hash for RecordIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text),
            Value::Number(number) => FieldValue::Number(number),
            other => FieldValue::Other(other),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(text) => Value::String(text),
            FieldValue::Number(number) => Value::Number(number),
            FieldValue::Other(other) => other,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Number(number) => write!(f, "{}", number_string(number)),
            FieldValue::Other(other) => write!(f, "{}", other),
        }
    }
}
