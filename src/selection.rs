//! Normalization of raw selection payloads from a tree select control.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single selected value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Text(String),
    Number(serde_json::Number),
}

impl SelectionValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(SelectionValue::Text(s.clone())),
            Value::Number(n) => Some(SelectionValue::Number(n.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SelectionValue::Text(s) => Value::String(s.clone()),
            SelectionValue::Number(n) => Value::Number(n.clone()),
        }
    }
}

impl From<&str> for SelectionValue {
    fn from(s: &str) -> Self {
        SelectionValue::Text(s.to_string())
    }
}

/// Canonical selection state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing has been chosen yet
    #[default]
    Untouched,
    /// The selection was explicitly cleared
    Cleared,
    /// Selected values, in control order
    Values(Vec<SelectionValue>),
}

impl Selection {
    pub fn values(&self) -> Option<&[SelectionValue]> {
        match self {
            Selection::Values(values) => Some(values),
            _ => None,
        }
    }

    /// JSON form of the selection; `None` stands for undefined
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Selection::Untouched => None,
            Selection::Cleared => Some(Value::Null),
            Selection::Values(values) => {
                Some(Value::Array(values.iter().map(SelectionValue::to_json).collect()))
            }
        }
    }
}

/// Normalize a raw selection payload.
///
/// `None` (undefined) stays untouched and `null` means cleared. A scalar
/// string or number becomes a one-element selection, and an array keeps only
/// its string and number elements in order. Anything else counts as cleared.
pub fn normalize_selection(raw: Option<&Value>) -> Selection {
    let Some(raw) = raw else {
        return Selection::Untouched;
    };

    match raw {
        Value::Null => Selection::Cleared,
        Value::String(_) | Value::Number(_) => {
            Selection::Values(SelectionValue::from_json(raw).into_iter().collect())
        }
        Value::Array(items) => {
            Selection::Values(items.iter().filter_map(SelectionValue::from_json).collect())
        }
        Value::Bool(_) | Value::Object(_) => {
            tracing::debug!(?raw, "unsupported selection payload, treating as cleared");
            Selection::Cleared
        }
    }
}
