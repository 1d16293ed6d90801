//! Builder input: raw path strings or labeled values, plus helpers that pull
//! them out of JSON documents and row sets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value half of a labeled entry, as it arrives from row data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Text(String),
    Number(serde_json::Number),
    Null,
}

impl From<&Value> for EntryValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => EntryValue::Text(s.clone()),
            Value::Number(n) => EntryValue::Number(n.clone()),
            _ => EntryValue::Null,
        }
    }
}

/// One input to the tree builder
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry {
    /// A bare path string
    Raw(String),
    /// A path value with an optional display label for its leaf node
    Labeled {
        label: Option<String>,
        value: EntryValue,
    },
}

impl TreeEntry {
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        TreeEntry::Labeled {
            label: Some(label.into()),
            value: EntryValue::Text(value.into()),
        }
    }

    /// Trimmed path, or `None` when the entry carries no usable string
    pub fn path(&self) -> Option<&str> {
        let raw = match self {
            TreeEntry::Raw(s) => s.as_str(),
            TreeEntry::Labeled {
                value: EntryValue::Text(s),
                ..
            } => s.as_str(),
            TreeEntry::Labeled { .. } => return None,
        };
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            TreeEntry::Labeled { label, .. } => label.as_deref(),
            TreeEntry::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, TreeEntry::Raw(_))
    }
}

impl From<&str> for TreeEntry {
    fn from(path: &str) -> Self {
        TreeEntry::Raw(path.to_string())
    }
}

impl From<String> for TreeEntry {
    fn from(path: String) -> Self {
        TreeEntry::Raw(path)
    }
}

/// Convert a JSON array of strings and `{label, value}` objects into entries.
///
/// Elements of any other shape become null-valued entries, which the builder
/// skips. A non-array document yields no entries.
pub fn entries_from_json(document: &Value) -> Vec<TreeEntry> {
    let Some(items) = document.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => TreeEntry::Raw(s.clone()),
            Value::Object(map) => TreeEntry::Labeled {
                label: map.get("label").and_then(Value::as_str).map(str::to_string),
                value: map.get("value").map(EntryValue::from).unwrap_or(EntryValue::Null),
            },
            _ => TreeEntry::Labeled {
                label: None,
                value: EntryValue::Null,
            },
        })
        .collect()
}

/// Extract entries from row objects, taking the path from `column` and the
/// leaf label from `label_column` when given.
pub fn entries_from_rows(rows: &[Value], column: &str, label_column: Option<&str>) -> Vec<TreeEntry> {
    rows.iter()
        .map(|row| {
            let value = row.get(column).map(EntryValue::from).unwrap_or(EntryValue::Null);
            let label = label_column
                .and_then(|name| row.get(name))
                .and_then(Value::as_str)
                .map(str::to_string);
            TreeEntry::Labeled { label, value }
        })
        .collect()
}

/// Parse JSON text into entries.
///
/// With `column` set the document must be an array of row objects; otherwise it
/// is read as in [`entries_from_json`].
pub fn parse_entries(
    text: &str,
    column: Option<&str>,
    label_column: Option<&str>,
) -> Result<Vec<TreeEntry>, serde_json::Error> {
    match column {
        Some(column) => {
            let rows: Vec<Value> = serde_json::from_str(text)?;
            Ok(entries_from_rows(&rows, column, label_column))
        }
        None => {
            let items: Vec<Value> = serde_json::from_str(text)?;
            Ok(entries_from_json(&Value::Array(items)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_trims_and_rejects_blank() {
        assert_eq!(TreeEntry::from("  a/b  ").path(), Some("a/b"));
        assert_eq!(TreeEntry::from("   ").path(), None);
        assert_eq!(TreeEntry::labeled("A", "").path(), None);
    }

    #[test]
    fn test_non_string_values_have_no_path() {
        let number = TreeEntry::Labeled {
            label: Some("n".into()),
            value: EntryValue::Number(serde_json::Number::from(7u64)),
        };
        let null = TreeEntry::Labeled {
            label: None,
            value: EntryValue::Null,
        };
        assert_eq!(number.path(), None);
        assert_eq!(null.path(), None);
    }

    #[test]
    fn test_entries_from_json_mixed_shapes() {
        let entries = entries_from_json(&json!([
            "a/b",
            {"label": "Helsinki", "value": "fi/helsinki"},
            {"value": 3},
            true
        ]));

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], TreeEntry::Raw("a/b".into()));
        assert_eq!(entries[1], TreeEntry::labeled("Helsinki", "fi/helsinki"));
        assert_eq!(entries[2].path(), None);
        assert_eq!(entries[3].path(), None);
    }

    #[test]
    fn test_entries_from_non_array_is_empty() {
        assert!(entries_from_json(&json!({"value": "a"})).is_empty());
    }

    #[test]
    fn test_entries_from_rows() {
        let rows = vec![
            json!({"region": "eu/fi", "name": "Finland"}),
            json!({"region": null, "name": "Nowhere"}),
            json!({"name": "Missing"}),
        ];
        let entries = entries_from_rows(&rows, "region", Some("name"));

        assert_eq!(entries[0].path(), Some("eu/fi"));
        assert_eq!(entries[0].label(), Some("Finland"));
        assert_eq!(entries[1].path(), None);
        assert_eq!(entries[2].path(), None);
    }

    #[test]
    fn test_parse_entries_rejects_non_array() {
        assert!(parse_entries("{\"a\": 1}", None, None).is_err());
        assert!(parse_entries("not json", Some("col"), None).is_err());
        let entries = parse_entries("[\"x.y\"]", None, None).unwrap();
        assert_eq!(entries, vec![TreeEntry::Raw("x.y".into())]);
    }
}
