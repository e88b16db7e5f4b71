//! Snapshot document encoding
//!
//! A snapshot is a flat JSON object mapping every key to its value as text,
//! pretty-printed with two-space indentation:
//!
//! ```text
//! {
//!   "service/web/port": "8080",
//!   "service/web/host": "10.0.0.4"
//! }
//! ```
//!
//! Keys are written in ascending creation order so successive backups of a
//! growing key space diff cleanly. Values are raw bytes read as UTF-8;
//! invalid sequences are replaced, which keeps the format readable by older
//! releases but means binary values do not survive a round trip.

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::{Result, SnapshotError};
use crate::kv::KeyValuePair;

/// Stable ascending sort on `create_index`. Ties keep listing order.
pub fn sort_by_create_index(pairs: &mut [KeyValuePair]) {
    pairs.sort_by_key(|pair| pair.create_index);
}

/// In-memory snapshot. Every value in `entries` is a JSON string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotDocument {
    entries: Map<String, Value>,
    lossy_values: usize,
}

impl SnapshotDocument {
    /// Build a document from pairs already in the desired order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = &'a KeyValuePair>,
    {
        let mut document = Self::default();
        for pair in pairs {
            let text = match String::from_utf8(pair.value.clone()) {
                Ok(text) => text,
                Err(e) => {
                    document.lossy_values += 1;
                    warn!(
                        "Value of '{}' is not valid UTF-8 and will be stored lossily",
                        pair.key
                    );
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            document.entries.insert(pair.key.clone(), Value::String(text));
        }
        document
    }

    /// Parse a snapshot. The root must be an object whose values are all strings.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let root: Value =
            serde_json::from_slice(data).map_err(|e| SnapshotError::MalformedDocument {
                reason: e.to_string(),
            })?;

        let entries = match root {
            Value::Object(entries) => entries,
            other => {
                return Err(SnapshotError::MalformedDocument {
                    reason: format!("expected a JSON object, found {}", json_kind(&other)),
                })
            }
        };

        if let Some((key, value)) = entries.iter().find(|(_, v)| !v.is_string()) {
            return Err(SnapshotError::MalformedDocument {
                reason: format!(
                    "value of '{}' must be a string, found {}",
                    key,
                    json_kind(value)
                ),
            });
        }

        Ok(Self {
            entries,
            lossy_values: 0,
        })
    }

    /// Pretty JSON with two-space indentation.
    ///
    /// Infallible: the document only ever holds string keys and string values.
    pub fn encode(&self) -> Vec<u8> {
        format!("{:#}", Value::Object(self.entries.clone())).into_bytes()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of values replaced during encoding because they were not UTF-8.
    pub fn lossy_values(&self) -> usize {
        self.lossy_values
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Keys and values in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
