//! Raw attribute records.
//!
//! A [`RawRecord`] is the transient field-name → value map handed to the
//! pipeline by the form-collecting host, created per request and discarded
//! after encoding. Insertion order carries no meaning; assembly always
//! reorders to the model's training schema.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A raw attribute value: a categorical string or a numeric value.
///
/// Deserializes untagged, so a plain JSON object maps straight onto a
/// record: strings become [`Text`](RawValue::Text), numbers become
/// [`Number`](RawValue::Number).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Numeric value (also used for the 0/1 senior-citizen flag).
    Number(f64),
    /// Categorical string value.
    Text(String),
}

impl RawValue {
    /// The string payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            RawValue::Number(_) => None,
        }
    }

    /// The numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

/// One customer's raw attributes, keyed by field name.
///
/// # Example
///
/// ```
/// use churncast::record::RawRecord;
///
/// let record = RawRecord::new()
///     .with("gender", "Female")
///     .with("tenure", 12i64);
///
/// assert_eq!(record.get("gender").unwrap().as_text(), Some("Female"));
/// assert_eq!(record.get("tenure").unwrap().as_number(), Some(12.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    values: HashMap<String, RawValue>,
}

impl RawRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a field value.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    /// Remove a field value, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.values.remove(name)
    }

    /// True if the record carries the named field.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no fields are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
