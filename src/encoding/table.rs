//! Encoding table: the per-field encoders plus the unseen-value policy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::encoder::CategoryEncoder;

/// What to do with a categorical value outside its field's vocabulary.
///
/// The policy is fixed when the table is built and applied uniformly to
/// every field; the two behaviors are never mixed within one table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnseenPolicy {
    /// Silently substitute the vocabulary's default (first) value.
    #[default]
    FallbackToDefault,

    /// Fail encoding with [`EncodeError::UnknownCategory`].
    Reject,
}

/// Errors raised by [`EncodingTable::encode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The table has no encoder for the requested field.
    #[error("no encoder registered for field `{field}`")]
    MissingEncoder {
        /// Field name.
        field: String,
    },

    /// The value is outside the field's vocabulary and the table's policy
    /// is [`UnseenPolicy::Reject`].
    #[error("value `{value}` is not in the vocabulary of field `{field}`")]
    UnknownCategory {
        /// Field name.
        field: String,
        /// The offending value.
        value: String,
    },
}

/// Immutable field-name → encoder map.
///
/// Loaded once at process start from the encoders bundle and shared by
/// reference for the process lifetime. Encoding a field applies the
/// table-wide [`UnseenPolicy`].
///
/// # Example
///
/// ```
/// use churncast::encoding::{CategoryEncoder, EncodingTable, UnseenPolicy};
///
/// let table = EncodingTable::new(UnseenPolicy::FallbackToDefault)
///     .with_encoder(
///         "Partner",
///         CategoryEncoder::from_categories(&["No", "Yes"]).unwrap(),
///     );
///
/// assert_eq!(table.encode("Partner", "Yes").unwrap(), 1);
/// // Unseen value, silently corrected to the default category.
/// assert_eq!(table.encode("Partner", "Maybe").unwrap(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodingTable {
    encoders: BTreeMap<String, CategoryEncoder>,
    policy: UnseenPolicy,
}

impl EncodingTable {
    /// Create an empty table with the given policy.
    pub fn new(policy: UnseenPolicy) -> Self {
        Self {
            encoders: BTreeMap::new(),
            policy,
        }
    }

    /// Register an encoder for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, encoder: CategoryEncoder) {
        self.encoders.insert(field.into(), encoder);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_encoder(mut self, field: impl Into<String>, encoder: CategoryEncoder) -> Self {
        self.insert(field, encoder);
        self
    }

    /// The table-wide unseen-value policy.
    pub fn policy(&self) -> UnseenPolicy {
        self.policy
    }

    /// Look up the encoder for a field.
    pub fn encoder(&self, field: &str) -> Option<&CategoryEncoder> {
        self.encoders.get(field)
    }

    /// True if the table has an encoder for the field.
    pub fn contains(&self, field: &str) -> bool {
        self.encoders.contains_key(field)
    }

    /// Number of registered encoders.
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    /// True if no encoders are registered.
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// Iterate over (field, encoder) pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryEncoder)> {
        self.encoders.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode one field value under the table's policy.
    ///
    /// # Errors
    ///
    /// [`EncodeError::MissingEncoder`] if the field has no encoder;
    /// [`EncodeError::UnknownCategory`] if the value is unseen and the
    /// policy is [`UnseenPolicy::Reject`].
    pub fn encode(&self, field: &str, value: &str) -> Result<usize, EncodeError> {
        let encoder = self
            .encoders
            .get(field)
            .ok_or_else(|| EncodeError::MissingEncoder {
                field: field.to_owned(),
            })?;

        match self.policy {
            UnseenPolicy::FallbackToDefault => Ok(encoder.encode_or_default(value)),
            UnseenPolicy::Reject => {
                encoder
                    .encode(value)
                    .ok_or_else(|| EncodeError::UnknownCategory {
                        field: field.to_owned(),
                        value: value.to_owned(),
                    })
            }
        }
    }
}
