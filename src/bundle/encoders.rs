//! Encoders bundle format.
//!
//! The per-field vocabularies and the unseen-value policy are persisted as
//! plain JSON so they can be produced by whatever exported the fitted
//! label encoders.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::{CategoryEncoder, EncodingTable, UnseenPolicy, VocabularyError};

/// Errors raised while reading or writing an encoders bundle.
#[derive(Debug, Error)]
pub enum EncodersError {
    /// The file could not be read or written.
    #[error("failed to access encoders bundle: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON document is malformed.
    #[error("malformed encoders bundle: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persisted vocabulary is unusable (empty or duplicated categories).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid vocabulary for field `{field}`: {source}")]
pub struct InvalidVocabulary {
    /// Field name.
    pub field: String,
    /// Underlying vocabulary error.
    pub source: VocabularyError,
}

/// Persisted per-field vocabularies plus the unseen-value policy.
///
/// The JSON shape is
///
/// ```json
/// {
///   "policy": "fallback-to-default",
///   "vocabularies": {
///     "Contract": ["Month-to-month", "One year", "Two year"]
///   }
/// }
/// ```
///
/// `policy` may be omitted and defaults to silent correction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodersBundle {
    /// The table-wide unseen-value policy.
    #[serde(default)]
    pub policy: UnseenPolicy,
    /// Field name → ordered vocabulary.
    pub vocabularies: BTreeMap<String, Vec<String>>,
}

impl EncodersBundle {
    /// Bundle an encoding table for persistence.
    pub fn from_table(table: &EncodingTable) -> Self {
        Self {
            policy: table.policy(),
            vocabularies: table
                .iter()
                .map(|(field, enc)| (field.to_owned(), enc.vocabulary().to_vec()))
                .collect(),
        }
    }

    /// Reconstruct the encoding table.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVocabulary`] for the first field whose vocabulary
    /// is empty or carries duplicates.
    pub fn into_table(self) -> Result<EncodingTable, InvalidVocabulary> {
        let mut table = EncodingTable::new(self.policy);
        for (field, vocabulary) in self.vocabularies {
            let encoder =
                CategoryEncoder::new(vocabulary).map_err(|source| InvalidVocabulary {
                    field: field.clone(),
                    source,
                })?;
            table.insert(field, encoder);
        }
        Ok(table)
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<String, EncodersError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, EncodersError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the bundle to a file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), EncodersError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a bundle from a file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, EncodersError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
