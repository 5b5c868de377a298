//! Native model bundle format.
//!
//! The classifier and its training field order are persisted together as a
//! Postcard-encoded, version-tagged payload behind a short magic prefix.
//! New format versions add payload variants rather than modifying existing
//! ones, so older readers detect unsupported versions by the discriminant.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{LogitModel, ModelShapeError};

/// Magic prefix identifying a churncast model bundle.
pub const MAGIC: [u8; 4] = *b"CHRN";

/// Errors raised while writing a model bundle.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// Payload encoding failed.
    #[error("failed to encode model bundle: {0}")]
    Encode(#[from] postcard::Error),

    /// The file could not be written.
    #[error("failed to write model bundle: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading a model bundle.
#[derive(Debug, Error)]
pub enum DeserializeError {
    /// The input does not start with [`MAGIC`].
    #[error("not a churncast model bundle (bad magic)")]
    BadMagic,

    /// Payload decoding failed (truncated, corrupt, or from an unknown
    /// format version).
    #[error("failed to decode model bundle: {0}")]
    Decode(#[from] postcard::Error),

    /// The file could not be read.
    #[error("failed to read model bundle: {0}")]
    Io(#[from] std::io::Error),
}

/// Version-tagged bundle payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Version 1 payload format.
    V1(PayloadV1),
}

/// Version 1 payload structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadV1 {
    /// Bundle metadata.
    pub metadata: BundleMeta,
    /// Flat weight vector of length `n_features + 1`; the last entry is
    /// the bias.
    pub weights: Vec<f32>,
    /// Training field order the assembler must reproduce.
    pub field_names: Vec<String>,
}

/// Metadata persisted alongside the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMeta {
    /// Number of input features.
    pub n_features: u32,
    /// Objective the model was trained with (e.g. "binary:logistic").
    pub objective: Option<String>,
    /// Additional key-value attributes.
    pub attributes: Vec<(String, String)>,
}

impl Default for BundleMeta {
    fn default() -> Self {
        Self {
            n_features: 0,
            objective: Some("binary:logistic".to_owned()),
            attributes: Vec::new(),
        }
    }
}

/// A persisted classifier plus its expected field-order schema.
///
/// # Example
///
/// ```
/// use churncast::bundle::ModelBundle;
/// use churncast::testing;
///
/// let bundle = ModelBundle::from_model(testing::demo_model());
/// let bytes = bundle.to_bytes().unwrap();
/// let restored = ModelBundle::from_bytes(&bytes).unwrap();
/// assert_eq!(restored, bundle);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBundle {
    payload: Payload,
}

impl ModelBundle {
    /// Bundle a classifier for persistence.
    pub fn from_model(model: LogitModel) -> Self {
        let metadata = BundleMeta {
            n_features: model.n_features() as u32,
            ..Default::default()
        };
        let weights = model.weights().iter().copied().collect();
        let field_names = model.field_names().to_vec();
        Self {
            payload: Payload::V1(PayloadV1 {
                metadata,
                weights,
                field_names,
            }),
        }
    }

    /// Reconstruct the classifier.
    ///
    /// # Errors
    ///
    /// Returns [`ModelShapeError`] if the persisted weights do not form a
    /// valid classifier for the persisted field list.
    pub fn into_model(self) -> Result<LogitModel, ModelShapeError> {
        let Payload::V1(v1) = self.payload;
        let rows = v1.weights.len();
        let weights = Array2::from_shape_vec((rows, 1), v1.weights).map_err(|_| {
            ModelShapeError::WeightRowMismatch {
                rows,
                fields: v1.field_names.len(),
            }
        })?;
        LogitModel::from_parts(weights, v1.field_names)
    }

    /// Bundle metadata.
    pub fn meta(&self) -> &BundleMeta {
        let Payload::V1(v1) = &self.payload;
        &v1.metadata
    }

    /// The persisted training field order.
    pub fn field_names(&self) -> &[String] {
        let Payload::V1(v1) = &self.payload;
        &v1.field_names
    }

    /// Serialize to bytes: [`MAGIC`] followed by the Postcard payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend(postcard::to_allocvec(&self.payload)?);
        Ok(bytes)
    }

    /// Deserialize from bytes produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// [`DeserializeError::BadMagic`] if the prefix is wrong, otherwise a
    /// decode error for corrupt or unknown-version payloads.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DeserializeError> {
        let body = bytes
            .strip_prefix(&MAGIC[..])
            .ok_or(DeserializeError::BadMagic)?;
        let payload = postcard::from_bytes(body)?;
        Ok(Self { payload })
    }

    /// Write the bundle to a file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Read a bundle from a file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DeserializeError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
