//! Persisted startup state.
//!
//! Two bundles are loaded once at process start: the model bundle (native
//! binary format, classifier weights plus the training field order) and
//! the encoders bundle (JSON, per-field vocabularies plus the unseen-value
//! policy). Both are immutable for the process lifetime after loading.

mod encoders;
mod model;

pub use encoders::{EncodersBundle, EncodersError, InvalidVocabulary};
pub use model::{
    BundleMeta, DeserializeError, ModelBundle, Payload, PayloadV1, SerializeError, MAGIC,
};
