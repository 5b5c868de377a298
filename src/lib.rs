//! churncast: encode-and-infer pipeline for telecom customer churn.
//!
//! Takes one raw customer attribute record, encodes its categorical fields
//! through per-field vocabularies, assembles a schema-ordered feature
//! vector, runs a pre-trained binary classifier, and interprets the result
//! into a churn/stay verdict with a probability.
//!
//! # Key Types
//!
//! - [`ChurnPipeline`] - The pipeline: validate → encode → order → infer → interpret
//! - [`RawRecord`] - One customer's raw attributes, as collected by the host
//! - [`AttributeSchema`] / [`EncodingTable`] - The field contract and the encoders
//! - [`Prediction`] / [`Verdict`] - The display payload
//! - [`ModelBundle`] / [`EncodersBundle`] - Persisted startup state
//!
//! # Usage
//!
//! Load both bundles once at process start, wire a [`ChurnPipeline`], then
//! call [`predict`](ChurnPipeline::predict) once per user action:
//!
//! ```
//! use churncast::testing;
//!
//! let pipeline = testing::demo_pipeline();
//! let prediction = pipeline.predict(&testing::demo_record()).unwrap();
//!
//! println!("{} ({})", prediction.verdict, prediction.percent());
//! ```
//!
//! The pipeline holds only immutable state after construction and can be
//! shared across threads freely.

pub mod assemble;
pub mod bundle;
pub mod encoding;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod testing;
pub mod verdict;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// The pipeline and its error surfaces
pub use pipeline::{ChurnPipeline, PredictError, SetupError};

// Request and response types
pub use record::{RawRecord, RawValue};
pub use verdict::{Prediction, Verdict};

// Schema and encoding types
pub use encoding::{CategoryEncoder, EncodingTable, UnseenPolicy};
pub use schema::{AttributeSchema, FieldKind, FieldSpec};

// Classifier and persisted state
pub use bundle::{EncodersBundle, ModelBundle};
pub use model::LogitModel;
