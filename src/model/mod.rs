//! Classifier types.
//!
//! The inference invoker: given exactly one assembled feature vector,
//! produce a discrete stay/churn label and the churn-class probability.
//! Stateless, single-shot, no batching.

mod linear;

pub use linear::{
    InferenceError, LogitModel, ModelShapeError, LABEL_CHURN, LABEL_STAY,
};
