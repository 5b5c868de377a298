//! The inference pipeline.
//!
//! [`ChurnPipeline`] wires the attribute schema, the encoding table, and
//! the classifier into the single linear transformation the host invokes
//! once per user action: validate → encode → order → infer → interpret.
//! The three parts are loaded once at startup and read-only afterwards, so
//! one pipeline may be shared across threads without locks.

use thiserror::Error;

use crate::assemble::{assemble, AssembleError};
use crate::bundle::{EncodersBundle, InvalidVocabulary, ModelBundle};
use crate::encoding::EncodingTable;
use crate::model::{InferenceError, LogitModel, ModelShapeError, LABEL_CHURN, LABEL_STAY};
use crate::record::RawRecord;
use crate::schema::AttributeSchema;
use crate::verdict::Prediction;

/// Startup configuration defects.
///
/// These indicate that the loaded model, attribute schema, and encoders
/// disagree with each other. They are surfaced once at construction and
/// are distinct from the per-request [`PredictError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// Model and schema disagree on the number of fields.
    #[error("model was trained on {model} fields but the schema declares {schema}")]
    FieldCountMismatch {
        /// Fields in the model's training schema.
        model: usize,
        /// Fields in the attribute schema.
        schema: usize,
    },

    /// The model references a field the schema does not declare.
    #[error("model references field `{field}` which the attribute schema does not declare")]
    UnknownModelField {
        /// Field name.
        field: String,
    },

    /// A schema field is absent from the model's training schema.
    #[error("attribute schema field `{field}` is not covered by the model")]
    UncoveredField {
        /// Field name.
        field: String,
    },

    /// A categorical field has no encoder in the table.
    #[error("no encoder registered for categorical field `{field}`")]
    MissingEncoder {
        /// Field name.
        field: String,
    },

    /// The model bundle's weights do not form a valid classifier.
    #[error(transparent)]
    Model(#[from] ModelShapeError),

    /// The encoders bundle carries an invalid vocabulary.
    #[error(transparent)]
    Vocabulary(#[from] InvalidVocabulary),
}

/// Per-request prediction failures.
///
/// Every failure is surfaced as one typed error at the pipeline boundary;
/// no partial result is ever emitted and nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The record could not be turned into a feature vector.
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// The classifier call itself failed.
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

impl PredictError {
    /// True when the failure indicates a configuration defect rather than
    /// bad request input. Hosts may want to alert on these instead of
    /// showing a form error.
    pub fn is_schema_defect(&self) -> bool {
        matches!(
            self,
            PredictError::Assemble(AssembleError::SchemaMismatch { .. })
                | PredictError::Inference(_)
        )
    }
}

/// The encode-and-infer pipeline.
///
/// # Example
///
/// ```
/// use churncast::testing;
///
/// let pipeline = testing::demo_pipeline();
/// let record = testing::demo_record();
///
/// let prediction = pipeline.predict(&record).unwrap();
/// assert!((0.0..=1.0).contains(&prediction.probability));
/// ```
#[derive(Clone, Debug)]
pub struct ChurnPipeline {
    schema: AttributeSchema,
    encoders: EncodingTable,
    model: LogitModel,
}

impl ChurnPipeline {
    /// Wire a pipeline from its three parts, cross-validating them.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] when the model's training schema does not
    /// exactly cover the attribute schema, or a categorical field lacks an
    /// encoder.
    pub fn new(
        schema: AttributeSchema,
        encoders: EncodingTable,
        model: LogitModel,
    ) -> Result<Self, SetupError> {
        if model.field_names().len() != schema.n_fields() {
            return Err(SetupError::FieldCountMismatch {
                model: model.field_names().len(),
                schema: schema.n_fields(),
            });
        }
        for field in model.field_names() {
            if schema.field_index(field).is_none() {
                return Err(SetupError::UnknownModelField {
                    field: field.clone(),
                });
            }
        }
        for spec in schema.iter() {
            if !model.field_names().iter().any(|f| f == &spec.name) {
                return Err(SetupError::UncoveredField {
                    field: spec.name.clone(),
                });
            }
        }
        for spec in schema.categorical_fields() {
            if !encoders.contains(&spec.name) {
                return Err(SetupError::MissingEncoder {
                    field: spec.name.clone(),
                });
            }
        }

        Ok(Self {
            schema,
            encoders,
            model,
        })
    }

    /// Wire a pipeline from the two persisted bundles and an attribute
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if either bundle is internally inconsistent
    /// or the parts disagree with each other.
    pub fn from_bundles(
        schema: AttributeSchema,
        model: ModelBundle,
        encoders: EncodersBundle,
    ) -> Result<Self, SetupError> {
        let model = model.into_model()?;
        let encoders = encoders.into_table()?;
        Self::new(schema, encoders, model)
    }

    /// The attribute schema.
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// The encoding table.
    pub fn encoders(&self) -> &EncodingTable {
        &self.encoders
    }

    /// The classifier.
    pub fn model(&self) -> &LogitModel {
        &self.model
    }

    /// Run one record through the pipeline.
    ///
    /// Synchronous single pass; the record is not retained and no state
    /// survives the call.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError`]; no partial result is emitted on failure.
    pub fn predict(&self, record: &RawRecord) -> Result<Prediction, PredictError> {
        let features = assemble(
            &self.schema,
            self.model.field_names(),
            &self.encoders,
            record,
        )?;

        let [_, p_churn] = self.model.predict_proba(features.view())?;
        let label = if p_churn >= 0.5 { LABEL_CHURN } else { LABEL_STAY };

        Ok(Prediction::interpret(label, p_churn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{CategoryEncoder, UnseenPolicy};
    use crate::schema::FieldSpec;
    use ndarray::array;

    fn small_schema() -> AttributeSchema {
        AttributeSchema::from_fields(vec![
            FieldSpec::categorical("Contract"),
            FieldSpec::numeric_capped("tenure", 0.0, 100.0),
        ])
    }

    fn small_table() -> EncodingTable {
        EncodingTable::new(UnseenPolicy::FallbackToDefault).with_encoder(
            "Contract",
            CategoryEncoder::from_categories(&["Month-to-month", "One year", "Two year"]).unwrap(),
        )
    }

    fn small_model() -> LogitModel {
        // margin = -0.8 * contract - 0.04 * tenure + 1.0
        let weights = array![[-0.8], [-0.04], [1.0]];
        LogitModel::from_parts(weights, vec!["Contract".into(), "tenure".into()]).unwrap()
    }

    #[test]
    fn wires_and_predicts() {
        let pipeline = ChurnPipeline::new(small_schema(), small_table(), small_model()).unwrap();
        let record = RawRecord::new()
            .with("Contract", "Month-to-month")
            .with("tenure", 1i64);

        let prediction = pipeline.predict(&record).unwrap();
        // margin = 1.0 - 0.04 = 0.96 → churn.
        assert_eq!(prediction.verdict.as_str(), "churn");
        assert!(prediction.probability > 0.5);
    }

    #[test]
    fn field_count_mismatch() {
        let model = LogitModel::from_parts(array![[0.1], [0.2]], vec!["Contract".into()]).unwrap();
        let err = ChurnPipeline::new(small_schema(), small_table(), model).unwrap_err();
        assert_eq!(err, SetupError::FieldCountMismatch { model: 1, schema: 2 });
    }

    #[test]
    fn unknown_model_field() {
        let model = LogitModel::from_parts(
            array![[0.1], [0.2], [0.3]],
            vec!["Contract".into(), "Churn".into()],
        )
        .unwrap();
        let err = ChurnPipeline::new(small_schema(), small_table(), model).unwrap_err();
        assert_eq!(
            err,
            SetupError::UnknownModelField {
                field: "Churn".into()
            }
        );
    }

    #[test]
    fn missing_encoder_detected_at_startup() {
        let empty = EncodingTable::new(UnseenPolicy::FallbackToDefault);
        let err = ChurnPipeline::new(small_schema(), empty, small_model()).unwrap_err();
        assert_eq!(
            err,
            SetupError::MissingEncoder {
                field: "Contract".into()
            }
        );
    }

    #[test]
    fn predict_error_classification() {
        let pipeline = ChurnPipeline::new(small_schema(), small_table(), small_model()).unwrap();

        let err = pipeline.predict(&RawRecord::new()).unwrap_err();
        assert!(matches!(
            err,
            PredictError::Assemble(AssembleError::MissingField { .. })
        ));
        assert!(!err.is_schema_defect());
    }
}
