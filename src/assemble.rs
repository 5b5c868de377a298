//! Feature assembly.
//!
//! Turns one raw record into the single-row, fully numeric feature vector
//! the classifier expects: every categorical value encoded through the
//! table, every numeric value checked against its declared domain, and the
//! output ordered by the model's training schema regardless of how the
//! record was populated.

use ndarray::Array1;
use thiserror::Error;

use crate::encoding::{EncodeError, EncodingTable};
use crate::record::{RawRecord, RawValue};
use crate::schema::{AttributeSchema, FieldKind};

/// Errors raised while assembling a feature vector.
///
/// `MissingField` and the value errors are per-request conditions; a
/// `SchemaMismatch` means the loaded model, schema, and encoders disagree
/// and indicates a startup configuration defect rather than bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssembleError {
    /// The record lacks a field the schema requires.
    #[error("record is missing required field `{field}`")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// The model, attribute schema, or encoding table disagree about a
    /// field. Not a per-request user error.
    #[error("schema mismatch on field `{field}`: {detail}")]
    SchemaMismatch {
        /// Field name.
        field: String,
        /// What disagreed.
        detail: String,
    },

    /// A categorical value was rejected by the encoding table's policy.
    #[error("value `{value}` is not in the vocabulary of field `{field}`")]
    UnknownCategory {
        /// Field name.
        field: String,
        /// The offending value.
        value: String,
    },

    /// The record carries the wrong value type for a field.
    #[error("field `{field}` expects a {expected} value")]
    WrongValueType {
        /// Field name.
        field: String,
        /// `"string"` or `"numeric"`.
        expected: &'static str,
    },

    /// A numeric value is NaN or infinite.
    #[error("field `{field}` must be a finite number")]
    NotFinite {
        /// Field name.
        field: String,
    },

    /// A numeric value falls outside the field's declared domain.
    #[error("field `{field}` value {value} is outside the allowed range")]
    OutOfRange {
        /// Field name.
        field: String,
        /// The offending value.
        value: f64,
    },

    /// A binary field carries something other than 0 or 1.
    #[error("field `{field}` must be 0 or 1, got {value}")]
    NotBinary {
        /// Field name.
        field: String,
        /// The offending value.
        value: f64,
    },
}

/// Assemble the feature vector for one record.
///
/// `field_order` is the classifier's declared training schema; the output
/// vector has one entry per name in that order. Every name must resolve in
/// `schema`, every categorical field must have an encoder in `table`, and
/// the record must carry a domain-valid value for each field. No partial
/// vector is ever produced.
///
/// # Errors
///
/// See [`AssembleError`].
pub fn assemble(
    schema: &AttributeSchema,
    field_order: &[String],
    table: &EncodingTable,
    record: &RawRecord,
) -> Result<Array1<f32>, AssembleError> {
    let mut features = Vec::with_capacity(field_order.len());

    for name in field_order {
        let spec = schema
            .field(name)
            .ok_or_else(|| AssembleError::SchemaMismatch {
                field: name.clone(),
                detail: "model references a field the attribute schema does not declare".into(),
            })?;

        let value = record.get(name).ok_or_else(|| AssembleError::MissingField {
            field: name.clone(),
        })?;

        features.push(assemble_one(name, &spec.kind, table, value)?);
    }

    Ok(Array1::from_vec(features))
}

fn assemble_one(
    field: &str,
    kind: &FieldKind,
    table: &EncodingTable,
    value: &RawValue,
) -> Result<f32, AssembleError> {
    match kind {
        FieldKind::Categorical => {
            let text = value
                .as_text()
                .ok_or_else(|| AssembleError::WrongValueType {
                    field: field.to_owned(),
                    expected: "string",
                })?;
            let code = table.encode(field, text).map_err(|e| match e {
                EncodeError::MissingEncoder { field } => AssembleError::SchemaMismatch {
                    field,
                    detail: "no encoder registered for categorical field".into(),
                },
                EncodeError::UnknownCategory { field, value } => {
                    AssembleError::UnknownCategory { field, value }
                }
            })?;
            Ok(code as f32)
        }
        FieldKind::Binary => {
            let n = checked_number(field, value)?;
            if n != 0.0 && n != 1.0 {
                return Err(AssembleError::NotBinary {
                    field: field.to_owned(),
                    value: n,
                });
            }
            Ok(n as f32)
        }
        FieldKind::Numeric { min, max } => {
            let n = checked_number(field, value)?;
            if n < *min || max.is_some_and(|max| n > max) {
                return Err(AssembleError::OutOfRange {
                    field: field.to_owned(),
                    value: n,
                });
            }
            Ok(n as f32)
        }
    }
}

fn checked_number(field: &str, value: &RawValue) -> Result<f64, AssembleError> {
    let n = value
        .as_number()
        .ok_or_else(|| AssembleError::WrongValueType {
            field: field.to_owned(),
            expected: "numeric",
        })?;
    if !n.is_finite() {
        return Err(AssembleError::NotFinite {
            field: field.to_owned(),
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{CategoryEncoder, UnseenPolicy};
    use crate::schema::FieldSpec;

    fn schema() -> AttributeSchema {
        AttributeSchema::from_fields(vec![
            FieldSpec::categorical("Contract"),
            FieldSpec::binary("SeniorCitizen"),
            FieldSpec::numeric_capped("tenure", 0.0, 100.0),
        ])
    }

    fn table(policy: UnseenPolicy) -> EncodingTable {
        EncodingTable::new(policy).with_encoder(
            "Contract",
            CategoryEncoder::from_categories(&["Month-to-month", "One year", "Two year"]).unwrap(),
        )
    }

    fn record() -> RawRecord {
        RawRecord::new()
            .with("Contract", "One year")
            .with("SeniorCitizen", 1i64)
            .with("tenure", 24i64)
    }

    fn order() -> Vec<String> {
        vec!["Contract".into(), "SeniorCitizen".into(), "tenure".into()]
    }

    #[test]
    fn assembles_in_model_order() {
        let vector = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &record())
            .unwrap();
        assert_eq!(vector.to_vec(), vec![1.0, 1.0, 24.0]);
    }

    #[test]
    fn model_order_wins_over_record_population_order() {
        // Same fields inserted in reverse; output must not change.
        let reversed = RawRecord::new()
            .with("tenure", 24i64)
            .with("SeniorCitizen", 1i64)
            .with("Contract", "One year");
        let a = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &record()).unwrap();
        let b = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &reversed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_field() {
        let mut r = record();
        r.remove("tenure");
        let err = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &r).unwrap_err();
        assert_eq!(
            err,
            AssembleError::MissingField {
                field: "tenure".into()
            }
        );
    }

    #[test]
    fn unknown_model_field_is_schema_mismatch() {
        let order = vec!["Contract".into(), "Churn".into()];
        let err =
            assemble(&schema(), &order, &table(UnseenPolicy::default()), &record()).unwrap_err();
        assert!(matches!(err, AssembleError::SchemaMismatch { field, .. } if field == "Churn"));
    }

    #[test]
    fn missing_encoder_is_schema_mismatch() {
        let empty = EncodingTable::new(UnseenPolicy::default());
        let err = assemble(&schema(), &order(), &empty, &record()).unwrap_err();
        assert!(matches!(err, AssembleError::SchemaMismatch { field, .. } if field == "Contract"));
    }

    #[test]
    fn unseen_category_under_each_policy() {
        let mut r = record();
        r.insert("Contract", "Weekly");

        // Silent correction: encodes as the default category (code 0).
        let vector =
            assemble(&schema(), &order(), &table(UnseenPolicy::FallbackToDefault), &r).unwrap();
        assert_eq!(vector[0], 0.0);

        // Reject: surfaces the condition.
        let err = assemble(&schema(), &order(), &table(UnseenPolicy::Reject), &r).unwrap_err();
        assert_eq!(
            err,
            AssembleError::UnknownCategory {
                field: "Contract".into(),
                value: "Weekly".into(),
            }
        );
    }

    #[test]
    fn wrong_value_types() {
        let mut r = record();
        r.insert("Contract", 3i64);
        let err = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &r).unwrap_err();
        assert_eq!(
            err,
            AssembleError::WrongValueType {
                field: "Contract".into(),
                expected: "string",
            }
        );

        let mut r = record();
        r.insert("tenure", "a year");
        let err = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &r).unwrap_err();
        assert_eq!(
            err,
            AssembleError::WrongValueType {
                field: "tenure".into(),
                expected: "numeric",
            }
        );
    }

    #[test]
    fn numeric_bounds() {
        for (tenure, ok) in [(0.0, true), (100.0, true), (100.5, false), (-1.0, false)] {
            let mut r = record();
            r.insert("tenure", tenure);
            let result = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &r);
            if ok {
                assert!(result.is_ok(), "tenure {tenure} should be accepted");
            } else {
                assert!(
                    matches!(result, Err(AssembleError::OutOfRange { .. })),
                    "tenure {tenure} should be out of range"
                );
            }
        }
    }

    #[test]
    fn non_finite_rejected() {
        let mut r = record();
        r.insert("tenure", f64::NAN);
        let err = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &r).unwrap_err();
        assert_eq!(
            err,
            AssembleError::NotFinite {
                field: "tenure".into()
            }
        );
    }

    #[test]
    fn binary_must_be_zero_or_one() {
        let mut r = record();
        r.insert("SeniorCitizen", 2i64);
        let err = assemble(&schema(), &order(), &table(UnseenPolicy::default()), &r).unwrap_err();
        assert_eq!(
            err,
            AssembleError::NotBinary {
                field: "SeniorCitizen".into(),
                value: 2.0,
            }
        );
    }
}
