//! Deterministic stand-ins for tests, benchmarks, and examples.
//!
//! Everything here is generated in code so tests never depend on fixture
//! files: the telecom vocabularies, a hand-weighted demo classifier, and a
//! fully-populated demo record.

use ndarray::Array2;

use crate::encoding::{CategoryEncoder, EncodingTable, UnseenPolicy};
use crate::model::LogitModel;
use crate::pipeline::ChurnPipeline;
use crate::record::RawRecord;
use crate::schema::AttributeSchema;

/// The telecom vocabularies in fitted label-encoder order (sorted class
/// lists), one per categorical field.
pub fn telecom_vocabularies() -> Vec<(&'static str, Vec<&'static str>)> {
    let yes_no = vec!["No", "Yes"];
    let internet_service_flag = vec!["No", "No internet service", "Yes"];
    vec![
        ("gender", vec!["Female", "Male"]),
        ("Partner", yes_no.clone()),
        ("Dependents", yes_no.clone()),
        ("PhoneService", yes_no.clone()),
        ("MultipleLines", vec!["No", "No phone service", "Yes"]),
        ("InternetService", vec!["DSL", "Fiber optic", "No"]),
        ("OnlineSecurity", internet_service_flag.clone()),
        ("OnlineBackup", internet_service_flag.clone()),
        ("DeviceProtection", internet_service_flag.clone()),
        ("TechSupport", internet_service_flag.clone()),
        ("StreamingTV", internet_service_flag.clone()),
        ("StreamingMovies", internet_service_flag),
        ("Contract", vec!["Month-to-month", "One year", "Two year"]),
        ("PaperlessBilling", yes_no),
        (
            "PaymentMethod",
            vec![
                "Bank transfer (automatic)",
                "Credit card (automatic)",
                "Electronic check",
                "Mailed check",
            ],
        ),
    ]
}

/// An encoding table covering every categorical telecom field.
pub fn demo_encoders(policy: UnseenPolicy) -> EncodingTable {
    let mut table = EncodingTable::new(policy);
    for (field, vocabulary) in telecom_vocabularies() {
        let encoder = CategoryEncoder::from_categories(&vocabulary)
            .unwrap_or_else(|e| panic!("invalid telecom vocabulary for {field}: {e}"));
        table.insert(field, encoder);
    }
    table
}

/// A hand-weighted demo classifier over the telecom schema.
///
/// Sparse, plausible weights: churn pressure from high monthly charges,
/// retention pull from tenure, accumulated spend, and longer contracts.
/// With these weights a new month-to-month customer at 70 $/month lands
/// around 74% churn, while a 72-month two-year customer lands near 1%.
pub fn demo_model() -> LogitModel {
    let schema = AttributeSchema::telecom();
    let mut weights = vec![0.0f32; schema.n_fields() + 1];

    let mut set = |field: &str, w: f32| {
        let idx = schema
            .field_index(field)
            .unwrap_or_else(|| panic!("telecom schema has field {field}"));
        weights[idx] = w;
    };
    set("tenure", -0.04);
    set("Contract", -0.8);
    set("MonthlyCharges", 0.02);
    set("TotalCharges", -0.0002);
    let bias_idx = weights.len() - 1;
    weights[bias_idx] = -0.3;

    let n = weights.len();
    let weights = Array2::from_shape_vec((n, 1), weights).expect("column vector shape");
    let field_names = schema.field_names().iter().map(|s| (*s).to_owned()).collect();
    LogitModel::from_parts(weights, field_names).expect("demo weights match the schema")
}

/// A fully-populated record: a new month-to-month customer.
pub fn demo_record() -> RawRecord {
    RawRecord::new()
        .with("gender", "Female")
        .with("SeniorCitizen", 0i64)
        .with("Partner", "Yes")
        .with("Dependents", "No")
        .with("tenure", 1i64)
        .with("PhoneService", "Yes")
        .with("MultipleLines", "No")
        .with("InternetService", "DSL")
        .with("OnlineSecurity", "No")
        .with("OnlineBackup", "No")
        .with("DeviceProtection", "No")
        .with("TechSupport", "No")
        .with("StreamingTV", "No")
        .with("StreamingMovies", "No")
        .with("Contract", "Month-to-month")
        .with("PaperlessBilling", "Yes")
        .with("PaymentMethod", "Electronic check")
        .with("MonthlyCharges", 70.0)
        .with("TotalCharges", 70.0)
}

/// A ready-to-use pipeline: telecom schema, demo encoders with silent
/// correction, demo model.
pub fn demo_pipeline() -> ChurnPipeline {
    ChurnPipeline::new(
        AttributeSchema::telecom(),
        demo_encoders(UnseenPolicy::FallbackToDefault),
        demo_model(),
    )
    .expect("demo parts agree with each other")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabularies_cover_all_categorical_fields() {
        let schema = AttributeSchema::telecom();
        let table = demo_encoders(UnseenPolicy::FallbackToDefault);
        for spec in schema.categorical_fields() {
            assert!(
                table.contains(&spec.name),
                "missing encoder for {}",
                spec.name
            );
        }
        assert_eq!(table.len(), schema.categorical_fields().count());
    }

    #[test]
    fn demo_model_matches_schema() {
        let model = demo_model();
        assert_eq!(model.n_features(), 19);
        assert_eq!(model.field_names()[0], "gender");
    }

    #[test]
    fn demo_record_is_complete() {
        let schema = AttributeSchema::telecom();
        let record = demo_record();
        for spec in schema.iter() {
            assert!(record.contains(&spec.name), "missing {}", spec.name);
        }
    }

    #[test]
    fn demo_pipeline_wires() {
        let pipeline = demo_pipeline();
        assert_eq!(pipeline.model().n_features(), 19);
    }
}
