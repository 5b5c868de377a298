//! Attribute schema definitions.
//!
//! This module describes the fields a customer record carries: their names,
//! their order, and the domain each value must fall in. The schema is the
//! contract between the form-collecting host and the inference pipeline.

use std::collections::HashMap;

/// Domain of a single attribute field.
///
/// Values are carried as strings or numbers by the raw record and end up as
/// `f32` in the feature vector. The kind decides how a raw value is checked
/// and converted during assembly.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    /// Categorical string field, encoded to its position in a per-field
    /// vocabulary (see [`CategoryEncoder`](crate::encoding::CategoryEncoder)).
    Categorical,

    /// Integer-coded flag, restricted to exactly 0 or 1.
    Binary,

    /// Bounded numeric field. `max` of `None` means unbounded above.
    Numeric {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound, if any.
        max: Option<f64>,
    },
}

impl FieldKind {
    /// Returns true if this is a categorical field.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, FieldKind::Categorical)
    }
}

/// Name and domain of one attribute field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// Field name as it appears in raw records and encoder bundles.
    pub name: String,
    /// Field domain.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Declare a categorical field.
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Categorical,
        }
    }

    /// Declare a 0/1 integer field.
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Binary,
        }
    }

    /// Declare a numeric field with an inclusive lower bound.
    pub fn numeric(name: impl Into<String>, min: f64) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Numeric { min, max: None },
        }
    }

    /// Declare a numeric field with inclusive lower and upper bounds.
    pub fn numeric_capped(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Numeric {
                min,
                max: Some(max),
            },
        }
    }
}

/// Ordered set of attribute fields with name lookup.
///
/// The schema is immutable once constructed and shared by reference for the
/// process lifetime; the name index is built at construction.
///
/// # Example
///
/// ```
/// use churncast::schema::AttributeSchema;
///
/// let schema = AttributeSchema::telecom();
/// assert_eq!(schema.n_fields(), 19);
/// assert_eq!(schema.field_index("Contract"), Some(14));
/// ```
#[derive(Clone, Debug)]
pub struct AttributeSchema {
    fields: Vec<FieldSpec>,
    name_index: HashMap<String, usize>,
}

impl AttributeSchema {
    /// Create a schema from an ordered list of field specs.
    pub fn from_fields(fields: Vec<FieldSpec>) -> Self {
        let name_index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self { fields, name_index }
    }

    /// The 19-field telecom customer schema.
    ///
    /// Field order matches the training layout: demographics first, then
    /// tenure and service flags, then contract/billing, then charges.
    /// Tenure is capped at 100 months; charges are non-negative.
    pub fn telecom() -> Self {
        Self::from_fields(vec![
            FieldSpec::categorical("gender"),
            FieldSpec::binary("SeniorCitizen"),
            FieldSpec::categorical("Partner"),
            FieldSpec::categorical("Dependents"),
            FieldSpec::numeric_capped("tenure", 0.0, 100.0),
            FieldSpec::categorical("PhoneService"),
            FieldSpec::categorical("MultipleLines"),
            FieldSpec::categorical("InternetService"),
            FieldSpec::categorical("OnlineSecurity"),
            FieldSpec::categorical("OnlineBackup"),
            FieldSpec::categorical("DeviceProtection"),
            FieldSpec::categorical("TechSupport"),
            FieldSpec::categorical("StreamingTV"),
            FieldSpec::categorical("StreamingMovies"),
            FieldSpec::categorical("Contract"),
            FieldSpec::categorical("PaperlessBilling"),
            FieldSpec::categorical("PaymentMethod"),
            FieldSpec::numeric("MonthlyCharges", 0.0),
            FieldSpec::numeric("TotalCharges", 0.0),
        ])
    }

    /// Number of fields in the schema.
    #[inline]
    pub fn n_fields(&self) -> usize {
        self.fields.len()
    }

    /// Get a field spec by index.
    pub fn get(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    /// Get a field's index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Get a field spec by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.field_index(name).and_then(|i| self.fields.get(i))
    }

    /// Iterate over fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Iterate over the categorical fields only.
    pub fn categorical_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.kind.is_categorical())
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telecom_has_19_fields() {
        let schema = AttributeSchema::telecom();
        assert_eq!(schema.n_fields(), 19);
    }

    #[test]
    fn telecom_field_order() {
        let schema = AttributeSchema::telecom();
        assert_eq!(schema.get(0).unwrap().name, "gender");
        assert_eq!(schema.get(4).unwrap().name, "tenure");
        assert_eq!(schema.get(18).unwrap().name, "TotalCharges");
    }

    #[test]
    fn telecom_field_kinds() {
        let schema = AttributeSchema::telecom();
        assert!(schema.field("Contract").unwrap().kind.is_categorical());
        assert_eq!(schema.field("SeniorCitizen").unwrap().kind, FieldKind::Binary);
        assert_eq!(
            schema.field("tenure").unwrap().kind,
            FieldKind::Numeric {
                min: 0.0,
                max: Some(100.0)
            }
        );
        assert_eq!(
            schema.field("MonthlyCharges").unwrap().kind,
            FieldKind::Numeric {
                min: 0.0,
                max: None
            }
        );
    }

    #[test]
    fn field_index_lookup() {
        let schema = AttributeSchema::telecom();
        assert_eq!(schema.field_index("gender"), Some(0));
        assert_eq!(schema.field_index("PaymentMethod"), Some(16));
        assert_eq!(schema.field_index("nope"), None);
    }

    #[test]
    fn categorical_fields_count() {
        let schema = AttributeSchema::telecom();
        // 19 fields minus SeniorCitizen, tenure, MonthlyCharges, TotalCharges.
        assert_eq!(schema.categorical_fields().count(), 15);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn schema_is_send_sync() {
        assert_send_sync::<AttributeSchema>();
    }
}
