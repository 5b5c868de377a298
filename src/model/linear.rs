//! Logistic classifier over assembled feature vectors.

use ndarray::{s, Array2, ArrayView1};
use thiserror::Error;

/// Errors raised when constructing a [`LogitModel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelShapeError {
    /// Weight matrix rows must equal `field_names.len() + 1` (bias row).
    #[error("weight matrix has {rows} rows for {fields} fields (expected one row per field plus bias)")]
    WeightRowMismatch {
        /// Rows in the weight matrix.
        rows: usize,
        /// Declared training fields.
        fields: usize,
    },

    /// Binary classification uses a single output column.
    #[error("weight matrix has {cols} columns, expected 1")]
    WeightColMismatch {
        /// Columns in the weight matrix.
        cols: usize,
    },

    /// A field name appears twice in the training schema.
    #[error("duplicate field `{field}` in training schema")]
    DuplicateField {
        /// The repeated field name.
        field: String,
    },
}

/// Errors raised by prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// The feature vector length disagrees with the trained weight count.
    #[error("feature vector has {got} entries, model expects {expected}")]
    ShapeMismatch {
        /// Features the model was trained on.
        expected: usize,
        /// Features supplied.
        got: usize,
    },
}

/// Label for the stay class.
pub const LABEL_STAY: u8 = 0;
/// Label for the churn class.
pub const LABEL_CHURN: u8 = 1;

/// Pre-trained binary logistic classifier.
///
/// Weights are stored as an `Array2<f32>` with shape `[n_features + 1, 1]`;
/// the last row is the bias. The model also carries the ordered field names
/// it was trained against; the feature assembler must reproduce that order
/// exactly.
///
/// The model is immutable after construction and safe to share across
/// threads for the process lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct LogitModel {
    /// Shape `[n_features + 1, 1]`, bias in the last row.
    weights: Array2<f32>,
    /// Training field order.
    field_names: Vec<String>,
}

impl LogitModel {
    /// Create a model from a weight matrix and its training field order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelShapeError`] if the matrix shape disagrees with the
    /// field list or a field name repeats.
    pub fn from_parts(
        weights: Array2<f32>,
        field_names: Vec<String>,
    ) -> Result<Self, ModelShapeError> {
        if weights.ncols() != 1 {
            return Err(ModelShapeError::WeightColMismatch {
                cols: weights.ncols(),
            });
        }
        if weights.nrows() != field_names.len() + 1 {
            return Err(ModelShapeError::WeightRowMismatch {
                rows: weights.nrows(),
                fields: field_names.len(),
            });
        }
        for (i, field) in field_names.iter().enumerate() {
            if field_names[..i].contains(field) {
                return Err(ModelShapeError::DuplicateField {
                    field: field.clone(),
                });
            }
        }
        Ok(Self {
            weights,
            field_names,
        })
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.nrows() - 1
    }

    /// The training field order the assembler must match.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Coefficient for a feature.
    #[inline]
    pub fn weight(&self, feature: usize) -> f32 {
        self.weights[[feature, 0]]
    }

    /// The bias term.
    #[inline]
    pub fn bias(&self) -> f32 {
        self.weights[[self.n_features(), 0]]
    }

    /// The underlying weight matrix (for serialization).
    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    /// Raw margin for one feature vector: `w · x + b`.
    pub fn predict_margin(&self, features: ArrayView1<'_, f32>) -> Result<f32, InferenceError> {
        if features.len() != self.n_features() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.n_features(),
                got: features.len(),
            });
        }
        let coefficients = self.weights.slice(s![..self.n_features(), 0]);
        Ok(features.dot(&coefficients) + self.bias())
    }

    /// Class probabilities `[p_stay, p_churn]` for one feature vector.
    ///
    /// The churn probability is the sigmoid of the margin; both entries sum
    /// to 1 and lie in `[0, 1]`.
    pub fn predict_proba(
        &self,
        features: ArrayView1<'_, f32>,
    ) -> Result<[f32; 2], InferenceError> {
        let p_churn = sigmoid(self.predict_margin(features)?);
        Ok([1.0 - p_churn, p_churn])
    }

    /// Discrete label for one feature vector: [`LABEL_CHURN`] when the
    /// churn probability reaches 0.5, else [`LABEL_STAY`].
    pub fn predict(&self, features: ArrayView1<'_, f32>) -> Result<u8, InferenceError> {
        let [_, p_churn] = self.predict_proba(features)?;
        Ok(if p_churn >= 0.5 { LABEL_CHURN } else { LABEL_STAY })
    }
}

/// Numerically stable sigmoid.
/// Clamps input to [-500, 500] to prevent overflow in `exp`.
#[inline]
fn sigmoid(x: f32) -> f32 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn two_feature_model() -> LogitModel {
        // margin = 0.5 * x0 + 0.3 * x1 + 0.1
        let weights = array![[0.5], [0.3], [0.1]];
        LogitModel::from_parts(weights, vec!["a".into(), "b".into()]).unwrap()
    }

    #[test]
    fn margin_is_dot_plus_bias() {
        let model = two_feature_model();
        let x = array![2.0, 3.0]; // 1.0 + 0.9 + 0.1 = 2.0
        assert_abs_diff_eq!(model.predict_margin(x.view()).unwrap(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn proba_pair_sums_to_one() {
        let model = two_feature_model();
        let x = array![2.0, 3.0];
        let [p_stay, p_churn] = model.predict_proba(x.view()).unwrap();
        assert_abs_diff_eq!(p_stay + p_churn, 1.0, epsilon = 1e-6);
        assert!((0.0..=1.0).contains(&p_churn));
        // Margin 2.0 → sigmoid ≈ 0.8808.
        assert_abs_diff_eq!(p_churn, 0.880797, epsilon = 1e-5);
    }

    #[test]
    fn zero_margin_is_half() {
        let weights = array![[0.0], [0.0]];
        let model = LogitModel::from_parts(weights, vec!["a".into()]).unwrap();
        let [p_stay, p_churn] = model.predict_proba(array![42.0].view()).unwrap();
        assert_abs_diff_eq!(p_churn, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(p_stay, 0.5, epsilon = 1e-6);
        // Ties break toward churn at the 0.5 threshold.
        assert_eq!(model.predict(array![42.0].view()).unwrap(), LABEL_CHURN);
    }

    #[test]
    fn label_threshold() {
        let model = two_feature_model();
        assert_eq!(model.predict(array![2.0, 3.0].view()).unwrap(), LABEL_CHURN);
        assert_eq!(
            model.predict(array![-4.0, -4.0].view()).unwrap(),
            LABEL_STAY
        );
    }

    #[test]
    fn extreme_margins_stay_in_range() {
        let weights = array![[1000.0], [0.0]];
        let model = LogitModel::from_parts(weights, vec!["a".into()]).unwrap();
        let [_, hi] = model.predict_proba(array![1000.0].view()).unwrap();
        let [_, lo] = model.predict_proba(array![-1000.0].view()).unwrap();
        assert!(hi > 0.999 && hi <= 1.0);
        assert!(lo < 0.001 && lo >= 0.0);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let model = two_feature_model();
        let err = model.predict_margin(array![1.0].view()).unwrap_err();
        assert_eq!(
            err,
            InferenceError::ShapeMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn constructor_validates_shape() {
        let err = LogitModel::from_parts(array![[0.1], [0.2]], vec!["a".into(), "b".into()])
            .unwrap_err();
        assert_eq!(
            err,
            ModelShapeError::WeightRowMismatch { rows: 2, fields: 2 }
        );

        let err =
            LogitModel::from_parts(array![[0.1, 0.2], [0.3, 0.4]], vec!["a".into()]).unwrap_err();
        assert_eq!(err, ModelShapeError::WeightColMismatch { cols: 2 });

        let err = LogitModel::from_parts(
            array![[0.1], [0.2], [0.3]],
            vec!["a".into(), "a".into()],
        )
        .unwrap_err();
        assert_eq!(err, ModelShapeError::DuplicateField { field: "a".into() });
    }

    #[test]
    fn determinism() {
        let model = two_feature_model();
        let x = array![0.7, -1.3];
        let first = model.predict_proba(x.view()).unwrap();
        for _ in 0..10 {
            assert_eq!(model.predict_proba(x.view()).unwrap(), first);
        }
    }
}
