//! Per-field categorical encoder.

use thiserror::Error;

/// Errors raised when constructing a [`CategoryEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    /// The vocabulary has no categories.
    #[error("vocabulary must contain at least one category")]
    Empty,

    /// The vocabulary lists the same category twice.
    #[error("duplicate category `{category}` in vocabulary")]
    Duplicate {
        /// The repeated category.
        category: String,
    },
}

/// Deterministic string → integer encoder for one categorical field.
///
/// Owns an ordered vocabulary; a value encodes to its position in that
/// order. The first element is the designated default used by the
/// fallback policy for unseen values. Encoding is a pure function of
/// (vocabulary, value) with no side effects.
///
/// # Example
///
/// ```
/// use churncast::encoding::CategoryEncoder;
///
/// let encoder = CategoryEncoder::new(vec![
///     "Month-to-month".into(),
///     "One year".into(),
///     "Two year".into(),
/// ])
/// .unwrap();
///
/// assert_eq!(encoder.encode("One year"), Some(1));
/// assert_eq!(encoder.decode(2), Some("Two year"));
/// assert_eq!(encoder.default_category(), "Month-to-month");
/// assert_eq!(encoder.encode("Weekly"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryEncoder {
    vocabulary: Vec<String>,
}

impl CategoryEncoder {
    /// Create an encoder from an ordered vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError`] if the vocabulary is empty or contains
    /// duplicates.
    pub fn new(vocabulary: Vec<String>) -> Result<Self, VocabularyError> {
        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty);
        }
        for (i, category) in vocabulary.iter().enumerate() {
            if vocabulary[..i].contains(category) {
                return Err(VocabularyError::Duplicate {
                    category: category.clone(),
                });
            }
        }
        Ok(Self { vocabulary })
    }

    /// Convenience constructor from string slices.
    pub fn from_categories(categories: &[&str]) -> Result<Self, VocabularyError> {
        Self::new(categories.iter().map(|s| (*s).to_owned()).collect())
    }

    /// Encode a value to its vocabulary position.
    ///
    /// Returns `None` for values outside the vocabulary; unseen-value
    /// policy is applied by the [`EncodingTable`](super::EncodingTable),
    /// not here.
    pub fn encode(&self, value: &str) -> Option<usize> {
        self.vocabulary.iter().position(|c| c == value)
    }

    /// Encode with silent correction: unseen values map to the default
    /// (first) category, i.e. code 0.
    pub fn encode_or_default(&self, value: &str) -> usize {
        self.encode(value).unwrap_or(0)
    }

    /// Inverse lookup by position.
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.vocabulary.get(code).map(String::as_str)
    }

    /// The designated default category (first element).
    pub fn default_category(&self) -> &str {
        &self.vocabulary[0]
    }

    /// True if the value is a member of the vocabulary.
    pub fn contains(&self, value: &str) -> bool {
        self.encode(value).is_some()
    }

    /// Number of categories.
    pub fn n_categories(&self) -> usize {
        self.vocabulary.len()
    }

    /// The ordered vocabulary.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}
