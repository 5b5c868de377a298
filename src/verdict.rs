//! Result interpretation.
//!
//! Maps the classifier's (label, probability) pair to the human-facing
//! verdict payload. Pure functions, no side effects, no I/O.

use serde::{Deserialize, Serialize};

use crate::model::LABEL_CHURN;

/// Two-way verdict on a customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The customer is predicted to end the service relationship.
    Churn,
    /// The customer is predicted to keep the service relationship.
    Stay,
}

impl Verdict {
    /// Map a discrete classifier label (0 = stay, 1 = churn).
    pub fn from_label(label: u8) -> Self {
        if label == LABEL_CHURN {
            Verdict::Churn
        } else {
            Verdict::Stay
        }
    }

    /// The verdict tag: `"churn"` or `"stay"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Churn => "churn",
            Verdict::Stay => "stay",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The display payload for one prediction.
///
/// Carries the verdict, the churn probability in `[0, 1]`, and a
/// percent-formatting hint for the display layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Two-way verdict.
    pub verdict: Verdict,
    /// Estimated churn likelihood in `[0, 1]`.
    pub probability: f32,
    /// Suggested decimal places when rendering the probability as a
    /// percentage.
    pub percent_decimals: u8,
}

impl Prediction {
    /// Interpret a classifier (label, churn-probability) pair.
    pub fn interpret(label: u8, probability: f32) -> Self {
        Self {
            verdict: Verdict::from_label(label),
            probability,
            percent_decimals: 0,
        }
    }

    /// Override the percent-formatting hint.
    pub fn with_percent_decimals(mut self, decimals: u8) -> Self {
        self.percent_decimals = decimals;
        self
    }

    /// The probability rendered as a percentage, e.g. `"74%"`.
    pub fn percent(&self) -> String {
        format!(
            "{:.*}%",
            self.percent_decimals as usize,
            f64::from(self.probability) * 100.0
        )
    }

    /// A one-line human summary of the verdict.
    pub fn summary(&self) -> String {
        match self.verdict {
            Verdict::Churn => format!("Customer is likely to churn ({})", self.percent()),
            Verdict::Stay => {
                format!("Customer will likely stay (churn probability {})", self.percent())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LABEL_CHURN, LABEL_STAY};

    #[test]
    fn verdict_from_label() {
        assert_eq!(Verdict::from_label(LABEL_CHURN), Verdict::Churn);
        assert_eq!(Verdict::from_label(LABEL_STAY), Verdict::Stay);
    }

    #[test]
    fn verdict_tags() {
        assert_eq!(Verdict::Churn.as_str(), "churn");
        assert_eq!(Verdict::Stay.as_str(), "stay");
        assert_eq!(Verdict::Churn.to_string(), "churn");
    }

    #[test]
    fn percent_rounding() {
        let p = Prediction::interpret(LABEL_CHURN, 0.736);
        assert_eq!(p.percent(), "74%");

        let p = p.with_percent_decimals(1);
        assert_eq!(p.percent(), "73.6%");
    }

    #[test]
    fn summary_wording() {
        let churn = Prediction::interpret(LABEL_CHURN, 0.9);
        assert_eq!(churn.summary(), "Customer is likely to churn (90%)");

        let stay = Prediction::interpret(LABEL_STAY, 0.1);
        assert_eq!(
            stay.summary(),
            "Customer will likely stay (churn probability 10%)"
        );
    }

    #[test]
    fn serde_shape() {
        let p = Prediction::interpret(LABEL_CHURN, 0.5);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["verdict"], "churn");
        assert_eq!(json["percent_decimals"], 0);
    }
}
