//! Output transformation for inference.
//!
//! The [`OutputTransform`] enum defines how the raw ensemble margin is mapped
//! to the final prediction. It is emitted alongside the model constants so
//! that prediction does not need the training objective.
//!
//! # Variants
//!
//! - [`Identity`](OutputTransform::Identity): No transformation (regression, raw margins)
//! - [`Sigmoid`](OutputTransform::Sigmoid): Logistic sigmoid for binary classification

use std::fmt;
use std::str::FromStr;

/// Inference-time output transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputTransform {
    /// No transformation; output = margin.
    #[default]
    Identity,

    /// Logistic sigmoid: output = 1 / (1 + exp(-margin)).
    Sigmoid,
}

impl OutputTransform {
    /// Map a margin to a prediction.
    ///
    /// The sigmoid is evaluated exactly as `1.0 / (1.0 + exp(-margin))`
    /// without clamping, so results match the exported formula bit for bit.
    /// NaN propagates; infinite margins saturate to 0 or 1.
    #[inline]
    pub fn apply(self, margin: f64) -> f64 {
        match self {
            OutputTransform::Identity => margin,
            OutputTransform::Sigmoid => sigmoid(margin),
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            OutputTransform::Identity => "identity",
            OutputTransform::Sigmoid => "sigmoid",
        }
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl fmt::Display for OutputTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown transform name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output transform '{0}' (expected identity or sigmoid)")]
pub struct ParseTransformError(pub String);

impl FromStr for OutputTransform {
    type Err = ParseTransformError;

    /// Accepts the canonical names and the XGBoost objective names that imply them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "none" | "reg:squarederror" | "binary:logitraw" => {
                Ok(OutputTransform::Identity)
            }
            "sigmoid" | "logistic" | "binary:logistic" | "reg:logistic" => {
                Ok(OutputTransform::Sigmoid)
            }
            _ => Err(ParseTransformError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn identity_is_noop() {
        for m in [1.0, -2.0, 3.5, 0.0] {
            assert_eq!(OutputTransform::Identity.apply(m), m);
        }
    }

    #[test]
    fn sigmoid_zero_is_half() {
        assert_eq!(OutputTransform::Sigmoid.apply(0.0), 0.5);
    }

    #[test]
    fn sigmoid_matches_plain_formula() {
        for m in [-3.25_f64, -0.017, 0.4, 12.0] {
            let expected = 1.0 / (1.0 + (-m).exp());
            assert_eq!(OutputTransform::Sigmoid.apply(m).to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn sigmoid_is_symmetric() {
        let p = OutputTransform::Sigmoid.apply(1.3);
        let q = OutputTransform::Sigmoid.apply(-1.3);
        assert_abs_diff_eq!(p + q, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn sigmoid_nan_propagates() {
        assert!(OutputTransform::Sigmoid.apply(f64::NAN).is_nan());
    }

    #[test]
    fn sigmoid_inf_saturates() {
        assert_eq!(OutputTransform::Sigmoid.apply(f64::INFINITY), 1.0);
        assert_eq!(OutputTransform::Sigmoid.apply(f64::NEG_INFINITY), 0.0);
    }

    #[rstest]
    #[case("sigmoid", OutputTransform::Sigmoid)]
    #[case("binary:logistic", OutputTransform::Sigmoid)]
    #[case(" Identity ", OutputTransform::Identity)]
    #[case("binary:logitraw", OutputTransform::Identity)]
    fn parses_names(#[case] name: &str, #[case] expected: OutputTransform) {
        assert_eq!(name.parse::<OutputTransform>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "softmax".parse::<OutputTransform>().unwrap_err();
        assert_eq!(err, ParseTransformError("softmax".to_string()));
    }

    #[test]
    fn display_round_trips() {
        for t in [OutputTransform::Identity, OutputTransform::Sigmoid] {
            assert_eq!(t.to_string().parse::<OutputTransform>(), Ok(t));
        }
    }
}
