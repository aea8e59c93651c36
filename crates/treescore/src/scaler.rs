//! Z-score feature standardization.
//!
//! [`StandardScaler`] holds a mean and a scale table of the same fixed width
//! and maps every feature to `(x - mean) / scale`. The width is a const
//! generic, so a vector of the wrong length is a type error rather than a
//! silent misread.

/// Precondition violations detected by [`StandardScaler::validate`].
///
/// The transform itself never checks these; a zero scale simply produces an
/// infinite or NaN feature.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScalerError {
    #[error("scale of feature {feature} is zero")]
    ZeroScale { feature: usize },
    #[error("scale of feature {feature} is not finite: {value}")]
    NonFiniteScale { feature: usize, value: f64 },
    #[error("mean of feature {feature} is not finite: {value}")]
    NonFiniteMean { feature: usize, value: f64 },
}

/// Per-feature standardizer with compile-time width `N`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler<const N: usize> {
    mean: [f64; N],
    scale: [f64; N],
}

impl<const N: usize> StandardScaler<N> {
    /// Create a scaler from its mean and scale tables.
    pub const fn new(mean: [f64; N], scale: [f64; N]) -> Self {
        Self { mean, scale }
    }

    /// A scaler that leaves every value unchanged (mean 0, scale 1).
    pub const fn identity() -> Self {
        Self::new([0.0; N], [1.0; N])
    }

    /// Number of features.
    #[inline]
    pub const fn n_features(&self) -> usize {
        N
    }

    /// Per-feature centering values.
    #[inline]
    pub const fn mean(&self) -> &[f64; N] {
        &self.mean
    }

    /// Per-feature divisors.
    #[inline]
    pub const fn scale(&self) -> &[f64; N] {
        &self.scale
    }

    /// Standardize `x` in place: `x[i] = (x[i] - mean[i]) / scale[i]`.
    ///
    /// Each feature is transformed independently. Applying this twice
    /// standardizes twice; it is not idempotent.
    #[inline]
    pub fn transform_inplace(&self, x: &mut [f64; N]) {
        for ((value, mean), scale) in x.iter_mut().zip(&self.mean).zip(&self.scale) {
            *value = (*value - mean) / scale;
        }
    }

    /// Return a standardized copy of `x`, leaving the input untouched.
    #[inline]
    pub fn transform(&self, x: &[f64; N]) -> [f64; N] {
        let mut out = *x;
        self.transform_inplace(&mut out);
        out
    }

    /// Check the tables for values that would make the transform non-finite.
    ///
    /// Reports the first offending feature.
    pub fn validate(&self) -> Result<(), ScalerError> {
        for (feature, (&mean, &scale)) in self.mean.iter().zip(&self.scale).enumerate() {
            if !mean.is_finite() {
                return Err(ScalerError::NonFiniteMean { feature, value: mean });
            }
            if !scale.is_finite() {
                return Err(ScalerError::NonFiniteScale { feature, value: scale });
            }
            if scale == 0.0 {
                return Err(ScalerError::ZeroScale { feature });
            }
        }
        Ok(())
    }
}

impl<const N: usize> Default for StandardScaler<N> {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn transform_matches_formula() {
        let scaler = StandardScaler::new([1.0, -2.0, 0.5], [2.0, 4.0, 0.25]);
        let mut x = [3.0, 6.0, 1.0];
        scaler.transform_inplace(&mut x);
        assert_eq!(x, [1.0, 2.0, 2.0]);
    }

    #[test]
    fn identity_is_noop() {
        let scaler = StandardScaler::<4>::identity();
        let x = [1.5, -0.25, 1e300, -7.0];
        assert_eq!(scaler.transform(&x), x);
    }

    #[test]
    fn pure_variant_leaves_input_untouched() {
        let scaler = StandardScaler::new([5.0, 0.0], [2.0, 1.0]);
        let x = [9.0, 3.0];
        let out = scaler.transform(&x);
        assert_eq!(x, [9.0, 3.0]);
        assert_eq!(out, [2.0, 3.0]);
    }

    #[test]
    fn zero_scale_is_not_checked_by_transform() {
        let scaler = StandardScaler::new([0.0, 1.0], [0.0, 0.0]);
        let out = scaler.transform(&[2.0, 1.0]);
        assert!(out[0].is_infinite() && out[0] > 0.0);
        assert!(out[1].is_nan());
    }

    #[rstest]
    #[case([0.0, 1.0], [1.0, 0.0], ScalerError::ZeroScale { feature: 1 })]
    #[case([0.0, 1.0], [f64::INFINITY, 1.0], ScalerError::NonFiniteScale { feature: 0, value: f64::INFINITY })]
    #[case([0.0, f64::NEG_INFINITY], [1.0, 1.0], ScalerError::NonFiniteMean { feature: 1, value: f64::NEG_INFINITY })]
    fn validate_reports_first_bad_feature(
        #[case] mean: [f64; 2],
        #[case] scale: [f64; 2],
        #[case] expected: ScalerError,
    ) {
        let scaler = StandardScaler::new(mean, scale);
        assert_eq!(scaler.validate(), Err(expected));
    }

    #[test]
    fn validate_accepts_regular_tables() {
        let scaler = StandardScaler::new([21.0, -3.0], [0.5, 12.0]);
        assert!(scaler.validate().is_ok());
        assert_eq!(scaler.n_features(), 2);
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(StandardScaler::<3>::default(), StandardScaler::<3>::identity());
    }
}
