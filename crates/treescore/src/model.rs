//! The embedded model: standardization tables and tree ensemble.
//!
//! All constants live in the generated module and are fixed at compile time.
//! [`scale_input`] and [`predict`] are the two boundary operations; the
//! caller standardizes first, then predicts.

use crate::scaler::StandardScaler;

#[allow(clippy::all)]
mod generated {
    include!("generated/model.rs");
}

pub use generated::{MEAN, N_FEATURES, N_TREES, SCALE, TRANSFORM};

/// Process-wide standardizer built from [`MEAN`] and [`SCALE`].
pub static SCALER: StandardScaler<N_FEATURES> = StandardScaler::new(MEAN, SCALE);

/// Error returned by [`features`] when a slice does not have [`N_FEATURES`] values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("expected {expected} features, got {actual}")]
    Length { expected: usize, actual: usize },
}

/// View a slice as a feature vector, checking its length.
pub fn features(values: &[f64]) -> Result<&[f64; N_FEATURES], FeatureError> {
    values.try_into().map_err(|_| FeatureError::Length {
        expected: N_FEATURES,
        actual: values.len(),
    })
}

/// Standardize a raw feature vector in place.
///
/// `x[i]` becomes `(x[i] - MEAN[i]) / SCALE[i]`. Calling this on an already
/// standardized vector standardizes it again.
#[inline]
pub fn scale_input(x: &mut [f64; N_FEATURES]) {
    SCALER.transform_inplace(x);
}

/// Standardized copy of a raw feature vector.
#[inline]
pub fn scaled(x: &[f64; N_FEATURES]) -> [f64; N_FEATURES] {
    SCALER.transform(x)
}

/// Summed leaf score of all trees, before the output transform.
#[inline]
pub fn predict_margin(x: &[f64; N_FEATURES]) -> f64 {
    generated::margin(x)
}

/// Predict from a standardized feature vector.
///
/// A tree routes a sample left when `x[feature] < threshold`; NaN compares
/// false and goes right. The summed margin is mapped through [`TRANSFORM`].
#[inline]
pub fn predict(x: &[f64; N_FEATURES]) -> f64 {
    TRANSFORM.apply(predict_margin(x))
}

/// Standardize a copy of `x` and predict from it.
#[inline]
pub fn scale_and_predict(x: &[f64; N_FEATURES]) -> f64 {
    predict(&scaled(x))
}
