//! scikit-learn `StandardScaler` parameter export.
//!
//! The training pipeline writes the fitted scaler as
//!
//! ```json
//! { "mean": [21.84, 45.3, ...], "scale": [3.12, 11.8, ...] }
//! ```
//!
//! with one entry per feature, in model feature order.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors found while validating scaler parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScalerParamsError {
    #[error("scaler has no features")]
    Empty,
    #[error("scaler mean has {mean} entries but scale has {scale}")]
    LengthMismatch { mean: usize, scale: usize },
    #[error("scaler {table}[{index}] is not finite: {value}")]
    NonFinite {
        table: &'static str,
        index: usize,
        value: f64,
    },
}

/// Per-feature mean and scale tables as exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerParams {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Check that both tables are non-empty, equally long and finite.
    ///
    /// Zero scale entries pass: they are a data problem the exported model
    /// carries verbatim, see [`zero_scale_features`](Self::zero_scale_features).
    pub fn validate(&self) -> Result<(), ScalerParamsError> {
        if self.mean.is_empty() && self.scale.is_empty() {
            return Err(ScalerParamsError::Empty);
        }
        if self.mean.len() != self.scale.len() {
            return Err(ScalerParamsError::LengthMismatch {
                mean: self.mean.len(),
                scale: self.scale.len(),
            });
        }
        for (table, values) in [("mean", &self.mean), ("scale", &self.scale)] {
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(ScalerParamsError::NonFinite { table, index, value });
            }
        }
        Ok(())
    }

    /// Indices of features whose scale is exactly zero.
    pub fn zero_scale_features(&self) -> Vec<usize> {
        self.scale
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Standardize `x` in place with the same arithmetic as
    /// [`treescore::StandardScaler`].
    ///
    /// # Panics
    ///
    /// Panics if `x.len()` differs from [`n_features`](Self::n_features).
    #[inline]
    pub fn transform_inplace(&self, x: &mut [f64]) {
        assert_eq!(x.len(), self.n_features(), "feature vector length mismatch");
        for ((value, mean), scale) in x.iter_mut().zip(&self.mean).zip(&self.scale) {
            *value = (*value - mean) / scale;
        }
    }
}
