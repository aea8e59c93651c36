//! Interpreter for a loaded model bundle.
//!
//! [`ModelBundle`] evaluates the same arithmetic the generated module
//! compiles in: standardize with the scaler tables, sum the tree margins in
//! order from `0.0`, apply the output transform. It exists to verify generated
//! code and to score batches without recompiling.

use ndarray::{Array1, ArrayView2};
use treescore::OutputTransform;

use crate::compat::sklearn::{ScalerParams, ScalerParamsError};
use crate::repr::Forest;
use crate::utils::Parallelism;

/// Errors raised when assembling a [`ModelBundle`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BundleError {
    #[error("invalid scaler parameters: {0}")]
    Scaler(#[from] ScalerParamsError),
    #[error("forest splits on feature {feature} but the scaler only has {n_features} features")]
    FeatureOutOfRange { feature: usize, n_features: usize },
}

/// Scaler tables, tree ensemble and output transform of one exported model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBundle {
    scaler: ScalerParams,
    forest: Forest,
    transform: OutputTransform,
}

impl ModelBundle {
    /// Assemble a bundle, checking the scaler tables and that every split
    /// feature has a scaler entry.
    pub fn new(
        scaler: ScalerParams,
        forest: Forest,
        transform: OutputTransform,
    ) -> Result<Self, BundleError> {
        scaler.validate()?;
        let required = forest.required_features();
        if required > scaler.n_features() {
            return Err(BundleError::FeatureOutOfRange {
                feature: required - 1,
                n_features: scaler.n_features(),
            });
        }
        Ok(Self {
            scaler,
            forest,
            transform,
        })
    }

    /// Feature vector width.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    #[inline]
    pub fn scaler(&self) -> &ScalerParams {
        &self.scaler
    }

    #[inline]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    #[inline]
    pub fn transform(&self) -> OutputTransform {
        self.transform
    }

    /// Standardize a raw feature vector in place.
    ///
    /// # Panics
    ///
    /// Panics if `x.len()` differs from [`n_features`](Self::n_features).
    #[inline]
    pub fn scale_inplace(&self, x: &mut [f64]) {
        self.scaler.transform_inplace(x);
    }

    /// Summed tree margin of a standardized feature vector.
    ///
    /// # Panics
    ///
    /// Panics if `x.len()` differs from [`n_features`](Self::n_features).
    #[inline]
    pub fn predict_margin(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.n_features(), "feature vector length mismatch");
        self.forest.predict_margin(x)
    }

    /// Prediction for a standardized feature vector.
    #[inline]
    pub fn predict(&self, x: &[f64]) -> f64 {
        self.transform.apply(self.predict_margin(x))
    }

    /// Prediction for a raw feature vector; the input is not modified.
    pub fn predict_raw(&self, raw: &[f64]) -> f64 {
        let mut x = raw.to_vec();
        self.scale_inplace(&mut x);
        self.predict(&x)
    }

    /// Predictions for a batch of raw rows, shape `(n_rows, n_features)`.
    ///
    /// # Panics
    ///
    /// Panics if the number of columns differs from [`n_features`](Self::n_features).
    pub fn predict_batch(&self, features: ArrayView2<f64>, parallelism: Parallelism) -> Array1<f64> {
        assert_eq!(
            features.ncols(),
            self.n_features(),
            "feature matrix column count mismatch"
        );
        let predictions = parallelism.maybe_par_map(0..features.nrows(), |row| {
            let mut x = features.row(row).to_vec();
            self.scale_inplace(&mut x);
            self.predict(&x)
        });
        Array1::from_vec(predictions)
    }
}
