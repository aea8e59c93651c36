//! treescore: an embedded standardizer and tree-ensemble scorer.
//!
//! The crate carries one fixed model: a z-score standardizer over
//! [`N_FEATURES`] inputs followed by a gradient-boosted tree ensemble whose
//! summed margin is passed through a logistic sigmoid. All model constants are
//! compiled in; nothing is loaded at runtime.
//!
//! # Key Items
//!
//! - [`scale_input`] / [`scaled`] - Standardize a raw feature vector
//! - [`predict`] / [`predict_margin`] - Score a standardized feature vector
//! - [`MEAN`] / [`SCALE`] - The per-feature standardization tables
//! - [`StandardScaler`] - Reusable standardizer over any fixed width
//! - [`OutputTransform`] - Margin to prediction mapping
//!
//! # Example
//!
//! ```
//! use treescore::{predict, scale_input, N_FEATURES};
//!
//! let mut x = [0.0_f64; N_FEATURES];
//! scale_input(&mut x);
//! let p = predict(&x);
//! assert!(p > 0.0 && p < 1.0);
//! ```
//!
//! The generated module is produced by `treescore-compile` from the exported
//! scaler and XGBoost artifacts. Regenerate it instead of editing it.

pub mod model;
pub mod scaler;
pub mod transform;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use model::{
    features, predict, predict_margin, scale_and_predict, scale_input, scaled, FeatureError,
    MEAN, N_FEATURES, N_TREES, SCALE, SCALER, TRANSFORM,
};
pub use scaler::{ScalerError, StandardScaler};
pub use transform::{OutputTransform, ParseTransformError};
