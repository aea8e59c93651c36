//! Loaders for artifacts exported by the training pipeline.
//!
//! - [`sklearn`]: fitted `StandardScaler` mean/scale tables
//! - [`xgboost`]: tree ensembles from `dump_model` JSON

pub mod sklearn;
pub mod xgboost;
