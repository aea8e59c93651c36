//! treescore-compiler: turn exported model artifacts into `treescore` sources.
//!
//! The training pipeline exports two files: the fitted `StandardScaler`
//! tables and an XGBoost `dump_model` JSON. This crate loads both, checks
//! them, and emits the Rust module that the `treescore` runtime includes.
//!
//! # Key Types
//!
//! - [`CompileConfig`] - Artifact locations and output settings
//! - [`ModelBundle`] - Loaded scaler + forest + transform, with an interpreter
//! - [`compile`] - The full load, validate, emit, write pipeline
//!
//! # Modules
//!
//! - [`compat`]: artifact loaders (scikit-learn scaler, XGBoost dump)
//! - [`repr`]: tree and forest representation
//! - [`codegen`]: Rust source emitter

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub mod codegen;
pub mod compat;
pub mod config;
pub mod error;
pub mod inference;
pub mod repr;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use codegen::{emit_module, CodegenError};
pub use compat::sklearn::{ScalerParams, ScalerParamsError};
pub use compat::xgboost::DumpError;
pub use config::CompileConfig;
pub use error::CompileError;
pub use inference::{BundleError, ModelBundle};
pub use repr::{Forest, Tree, TreeBuilder};
pub use utils::Parallelism;

/// Summary of a successful [`compile`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub output_path: PathBuf,
    pub n_features: usize,
    pub n_trees: usize,
}

fn require_file(kind: &'static str, path: &Path) -> Result<(), CompileError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CompileError::MissingArtifact {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Load and validate the exported artifacts named by `config`.
pub fn load_bundle(config: &CompileConfig) -> Result<ModelBundle, CompileError> {
    let scaler_path = config.scaler_path();
    let model_path = config.model_path();
    require_file("scaler parameters", &scaler_path)?;
    require_file("XGBoost model", &model_path)?;

    debug!(path = %scaler_path.display(), "reading scaler parameters");
    let scaler = ScalerParams::from_file(&scaler_path).map_err(|source| CompileError::Read {
        path: scaler_path.clone(),
        source,
    })?;

    debug!(path = %model_path.display(), "reading tree dump");
    let dump = compat::xgboost::read_dump(&model_path).map_err(|source| CompileError::Read {
        path: model_path.clone(),
        source,
    })?;
    let forest = compat::xgboost::forest_from_dump(&dump)?;

    for feature in scaler.zero_scale_features() {
        warn!(feature, "scale is zero; standardized values for this feature will not be finite");
    }

    let bundle = ModelBundle::new(scaler, forest, config.transform)?;
    if let Some(expected) = config.expected_features {
        if bundle.n_features() != expected {
            return Err(CompileError::FeatureCount {
                expected,
                actual: bundle.n_features(),
            });
        }
    }

    debug!(
        n_features = bundle.n_features(),
        n_trees = bundle.forest().n_trees(),
        transform = %bundle.transform(),
        "model bundle loaded"
    );
    Ok(bundle)
}

/// Load the artifacts, emit the Rust module and write it to
/// [`CompileConfig::output_path`], creating the output directory if needed.
pub fn compile(config: &CompileConfig) -> Result<CompileReport, CompileError> {
    let bundle = load_bundle(config)?;
    let source = emit_module(&bundle, &[&config.scaler_file, &config.model_file])?;

    let output_path = config.output_path();
    fs::create_dir_all(&config.output_dir).map_err(|source| CompileError::Write {
        path: config.output_dir.clone(),
        source,
    })?;
    fs::write(&output_path, source).map_err(|source| CompileError::Write {
        path: output_path.clone(),
        source,
    })?;

    info!(
        path = %output_path.display(),
        n_features = bundle.n_features(),
        n_trees = bundle.forest().n_trees(),
        "generated model module"
    );
    Ok(CompileReport {
        output_path,
        n_features: bundle.n_features(),
        n_trees: bundle.forest().n_trees(),
    })
}
