//! Compile configuration.
//!
//! Defaults follow the layout written by the training pipeline: both
//! artifacts sit in `exported_model/`, and the generated module is written to
//! `generated_code/model.rs`.
//!
//! # Example
//!
//! ```
//! use treescore_compiler::CompileConfig;
//!
//! let config = CompileConfig::builder()
//!     .input_dir("exported_model")
//!     .output_dir("crates/treescore/src/generated")
//!     .expected_features(15)
//!     .build();
//! assert_eq!(config.output_path().to_str(), Some("crates/treescore/src/generated/model.rs"));
//! ```

use std::path::PathBuf;

use bon::Builder;
use treescore::OutputTransform;

/// Where to read the exported artifacts and where to write the module.
#[derive(Debug, Clone, Builder)]
pub struct CompileConfig {
    /// Directory holding the exported artifacts. Default: `exported_model`.
    #[builder(into, default = PathBuf::from("exported_model"))]
    pub input_dir: PathBuf,

    /// Directory the generated module is written to. Default: `generated_code`.
    #[builder(into, default = PathBuf::from("generated_code"))]
    pub output_dir: PathBuf,

    /// File stem of the generated module. Default: `model`.
    #[builder(into, default = String::from("model"))]
    pub output_basename: String,

    /// Scaler export file name inside `input_dir`. Default: `scaler_params.json`.
    #[builder(into, default = String::from("scaler_params.json"))]
    pub scaler_file: String,

    /// Tree dump file name inside `input_dir`. Default: `xgb_model.json`.
    #[builder(into, default = String::from("xgb_model.json"))]
    pub model_file: String,

    /// Output transform applied to the summed margin. Default: sigmoid.
    #[builder(default = OutputTransform::Sigmoid)]
    pub transform: OutputTransform,

    /// Reject artifacts whose feature count differs. `None` accepts any width.
    pub expected_features: Option<usize>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CompileConfig {
    pub fn scaler_path(&self) -> PathBuf {
        self.input_dir.join(&self.scaler_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.input_dir.join(&self.model_file)
    }

    /// `<output_dir>/<output_basename>.rs`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.rs", self.output_basename))
    }
}
