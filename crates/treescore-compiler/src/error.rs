//! Error type for the compile pipeline.

use std::path::PathBuf;

use crate::codegen::CodegenError;
use crate::compat::xgboost::DumpError;
use crate::inference::BundleError;

/// Everything that can stop [`compile`](crate::compile).
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("{kind} file not found: {}", path.display())]
    MissingArtifact { kind: &'static str, path: PathBuf },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tree dump")]
    Dump(#[from] DumpError),
    #[error("invalid model bundle")]
    Bundle(#[from] BundleError),
    #[error("model has {actual} features, expected {expected}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("code generation failed")]
    Codegen(#[from] CodegenError),
}
