//! Generate the `treescore` model module from exported artifacts.
//!
//! Usage:
//!   cargo run --bin treescore-compile -- \
//!       --input-dir models --output-dir crates/treescore/src/generated
//!
//! Logging is controlled with `RUST_LOG` (default: `info`).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use treescore::OutputTransform;
use treescore_compiler::{compile, CompileConfig};

#[derive(Debug, Parser)]
#[command(name = "treescore-compile", version, about)]
struct Args {
    /// Directory holding the scaler export and the tree dump.
    #[arg(long, default_value = "exported_model")]
    input_dir: PathBuf,

    /// Directory the generated module is written to.
    #[arg(long, default_value = "generated_code")]
    output_dir: PathBuf,

    /// File stem of the generated module.
    #[arg(long, default_value = "model")]
    basename: String,

    /// Scaler export file name inside the input directory.
    #[arg(long, default_value = "scaler_params.json")]
    scaler_file: String,

    /// Tree dump file name inside the input directory.
    #[arg(long, default_value = "xgb_model.json")]
    model_file: String,

    /// Output transform: identity or sigmoid.
    #[arg(long, default_value = "sigmoid")]
    transform: OutputTransform,

    /// Fail unless the model has exactly this many features.
    #[arg(long)]
    expected_features: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = CompileConfig::builder()
        .input_dir(args.input_dir)
        .output_dir(args.output_dir)
        .output_basename(args.basename)
        .scaler_file(args.scaler_file)
        .model_file(args.model_file)
        .transform(args.transform)
        .maybe_expected_features(args.expected_features)
        .build();

    let report = compile(&config).with_context(|| {
        format!("failed to compile model from {}", config.input_dir.display())
    })?;

    println!(
        "wrote {} ({} features, {} trees)",
        report.output_path.display(),
        report.n_features,
        report.n_trees
    );
    Ok(())
}
