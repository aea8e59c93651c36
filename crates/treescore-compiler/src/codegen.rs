//! Rust source emitter for the embedded model.
//!
//! [`emit_module`] renders a [`ModelBundle`] as a self-contained Rust module
//! that `treescore` includes verbatim. The emitted items are:
//!
//! - `N_FEATURES`, `MEAN`, `SCALE`: standardization tables
//! - `TRANSFORM`: the output transform
//! - `N_TREES` and one `tree_<i>` function per tree, written as nested
//!   `if x[f] < t { .. } else { .. }` expressions
//! - `margin`: sums the trees in order starting from `0.0`
//!
//! Constants are written in shortest round-trip form, so the compiled
//! constants are bit-identical to the loaded ones.

use std::fmt::Write;

use treescore::OutputTransform;

use crate::inference::ModelBundle;
use crate::repr::{NodeId, Tree};

const INDENT: &str = "    ";

/// Errors raised while emitting source.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("{what} is not finite ({value}) and cannot be emitted as a constant")]
    NonFiniteConstant { what: String, value: f64 },
    #[error("failed to format generated source")]
    Format(#[from] std::fmt::Error),
}

/// Render a Rust float literal that parses back to exactly `value`.
pub fn float_literal(value: f64, what: impl FnOnce() -> String) -> Result<String, CodegenError> {
    if !value.is_finite() {
        return Err(CodegenError::NonFiniteConstant {
            what: what(),
            value,
        });
    }
    // `{:?}` is the shortest representation that round-trips and always
    // carries a `.` or an exponent, so it stays a float literal.
    Ok(format!("{value:?}"))
}

/// Render the whole generated module.
///
/// `sources` names the artifacts in the header comment.
pub fn emit_module(bundle: &ModelBundle, sources: &[&str]) -> Result<String, CodegenError> {
    let mut out = String::new();

    writeln!(
        out,
        "// @generated by treescore-compile from {}.",
        sources.join(" and ")
    )?;
    writeln!(out, "// Do not edit by hand; regenerate from the exported model instead.")?;
    writeln!(out)?;
    writeln!(out, "use crate::transform::OutputTransform;")?;
    writeln!(out)?;
    writeln!(out, "pub const N_FEATURES: usize = {};", bundle.n_features())?;
    writeln!(out)?;

    emit_table(&mut out, "MEAN", &bundle.scaler().mean)?;
    emit_table(&mut out, "SCALE", &bundle.scaler().scale)?;

    let transform = match bundle.transform() {
        OutputTransform::Identity => "Identity",
        OutputTransform::Sigmoid => "Sigmoid",
    };
    writeln!(out, "pub const TRANSFORM: OutputTransform = OutputTransform::{transform};")?;
    writeln!(out)?;

    let forest = bundle.forest();
    writeln!(out, "pub const N_TREES: usize = {};", forest.n_trees())?;
    writeln!(out)?;

    for (idx, tree) in forest.trees().iter().enumerate() {
        // A single-leaf tree never reads its input.
        let param = if tree.is_leaf(0) { "_x" } else { "x" };
        writeln!(out, "fn tree_{idx}({param}: &[f64; N_FEATURES]) -> f64 {{")?;
        emit_node(&mut out, tree, 0, 1, idx)?;
        writeln!(out, "}}")?;
        writeln!(out)?;
    }

    writeln!(out, "pub fn margin(x: &[f64; N_FEATURES]) -> f64 {{")?;
    if forest.n_trees() == 0 {
        writeln!(out, "{INDENT}let _ = x;")?;
        writeln!(out, "{INDENT}0.0")?;
    } else {
        writeln!(out, "{INDENT}let mut score = 0.0;")?;
        for idx in 0..forest.n_trees() {
            writeln!(out, "{INDENT}score += tree_{idx}(x);")?;
        }
        writeln!(out, "{INDENT}score")?;
    }
    writeln!(out, "}}")?;

    Ok(out)
}

fn emit_table(out: &mut String, name: &str, values: &[f64]) -> Result<(), CodegenError> {
    writeln!(out, "pub const {name}: [f64; N_FEATURES] = [")?;
    for (i, &value) in values.iter().enumerate() {
        let literal = float_literal(value, || format!("{name}[{i}]"))?;
        writeln!(out, "{INDENT}{literal},")?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;
    Ok(())
}

fn emit_node(
    out: &mut String,
    tree: &Tree,
    node: NodeId,
    depth: usize,
    tree_idx: usize,
) -> Result<(), CodegenError> {
    let pad = INDENT.repeat(depth);
    if tree.is_leaf(node) {
        let value = float_literal(tree.leaf_value(node), || {
            format!("leaf {node} of tree {tree_idx}")
        })?;
        writeln!(out, "{pad}{value}")?;
        return Ok(());
    }

    let threshold = float_literal(tree.split_threshold(node), || {
        format!("threshold of node {node} in tree {tree_idx}")
    })?;
    writeln!(out, "{pad}if x[{}] < {threshold} {{", tree.split_index(node))?;
    emit_node(out, tree, tree.left_child(node), depth + 1, tree_idx)?;
    writeln!(out, "{pad}}} else {{")?;
    emit_node(out, tree, tree.right_child(node), depth + 1, tree_idx)?;
    writeln!(out, "{pad}}}")?;
    Ok(())
}
