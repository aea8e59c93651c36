//! XGBoost `dump_model` JSON loader.
//!
//! `Booster.dump_model(path, dump_format="json")` writes a JSON array with one
//! nested object per tree:
//!
//! ```json
//! [
//!   { "nodeid": 0, "depth": 0, "split": "f2", "split_condition": 0.43,
//!     "yes": 1, "no": 2, "missing": 1,
//!     "children": [ { "nodeid": 1, "leaf": -0.18 }, { "nodeid": 2, "leaf": 0.09 } ] }
//! ]
//! ```
//!
//! `children[0]` is the branch taken when `x[feature] < split_condition`.
//! The `yes`/`no`/`missing` ids are informational; missing values follow
//! ordinary comparison semantics and go right.

use std::path::Path;

use serde_json::{Map, Value};

use crate::repr::{Forest, NodeId, TreeBuilder, TreeValidationError};

/// Errors raised while converting a dump into a [`Forest`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DumpError {
    #[error("tree dump must be a JSON array of trees")]
    NotAnArray,
    #[error("tree {tree}: unexpected node structure, node keys: {keys:?}")]
    UnexpectedNode { tree: usize, keys: Vec<String> },
    #[error("tree {tree}: split node does not have exactly 2 children, found {found}")]
    ChildCount { tree: usize, found: usize },
    #[error("tree {tree}: cannot parse feature index from split '{split}'")]
    InvalidSplit { tree: usize, split: String },
    #[error("tree {tree}: field '{field}' must be a number")]
    InvalidNumber { tree: usize, field: &'static str },
    #[error("tree {tree}: {source}")]
    InvalidTree {
        tree: usize,
        #[source]
        source: TreeValidationError,
    },
}

/// Read and convert a dump file.
///
/// I/O and JSON syntax errors surface as [`std::io::Error`]; structural
/// problems are reported by [`forest_from_dump`].
pub fn read_dump(path: impl AsRef<Path>) -> std::io::Result<Value> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Convert a parsed dump into a [`Forest`], preserving tree order.
pub fn forest_from_dump(dump: &Value) -> Result<Forest, DumpError> {
    let trees = dump.as_array().ok_or(DumpError::NotAnArray)?;
    let mut forest = Forest::new();
    for (tree_idx, root) in trees.iter().enumerate() {
        let mut builder = TreeBuilder::new();
        convert_node(root, tree_idx, &mut builder)?;
        let tree = builder.freeze().map_err(|source| DumpError::InvalidTree {
            tree: tree_idx,
            source,
        })?;
        forest.push_tree(tree);
    }
    Ok(forest)
}

/// Recursively append `node` and its subtree in pre-order; returns its id.
fn convert_node(node: &Value, tree: usize, builder: &mut TreeBuilder) -> Result<NodeId, DumpError> {
    let obj = node.as_object().ok_or(DumpError::UnexpectedNode {
        tree,
        keys: Vec::new(),
    })?;

    if let Some(leaf) = obj.get("leaf") {
        let value = leaf
            .as_f64()
            .ok_or(DumpError::InvalidNumber { tree, field: "leaf" })?;
        return Ok(builder.push_leaf(value));
    }

    let (Some(split), Some(condition), Some(children)) = (
        obj.get("split"),
        obj.get("split_condition"),
        obj.get("children"),
    ) else {
        return Err(DumpError::UnexpectedNode {
            tree,
            keys: keys_of(obj),
        });
    };

    let children = children.as_array().ok_or(DumpError::UnexpectedNode {
        tree,
        keys: keys_of(obj),
    })?;
    if children.len() != 2 {
        return Err(DumpError::ChildCount {
            tree,
            found: children.len(),
        });
    }

    let feature = parse_split_feature(split).ok_or_else(|| DumpError::InvalidSplit {
        tree,
        split: split.as_str().map_or_else(|| split.to_string(), str::to_string),
    })?;
    let threshold = condition.as_f64().ok_or(DumpError::InvalidNumber {
        tree,
        field: "split_condition",
    })?;

    let id = builder.push_split(feature, threshold);
    let left = convert_node(&children[0], tree, builder)?;
    let right = convert_node(&children[1], tree, builder)?;
    builder.set_children(id, left, right);
    Ok(id)
}

/// `"f12"` -> 12. The first character is the feature-name prefix.
fn parse_split_feature(split: &Value) -> Option<u32> {
    let name = split.as_str()?;
    let mut chars = name.chars();
    chars.next()?;
    chars.as_str().parse().ok()
}

fn keys_of(obj: &Map<String, Value>) -> Vec<String> {
    obj.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stump(feature: &str, threshold: f64, left: f64, right: f64) -> Value {
        json!({
            "nodeid": 0, "depth": 0, "split": feature, "split_condition": threshold,
            "yes": 1, "no": 2, "missing": 1,
            "children": [
                {"nodeid": 1, "leaf": left},
                {"nodeid": 2, "leaf": right}
            ]
        })
    }

    #[test]
    fn converts_nested_trees_in_order() {
        let dump = json!([
            {
                "nodeid": 0, "depth": 0, "split": "f2", "split_condition": 0.43,
                "yes": 1, "no": 2, "missing": 1,
                "children": [
                    stump("f0", -0.25, -0.182, -0.061),
                    {"nodeid": 2, "leaf": 0.2}
                ]
            },
            stump("f14", 0.65, -0.1, 0.104)
        ]);
        let forest = forest_from_dump(&dump).unwrap();
        assert_eq!(forest.n_trees(), 2);
        assert_eq!(forest.tree(0).n_nodes(), 5);
        assert_eq!(forest.tree(0).depth(), 2);
        assert_eq!(forest.required_features(), 15);

        let mut x = [0.0; 15];
        x[2] = 0.1;
        x[0] = -1.0;
        x[14] = 1.0;
        assert_eq!(forest.tree(0).predict_row(&x), -0.182);
        assert_eq!(forest.tree(1).predict_row(&x), 0.104);
    }

    #[test]
    fn leaf_key_wins_over_split_keys() {
        let dump = json!([{"nodeid": 0, "leaf": 0.5, "split": "f1"}]);
        let forest = forest_from_dump(&dump).unwrap();
        assert_eq!(forest.predict_margin(&[]), 0.5);
    }

    #[test]
    fn integer_thresholds_are_accepted() {
        let forest = forest_from_dump(&json!([stump("f0", 1.0, 0.0, 1.0)])).unwrap();
        let dump = json!([{
            "split": "f0", "split_condition": 3,
            "children": [{"leaf": 1}, {"leaf": 2}]
        }]);
        let int_forest = forest_from_dump(&dump).unwrap();
        assert_eq!(int_forest.tree(0).split_threshold(0), 3.0);
        assert_eq!(forest.tree(0).split_threshold(0), 1.0);
    }

    #[test]
    fn seventeen_digit_constants_parse_exactly() {
        let threshold = "0.43000000000000005";
        let left = "-0.18236472945891784";
        let right = "0.090909090909090912";
        let text = format!(
            r#"[{{"nodeid": 0, "split": "f2", "split_condition": {threshold},
                "children": [{{"nodeid": 1, "leaf": {left}}}, {{"nodeid": 2, "leaf": {right}}}]}}]"#
        );
        let dump: Value = serde_json::from_str(&text).unwrap();
        let forest = forest_from_dump(&dump).unwrap();
        let tree = forest.tree(0);

        let exact = |s: &str| s.parse::<f64>().unwrap().to_bits();
        assert_eq!(tree.split_threshold(0).to_bits(), exact(threshold));
        assert_eq!(tree.leaf_value(tree.left_child(0)).to_bits(), exact(left));
        assert_eq!(tree.leaf_value(tree.right_child(0)).to_bits(), exact(right));
    }

    #[test]
    fn rejects_non_array() {
        assert_eq!(forest_from_dump(&json!({"trees": []})), Err(DumpError::NotAnArray));
    }

    #[test]
    fn rejects_unexpected_node() {
        let dump = json!([{"nodeid": 0, "split": "f1"}]);
        assert_eq!(
            forest_from_dump(&dump),
            Err(DumpError::UnexpectedNode {
                tree: 0,
                keys: vec!["nodeid".to_string(), "split".to_string()],
            })
        );
    }

    #[test]
    fn rejects_wrong_child_count() {
        let dump = json!([
            stump("f0", 0.0, 1.0, 2.0),
            {"split": "f1", "split_condition": 0.5, "children": [{"leaf": 1.0}]}
        ]);
        assert_eq!(
            forest_from_dump(&dump),
            Err(DumpError::ChildCount { tree: 1, found: 1 })
        );
    }

    #[test]
    fn rejects_named_features() {
        let dump = json!([stump("temperature", 0.0, 1.0, 2.0)]);
        assert_eq!(
            forest_from_dump(&dump),
            Err(DumpError::InvalidSplit {
                tree: 0,
                split: "temperature".to_string()
            })
        );
    }

    #[test]
    fn rejects_non_numeric_leaf() {
        let dump = json!([{"leaf": "0.5"}]);
        assert_eq!(
            forest_from_dump(&dump),
            Err(DumpError::InvalidNumber { tree: 0, field: "leaf" })
        );
    }

    #[test]
    fn parses_split_feature_names() {
        assert_eq!(parse_split_feature(&json!("f0")), Some(0));
        assert_eq!(parse_split_feature(&json!("f13")), Some(13));
        assert_eq!(parse_split_feature(&json!("f")), None);
        assert_eq!(parse_split_feature(&json!("")), None);
        assert_eq!(parse_split_feature(&json!(3)), None);
    }
}
