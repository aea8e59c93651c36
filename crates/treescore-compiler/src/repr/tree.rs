//! Canonical tree representation (SoA) and its builder.
//!
//! This module provides:
//! - [`Tree`]: Immutable SoA tree storage for traversal and code generation
//! - [`TreeBuilder`]: Mutable construction, frozen into a validated [`Tree`]
//! - [`TreeValidationError`]: Structural validation errors

use super::NodeId;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors raised by [`TreeBuilder::freeze`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    EmptyTree,
    #[error("split node {node} is missing its children")]
    MissingChildren { node: NodeId },
    #[error("node {node} has {side} child {child} but the tree has {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },
    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },
    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },
}

// ============================================================================
// Tree
// ============================================================================

/// Immutable decision tree in structure-of-arrays layout.
///
/// Node 0 is the root. A split node sends a sample to its left child when
/// `features[split_index] < threshold` and to its right child otherwise, so a
/// NaN feature always goes right.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    thresholds: Box<[f64]>,
    left_children: Box<[NodeId]>,
    right_children: Box<[NodeId]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f64]>,
}

impl Tree {
    /// Number of nodes in the tree.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&leaf| leaf).count()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f64 {
        self.thresholds[node as usize]
    }

    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f64 {
        self.leaf_values[node as usize]
    }

    /// Largest feature index used by any split, or `None` for a single-leaf tree.
    pub fn max_split_index(&self) -> Option<u32> {
        (0..self.n_nodes() as NodeId)
            .filter(|&n| !self.is_leaf(n))
            .map(|n| self.split_index(n))
            .max()
    }

    /// Depth of the deepest leaf (a single leaf has depth 0).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0 as NodeId, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            if self.is_leaf(node) {
                max_depth = max_depth.max(depth);
            } else {
                stack.push((self.left_child(node), depth + 1));
                stack.push((self.right_child(node), depth + 1));
            }
        }
        max_depth
    }

    /// Traverse from the root to the leaf reached by `features`.
    ///
    /// `features` must be long enough to index every split; see
    /// [`max_split_index`](Self::max_split_index).
    #[inline]
    pub fn traverse_to_leaf(&self, features: &[f64]) -> NodeId {
        let mut node = 0;
        while !self.is_leaf(node) {
            let fvalue = features[self.split_index(node) as usize];
            node = if fvalue < self.split_threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }
        node
    }

    /// Leaf value reached by `features`.
    #[inline]
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.leaf_value(self.traverse_to_leaf(features))
    }
}

// ============================================================================
// TreeBuilder
// ============================================================================

/// Mutable tree under construction.
///
/// Nodes are appended in any order; the first node pushed is the root.
/// Split children are attached with [`set_children`](Self::set_children).
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    split_indices: Vec<u32>,
    thresholds: Vec<f64>,
    left_children: Vec<Option<NodeId>>,
    right_children: Vec<Option<NodeId>>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f64>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n_nodes: usize) -> Self {
        Self {
            split_indices: Vec::with_capacity(n_nodes),
            thresholds: Vec::with_capacity(n_nodes),
            left_children: Vec::with_capacity(n_nodes),
            right_children: Vec::with_capacity(n_nodes),
            is_leaf: Vec::with_capacity(n_nodes),
            leaf_values: Vec::with_capacity(n_nodes),
        }
    }

    /// Number of nodes pushed so far.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    fn push(&mut self, split_index: u32, threshold: f64, leaf: bool, value: f64) -> NodeId {
        let id = self.n_nodes() as NodeId;
        self.split_indices.push(split_index);
        self.thresholds.push(threshold);
        self.left_children.push(None);
        self.right_children.push(None);
        self.is_leaf.push(leaf);
        self.leaf_values.push(value);
        id
    }

    /// Append a leaf node.
    pub fn push_leaf(&mut self, value: f64) -> NodeId {
        self.push(0, 0.0, true, value)
    }

    /// Append a numeric split node; attach children later.
    pub fn push_split(&mut self, feature: u32, threshold: f64) -> NodeId {
        self.push(feature, threshold, false, 0.0)
    }

    /// Attach the children of a split node.
    pub fn set_children(&mut self, node: NodeId, left: NodeId, right: NodeId) {
        self.left_children[node as usize] = Some(left);
        self.right_children[node as usize] = Some(right);
    }

    /// Validate the structure and freeze into an immutable [`Tree`].
    pub fn freeze(self) -> Result<Tree, TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let mut left_children = Vec::with_capacity(n_nodes);
        let mut right_children = Vec::with_capacity(n_nodes);
        for node in 0..n_nodes {
            let id = node as NodeId;
            if self.is_leaf[node] {
                left_children.push(0);
                right_children.push(0);
                continue;
            }
            let (Some(left), Some(right)) = (self.left_children[node], self.right_children[node])
            else {
                return Err(TreeValidationError::MissingChildren { node: id });
            };
            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node: id,
                        side,
                        child,
                        n_nodes,
                    });
                }
                if child == id {
                    return Err(TreeValidationError::SelfLoop { node: id });
                }
            }
            left_children.push(left);
            right_children.push(right);
        }

        // Every node must be reached exactly once from the root.
        let mut visited = vec![false; n_nodes];
        let mut stack = vec![0 as NodeId];
        while let Some(node) = stack.pop() {
            if std::mem::replace(&mut visited[node as usize], true) {
                return Err(TreeValidationError::DuplicateVisit { node });
            }
            if !self.is_leaf[node as usize] {
                stack.push(right_children[node as usize]);
                stack.push(left_children[node as usize]);
            }
        }
        if let Some(node) = visited.iter().position(|&v| !v) {
            return Err(TreeValidationError::UnreachableNode {
                node: node as NodeId,
            });
        }

        Ok(Tree {
            split_indices: self.split_indices.into_boxed_slice(),
            thresholds: self.thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: self.is_leaf.into_boxed_slice(),
            leaf_values: self.leaf_values.into_boxed_slice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root split on feature 0 at 0.5, right child splits feature 2 at -1.0.
    fn two_level_tree() -> Tree {
        let mut b = TreeBuilder::with_capacity(5);
        let root = b.push_split(0, 0.5);
        let left = b.push_leaf(1.0);
        let right = b.push_split(2, -1.0);
        let rl = b.push_leaf(2.0);
        let rr = b.push_leaf(3.0);
        b.set_children(root, left, right);
        b.set_children(right, rl, rr);
        b.freeze().unwrap()
    }

    #[test]
    fn traversal_uses_strict_less_than() {
        let tree = two_level_tree();
        assert_eq!(tree.predict_row(&[0.4, 0.0, 0.0]), 1.0);
        // Equal to the threshold goes right.
        assert_eq!(tree.predict_row(&[0.5, 0.0, -1.5]), 2.0);
        assert_eq!(tree.predict_row(&[0.5, 0.0, -1.0]), 3.0);
    }

    #[test]
    fn nan_goes_right() {
        let tree = two_level_tree();
        assert_eq!(tree.predict_row(&[f64::NAN, 0.0, f64::NAN]), 3.0);
    }

    #[test]
    fn infinities_follow_comparison() {
        let tree = two_level_tree();
        assert_eq!(tree.predict_row(&[f64::NEG_INFINITY, 0.0, 0.0]), 1.0);
        assert_eq!(tree.predict_row(&[f64::INFINITY, 0.0, f64::NEG_INFINITY]), 2.0);
    }

    #[test]
    fn shape_queries() {
        let tree = two_level_tree();
        assert_eq!(tree.n_nodes(), 5);
        assert_eq!(tree.n_leaves(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.max_split_index(), Some(2));
    }

    #[test]
    fn single_leaf_tree() {
        let mut b = TreeBuilder::new();
        b.push_leaf(-0.25);
        let tree = b.freeze().unwrap();
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.max_split_index(), None);
        assert_eq!(tree.predict_row(&[]), -0.25);
    }

    #[test]
    fn freeze_rejects_empty_tree() {
        assert_eq!(TreeBuilder::new().freeze(), Err(TreeValidationError::EmptyTree));
    }

    #[test]
    fn freeze_rejects_missing_children() {
        let mut b = TreeBuilder::new();
        b.push_split(0, 1.0);
        assert_eq!(b.freeze(), Err(TreeValidationError::MissingChildren { node: 0 }));
    }

    #[test]
    fn freeze_rejects_out_of_bounds_child() {
        let mut b = TreeBuilder::new();
        let root = b.push_split(0, 1.0);
        let leaf = b.push_leaf(0.0);
        b.set_children(root, leaf, 7);
        assert_eq!(
            b.freeze(),
            Err(TreeValidationError::ChildOutOfBounds {
                node: 0,
                side: "right",
                child: 7,
                n_nodes: 2
            })
        );
    }

    #[test]
    fn freeze_rejects_self_loop() {
        let mut b = TreeBuilder::new();
        let root = b.push_split(0, 1.0);
        let leaf = b.push_leaf(0.0);
        b.set_children(root, root, leaf);
        assert_eq!(b.freeze(), Err(TreeValidationError::SelfLoop { node: 0 }));
    }

    #[test]
    fn freeze_rejects_shared_child() {
        let mut b = TreeBuilder::new();
        let root = b.push_split(0, 1.0);
        let leaf = b.push_leaf(0.0);
        b.set_children(root, leaf, leaf);
        assert_eq!(b.freeze(), Err(TreeValidationError::DuplicateVisit { node: 1 }));
    }

    #[test]
    fn freeze_rejects_unreachable_node() {
        let mut b = TreeBuilder::new();
        let root = b.push_split(0, 1.0);
        let l = b.push_leaf(0.0);
        let r = b.push_leaf(1.0);
        b.push_leaf(2.0);
        b.set_children(root, l, r);
        assert_eq!(b.freeze(), Err(TreeValidationError::UnreachableNode { node: 3 }));
    }
}
