//! Canonical forest representation (ordered collection of trees).

use super::Tree;

/// Additive ensemble of trees with a single output.
///
/// Tree order is significant: margins are accumulated tree by tree starting
/// from `0.0`, and floating-point addition is not associative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tree to the end of the ensemble.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    #[inline]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Minimum feature vector length needed to evaluate every split.
    pub fn required_features(&self) -> usize {
        self.trees
            .iter()
            .filter_map(Tree::max_split_index)
            .max()
            .map_or(0, |max| max as usize + 1)
    }

    /// Sum of leaf values over all trees, in tree order.
    #[inline]
    pub fn predict_margin(&self, features: &[f64]) -> f64 {
        let mut score = 0.0;
        for tree in &self.trees {
            score += tree.predict_row(features);
        }
        score
    }
}

impl FromIterator<Tree> for Forest {
    fn from_iter<I: IntoIterator<Item = Tree>>(iter: I) -> Self {
        Self {
            trees: iter.into_iter().collect(),
        }
    }
}
