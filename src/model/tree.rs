//! Tree ensemble scorer over validated [`TreeSchema`] nodes.

use super::domain::TreeSchema;

/// Additive forest: `base_score + sum(leaf reached in each tree)`.
#[derive(Clone, Debug)]
pub struct Forest {
    trees: Vec<TreeSchema>,
    base_score: f64,
}

impl Forest {
    /// Trees must already have passed `ModelDocument::validate`.
    pub fn new(trees: Vec<TreeSchema>, base_score: f64) -> Self {
        Self { trees, base_score }
    }

    pub fn raw_score(&self, row: &[f64]) -> f64 {
        self.base_score
            + self
                .trees
                .iter()
                .map(|tree| tree.leaf_values[leaf_index(tree, row)])
                .sum::<f64>()
    }
}

/// Walk from the root to a leaf. Values below the threshold go left; NaN (or an
/// absent column) follows the node's default direction.
fn leaf_index(tree: &TreeSchema, row: &[f64]) -> usize {
    let mut idx = 0usize;
    while tree.children_left[idx] != 0 {
        let fvalue = row
            .get(tree.split_indices[idx] as usize)
            .copied()
            .unwrap_or(f64::NAN);

        let go_left = if fvalue.is_nan() {
            tree.default_left[idx]
        } else {
            fvalue < tree.thresholds[idx]
        };
        idx = if go_left {
            tree.children_left[idx] as usize
        } else {
            tree.children_right[idx] as usize
        };
    }
    idx
}
