// ABOUTME: Multi-output regression tree stored as structure-of-arrays
// ABOUTME: Exhaustive squared-error split search with midpoint thresholds and mean-vector leaves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Regression tree.
//!
//! Nodes live in flat arrays indexed by node id, root at 0. Children are
//! always allocated after their parent, so `child > parent` holds for every
//! split node; [`RegressionTree::validate`] checks this on loaded trees,
//! which guarantees traversal terminates.
//!
//! Only leaves carry an output vector. A leaf has no children, so its
//! `left_children` entry holds the leaf's row in `leaf_values` instead.
//!
//! Split search considers every boundary between adjacent distinct values of
//! each candidate feature and keeps the one with the largest reduction of
//! squared error summed over all outputs. Rows with `x <= threshold` go left.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::matrix::DenseMatrix;
use crate::error::{ModelError, ModelResult};

/// Node identifier local to one tree
pub type NodeId = u32;

/// Impurity decrease below this is treated as no improvement
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth (root is depth 0); `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Minimum rows a node needs to be considered for a split
    pub min_samples_split: usize,
    /// Minimum rows each child must keep
    pub min_samples_leaf: usize,
    /// Features sampled per split; `None` considers all of them
    pub max_features: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

/// Fitted regression tree in structure-of-arrays form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    n_outputs: usize,
    split_features: Vec<u32>,
    split_thresholds: Vec<f64>,
    left_children: Vec<NodeId>,
    right_children: Vec<NodeId>,
    is_leaf: Vec<bool>,
    /// `n_leaves * n_outputs` values, one row per leaf
    leaf_values: Vec<f64>,
}

impl RegressionTree {
    /// Number of nodes
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaves
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|leaf| **leaf).count()
    }

    /// Width of each leaf vector
    #[must_use]
    pub const fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    /// Depth of the deepest leaf
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depths = vec![0_usize; self.n_nodes()];
        let mut deepest = 0;
        for node in 0..self.n_nodes() {
            if self.is_leaf[node] {
                deepest = deepest.max(depths[node]);
            } else {
                let child_depth = depths[node] + 1;
                depths[self.left_children[node] as usize] = child_depth;
                depths[self.right_children[node] as usize] = child_depth;
            }
        }
        deepest
    }

    /// Largest feature index used by a split, if any
    #[must_use]
    pub fn max_feature_index(&self) -> Option<usize> {
        (0..self.n_nodes())
            .filter(|&node| !self.is_leaf[node])
            .map(|node| self.split_features[node] as usize)
            .max()
    }

    /// Leaf vector reached by a row
    ///
    /// The caller guarantees `row` is wide enough for every split feature.
    #[inline]
    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> &[f64] {
        let mut node = 0_usize;
        while !self.is_leaf[node] {
            let feature = self.split_features[node] as usize;
            node = if row[feature] <= self.split_thresholds[node] {
                self.left_children[node] as usize
            } else {
                self.right_children[node] as usize
            };
        }
        self.leaf_value(node)
    }

    fn leaf_value(&self, node: usize) -> &[f64] {
        let start = self.left_children[node] as usize * self.n_outputs;
        &self.leaf_values[start..start + self.n_outputs]
    }

    /// Structural checks for trees that were deserialized
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` describing the first structural defect
    pub fn validate(&self) -> ModelResult<()> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(ModelError::InvalidParameter("tree has no nodes".into()));
        }
        if self.n_outputs == 0 {
            return Err(ModelError::InvalidParameter("tree has no outputs".into()));
        }
        let lengths = [
            self.split_features.len(),
            self.split_thresholds.len(),
            self.left_children.len(),
            self.right_children.len(),
        ];
        let n_leaves = self.n_leaves();
        if lengths.iter().any(|&len| len != n_nodes)
            || self.leaf_values.len() != n_leaves * self.n_outputs
        {
            return Err(ModelError::InvalidParameter(
                "tree arrays have inconsistent lengths".into(),
            ));
        }

        for node in 0..n_nodes {
            if self.is_leaf[node] {
                let slot = self.left_children[node] as usize;
                if slot >= n_leaves {
                    return Err(ModelError::InvalidParameter(format!(
                        "leaf {node} points at value row {slot} (tree has {n_leaves} leaves)"
                    )));
                }
                continue;
            }
            for child in [self.left_children[node], self.right_children[node]] {
                let child = child as usize;
                if child <= node || child >= n_nodes {
                    return Err(ModelError::InvalidParameter(format!(
                        "node {node} has invalid child {child} (tree has {n_nodes} nodes)"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Grow a tree on the rows listed in `sample_indices` (duplicates allowed)
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is empty or the matrices disagree on row count
    pub fn fit<R: Rng>(
        features: &DenseMatrix,
        targets: &DenseMatrix,
        mut sample_indices: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
    ) -> ModelResult<Self> {
        if sample_indices.is_empty() || targets.n_cols() == 0 {
            return Err(ModelError::EmptyDataset);
        }
        if features.n_rows() != targets.n_rows() {
            return Err(ModelError::ShapeMismatch {
                expected: features.n_rows(),
                actual: targets.n_rows(),
            });
        }

        let mut builder = TreeBuilder::new(features, targets, params);
        builder.grow(&mut sample_indices, rng);
        Ok(builder.finish())
    }
}

/// Pending node: id plus the index range of its rows
struct WorkItem {
    node: usize,
    start: usize,
    end: usize,
    depth: usize,
}

/// Best split found for a node
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Mutable state while growing one tree
struct TreeBuilder<'a> {
    features: &'a DenseMatrix,
    targets: &'a DenseMatrix,
    params: &'a TreeParams,
    tree: RegressionTree,
    // scratch buffers reused across nodes
    sorted: Vec<(f64, usize)>,
    left_sums: Vec<f64>,
    total_sums: Vec<f64>,
}

impl<'a> TreeBuilder<'a> {
    fn new(features: &'a DenseMatrix, targets: &'a DenseMatrix, params: &'a TreeParams) -> Self {
        let n_outputs = targets.n_cols();
        Self {
            features,
            targets,
            params,
            tree: RegressionTree {
                n_outputs,
                split_features: Vec::new(),
                split_thresholds: Vec::new(),
                left_children: Vec::new(),
                right_children: Vec::new(),
                is_leaf: Vec::new(),
                leaf_values: Vec::new(),
            },
            sorted: Vec::new(),
            left_sums: vec![0.0; n_outputs],
            total_sums: vec![0.0; n_outputs],
        }
    }

    fn allocate_node(&mut self) -> usize {
        let id = self.tree.n_nodes();
        self.tree.split_features.push(0);
        self.tree.split_thresholds.push(0.0);
        self.tree.left_children.push(0);
        self.tree.right_children.push(0);
        self.tree.is_leaf.push(true);
        id
    }

    fn grow<R: Rng>(&mut self, indices: &mut [usize], rng: &mut R) {
        let root = self.allocate_node();
        let mut stack = vec![WorkItem {
            node: root,
            start: 0,
            end: indices.len(),
            depth: 0,
        }];

        while let Some(item) = stack.pop() {
            let rows = &mut indices[item.start..item.end];
            let Some(split) = self.find_split(rows, item.depth, rng) else {
                self.write_leaf_value(item.node, rows);
                continue;
            };

            let n_left = partition(rows, |row| {
                self.features.get(row, split.feature) <= split.threshold
            });

            let left = self.allocate_node();
            let right = self.allocate_node();
            self.tree.is_leaf[item.node] = false;
            self.tree.split_features[item.node] = split.feature as u32;
            self.tree.split_thresholds[item.node] = split.threshold;
            self.tree.left_children[item.node] = left as NodeId;
            self.tree.right_children[item.node] = right as NodeId;

            stack.push(WorkItem {
                node: right,
                start: item.start + n_left,
                end: item.end,
                depth: item.depth + 1,
            });
            stack.push(WorkItem {
                node: left,
                start: item.start,
                end: item.start + n_left,
                depth: item.depth + 1,
            });
        }
    }

    fn finish(self) -> RegressionTree {
        self.tree
    }

    fn write_leaf_value(&mut self, node: usize, rows: &[usize]) {
        let n_outputs = self.tree.n_outputs;
        let count = rows.len() as f64;
        let start = self.tree.leaf_values.len();
        self.tree.left_children[node] = (start / n_outputs) as NodeId;
        self.tree.leaf_values.resize(start + n_outputs, 0.0);
        let leaf = &mut self.tree.leaf_values[start..];
        for &row in rows {
            for (acc, value) in leaf.iter_mut().zip(self.targets.row(row)) {
                *acc += value;
            }
        }
        for acc in leaf.iter_mut() {
            *acc /= count;
        }
    }

    fn find_split<R: Rng>(
        &mut self,
        rows: &[usize],
        depth: usize,
        rng: &mut R,
    ) -> Option<SplitCandidate> {
        let n = rows.len();
        let min_leaf = self.params.min_samples_leaf.max(1);
        if n < self.params.min_samples_split.max(2) || n < 2 * min_leaf {
            return None;
        }
        if self.params.max_depth.is_some_and(|max| depth >= max) {
            return None;
        }

        self.total_sums.fill(0.0);
        let mut total_sq = 0.0;
        for &row in rows {
            for (sum, value) in self.total_sums.iter_mut().zip(self.targets.row(row)) {
                *sum += value;
                total_sq += value * value;
            }
        }
        let parent_score = sum_sq_over_count(&self.total_sums, n);
        // Node SSE; zero means the node is already pure
        if total_sq - parent_score <= MIN_IMPURITY_DECREASE {
            return None;
        }

        let n_features = self.features.n_cols();
        let candidates: Vec<usize> = match self.params.max_features {
            Some(k) if k < n_features => index::sample(rng, n_features, k.max(1)).into_vec(),
            _ => (0..n_features).collect(),
        };

        let mut best: Option<SplitCandidate> = None;
        for feature in candidates {
            let candidate = self.best_split_for_feature(rows, feature, parent_score, min_leaf);
            if let Some(candidate) = candidate {
                if best.as_ref().is_none_or(|b| candidate.gain > b.gain) {
                    best = Some(candidate);
                }
            }
        }
        best.filter(|b| b.gain > MIN_IMPURITY_DECREASE)
    }

    fn best_split_for_feature(
        &mut self,
        rows: &[usize],
        feature: usize,
        parent_score: f64,
        min_leaf: usize,
    ) -> Option<SplitCandidate> {
        let n = rows.len();
        self.sorted.clear();
        self.sorted
            .extend(rows.iter().map(|&row| (self.features.get(row, feature), row)));
        self.sorted.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        let first = self.sorted.first()?.0;
        let last = self.sorted.last()?.0;
        if first.total_cmp(&last).is_eq() {
            return None;
        }

        self.left_sums.fill(0.0);
        let mut best: Option<SplitCandidate> = None;

        for position in 0..n - 1 {
            let (value, row) = self.sorted[position];
            for (sum, target) in self.left_sums.iter_mut().zip(self.targets.row(row)) {
                *sum += target;
            }

            let n_left = position + 1;
            let n_right = n - n_left;
            let next_value = self.sorted[position + 1].0;
            if n_left < min_leaf || n_right < min_leaf || next_value <= value {
                continue;
            }

            // Maximizing sum(L^2)/nL + sum(R^2)/nR minimizes child SSE
            let left_score = sum_sq_over_count(&self.left_sums, n_left);
            let right_score: f64 = self
                .total_sums
                .iter()
                .zip(&self.left_sums)
                .map(|(total, left)| {
                    let right = total - left;
                    right * right
                })
                .sum::<f64>()
                / n_right as f64;
            let gain = left_score + right_score - parent_score;

            if best.as_ref().is_none_or(|b| gain > b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: midpoint(value, next_value),
                    gain,
                });
            }
        }
        best
    }
}

fn sum_sq_over_count(sums: &[f64], count: usize) -> f64 {
    sums.iter().map(|s| s * s).sum::<f64>() / count as f64
}

/// Midpoint that still separates `low` from `high` under `<=`
fn midpoint(low: f64, high: f64) -> f64 {
    let mid = low + (high - low) / 2.0;
    if mid < high {
        mid
    } else {
        low
    }
}

/// In-place partition; returns the size of the `true` prefix
fn partition(rows: &mut [usize], mut goes_left: impl FnMut(usize) -> bool) -> usize {
    let mut boundary = 0;
    for i in 0..rows.len() {
        if goes_left(rows[i]) {
            rows.swap(i, boundary);
            boundary += 1;
        }
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn step_data() -> ModelResult<(DenseMatrix, DenseMatrix)> {
        // y jumps from (1, 10) to (5, 50) between x = 3 and x = 4
        let x = DenseMatrix::from_rows(&[[1.0], [2.0], [3.0], [4.0], [5.0], [6.0]])?;
        let y = DenseMatrix::from_rows(&[
            [1.0, 10.0],
            [1.0, 10.0],
            [1.0, 10.0],
            [5.0, 50.0],
            [5.0, 50.0],
            [5.0, 50.0],
        ])?;
        Ok((x, y))
    }

    fn fit(x: &DenseMatrix, y: &DenseMatrix, params: &TreeParams) -> ModelResult<RegressionTree> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        RegressionTree::fit(x, y, (0..x.n_rows()).collect(), params, &mut rng)
    }

    #[test]
    fn test_step_function_single_split_at_midpoint() -> ModelResult<()> {
        let (x, y) = step_data()?;
        let tree = fit(&x, &y, &TreeParams::default())?;

        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
        assert!((tree.split_thresholds[0] - 3.5).abs() < f64::EPSILON);
        assert_eq!(tree.predict_row(&[3.5]), &[1.0, 10.0]);
        assert_eq!(tree.predict_row(&[3.6]), &[5.0, 50.0]);
        tree.validate()
    }

    #[test]
    fn test_leaves_hold_mean_vectors() -> ModelResult<()> {
        let x = DenseMatrix::from_rows(&[[1.0], [1.0], [1.0]])?;
        let y = DenseMatrix::from_rows(&[[1.0, 0.0], [2.0, 3.0], [6.0, 3.0]])?;
        let tree = fit(&x, &y, &TreeParams::default())?;

        // No distinct feature values, so the root stays a leaf
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_row(&[0.0]), &[3.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_max_depth_limits_growth() -> ModelResult<()> {
        let rows: Vec<[f64; 1]> = (0..32).map(|i| [f64::from(i)]).collect();
        let targets: Vec<[f64; 1]> = (0..32).map(|i| [f64::from(i * i)]).collect();
        let x = DenseMatrix::from_rows(&rows)?;
        let y = DenseMatrix::from_rows(&targets)?;

        let shallow = fit(
            &x,
            &y,
            &TreeParams {
                max_depth: Some(2),
                ..TreeParams::default()
            },
        )?;
        assert!(shallow.depth() <= 2);
        assert!(shallow.n_leaves() <= 4);

        let full = fit(&x, &y, &TreeParams::default())?;
        assert_eq!(full.n_leaves(), 32);
        Ok(())
    }

    #[test]
    fn test_min_samples_leaf_respected() -> ModelResult<()> {
        let (x, y) = step_data()?;
        let tree = fit(
            &x,
            &y,
            &TreeParams {
                min_samples_leaf: 4,
                ..TreeParams::default()
            },
        )?;
        // Any split of 6 rows leaves a child with fewer than 4
        assert_eq!(tree.n_nodes(), 1);
        Ok(())
    }

    #[test]
    fn test_only_leaves_store_output_vectors() -> ModelResult<()> {
        let rows: Vec<[f64; 1]> = (0..32).map(|i| [f64::from(i)]).collect();
        let targets: Vec<[f64; 2]> = (0..32).map(|i| [f64::from(i), f64::from(-i)]).collect();
        let x = DenseMatrix::from_rows(&rows)?;
        let y = DenseMatrix::from_rows(&targets)?;
        let tree = fit(&x, &y, &TreeParams::default())?;

        assert_eq!(tree.n_leaves(), 32);
        assert_eq!(tree.n_nodes(), 63);
        assert_eq!(tree.leaf_values.len(), tree.n_leaves() * tree.n_outputs());
        assert_eq!(tree.predict_row(&[7.0]), &[7.0, -7.0]);
        assert_eq!(tree.predict_row(&[31.0]), &[31.0, -31.0]);
        tree.validate()
    }

    #[test]
    fn test_validate_rejects_leaf_slot_out_of_range() -> ModelResult<()> {
        let (x, y) = step_data()?;
        let mut tree = fit(&x, &y, &TreeParams::default())?;
        let leaf = tree.is_leaf.iter().position(|leaf| *leaf).unwrap_or_default();
        tree.left_children[leaf] = 2;
        assert!(tree.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_validate_rejects_backward_child() -> ModelResult<()> {
        let (x, y) = step_data()?;
        let mut tree = fit(&x, &y, &TreeParams::default())?;
        tree.left_children[0] = 0;
        assert!(tree.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_midpoint_separates_adjacent_floats() {
        let low = 1.0_f64;
        let high = f64::from_bits(low.to_bits() + 1);
        let threshold = midpoint(low, high);
        assert!(low <= threshold);
        assert!(high > threshold);
    }
}
