// ABOUTME: Row-major dense matrix used for feature and target tables
// ABOUTME: Minimal storage with shape checks on construction and row access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Dense `f64` matrix in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    n_cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Empty matrix with a fixed column count
    #[must_use]
    pub const fn with_columns(n_cols: usize) -> Self {
        Self {
            n_cols,
            data: Vec::new(),
        }
    }

    /// Empty matrix with room for `n_rows` rows
    #[must_use]
    pub fn with_capacity(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_cols,
            data: Vec::with_capacity(n_rows * n_cols),
        }
    }

    /// Build from row slices
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if any row differs in width from the first
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> ModelResult<Self> {
        let n_cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut matrix = Self::with_capacity(rows.len(), n_cols);
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        Ok(matrix)
    }

    /// Append a row
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the row width differs from the column count
    pub fn push_row(&mut self, row: &[f64]) -> ModelResult<()> {
        if row.len() != self.n_cols {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_cols,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Number of rows
    #[must_use]
    pub fn n_rows(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.data.len() / self.n_cols
        }
    }

    /// Number of columns
    #[must_use]
    pub const fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Whether the matrix has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row slice; panics on out-of-range index like slice indexing
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// Single cell
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n_cols + col]
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n_cols.max(1))
    }

    /// Copy of the selected rows, in the given order
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut selected = Self::with_capacity(indices.len(), self.n_cols);
        for &index in indices {
            selected.data.extend_from_slice(self.row(index));
        }
        selected
    }

    /// Values of one column, in row order
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(move |row| row[col])
    }
}
