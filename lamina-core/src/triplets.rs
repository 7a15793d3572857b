//! Sparse coordinate (COO) triplet accumulation
//!
//! [`SparseTriplets`] is the append-only result structure of a sparse
//! materialization: `(row, column, value)` entries in the coordinate
//! space of the selection that produced them, with the final shape fixed
//! up front. Growth is amortized through the backing vectors; callers
//! must never rebuild the buffers per batch.

use alloc::vec;
use alloc::vec::Vec;

/// Append-only (row, column, value) triplet list with a fixed shape
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseTriplets {
    shape: (usize, usize),
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl SparseTriplets {
    /// Create an empty triplet list with the given final shape
    pub fn new(shape: (usize, usize)) -> Self {
        Self::with_capacity(shape, 0)
    }

    /// Create an empty triplet list with pre-allocated capacity
    pub fn with_capacity(shape: (usize, usize), capacity: usize) -> Self {
        Self {
            shape,
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append one triplet
    ///
    /// Coordinates are in the output space declared by `shape`.
    pub fn push(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.shape.0 && col < self.shape.1);
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
    }

    /// Final shape of the represented matrix
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of stored triplets
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Whether no triplets are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row coordinates of the stored triplets
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Column coordinates of the stored triplets
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Values of the stored triplets
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate the stored `(row, col, value)` triplets in push order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&row, &col), &value)| (row, col, value))
    }

    /// Reconstruct a dense row-major matrix of `shape`
    ///
    /// Duplicate coordinates are summed, the usual COO convention. The
    /// materializer never emits duplicates because scan batches
    /// partition the column space.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.shape.0 * self.shape.1];
        for (row, col, value) in self.iter() {
            dense[row * self.shape.1 + col] += value;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iterate() {
        let mut triplets = SparseTriplets::new((2, 3));
        triplets.push(0, 1, 1.5);
        triplets.push(1, 2, -2.0);

        assert_eq!(triplets.shape(), (2, 3));
        assert_eq!(triplets.nnz(), 2);
        let collected: Vec<_> = triplets.iter().collect();
        assert_eq!(collected, vec![(0, 1, 1.5), (1, 2, -2.0)]);
    }

    #[test]
    fn test_to_dense_round_trip() {
        let mut triplets = SparseTriplets::new((2, 2));
        triplets.push(0, 0, 3.0);
        triplets.push(1, 1, 4.0);

        assert_eq!(triplets.to_dense(), vec![3.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn test_to_dense_sums_duplicates() {
        let mut triplets = SparseTriplets::new((1, 2));
        triplets.push(0, 0, 1.0);
        triplets.push(0, 0, 2.0);

        assert_eq!(triplets.to_dense(), vec![3.0, 0.0]);
    }

    #[test]
    fn test_empty_shape_is_preserved() {
        let triplets = SparseTriplets::new((4, 3));
        assert!(triplets.is_empty());
        assert_eq!(triplets.shape(), (4, 3));
        assert_eq!(triplets.to_dense().len(), 12);
    }
}
