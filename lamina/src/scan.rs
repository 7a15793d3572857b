//! Batch-driven sparse materialization
//!
//! Converts an arbitrarily large selected sub-matrix into coordinate
//! triplets without ever holding the dense selection in memory. The
//! caller (usually a [`DiskLayer`](crate::disk::DiskLayer)) supplies the
//! batch iterator from its store's
//! [`batch_scan`](crate::store::MatrixStore::batch_scan).

use lamina_core::{Result, Selection, SparseTriplets};
use ndarray::Array2;

/// One column batch produced by a store's batch scan
#[derive(Debug, Clone)]
pub struct ScanBatch {
    /// Position of this batch within the scan
    pub index: usize,
    /// Output-space column coordinate for each local column
    pub columns: Vec<usize>,
    /// Dense values, shape (selected rows, columns in this batch)
    pub values: Array2<f64>,
}

/// Fold column batches into sparse triplets
///
/// `shape` is the full layer shape; the output shape is
/// `(|rows|, |cols|)` and never depends on how many batches the scan
/// used. Only strictly positive values are kept - zero and negative
/// entries are treated as absent by policy.
///
/// The conversion is all-or-nothing: the first `Err` item aborts it and
/// the accumulated triplets are discarded.
pub fn materialize<I>(
    rows: &Selection,
    cols: &Selection,
    shape: (usize, usize),
    batches: I,
) -> Result<SparseTriplets>
where
    I: IntoIterator<Item = Result<ScanBatch>>,
{
    rows.validate(shape.0)?;
    cols.validate(shape.1)?;

    let out_shape = (rows.len(shape.0), cols.len(shape.1));
    let mut triplets = SparseTriplets::new(out_shape);

    for batch in batches {
        let batch = batch?;
        debug_assert_eq!(batch.values.ncols(), batch.columns.len());
        debug_assert_eq!(batch.values.nrows(), out_shape.0);

        for ((row, local_col), &value) in batch.values.indexed_iter() {
            if value > 0.0 {
                triplets.push(row, batch.columns[local_col], value);
            }
        }
    }

    Ok(triplets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::LayerError;
    use ndarray::array;

    fn batch(index: usize, columns: Vec<usize>, values: Array2<f64>) -> Result<ScanBatch> {
        Ok(ScanBatch {
            index,
            columns,
            values,
        })
    }

    #[test]
    fn test_filters_non_positive_values() {
        let batches = vec![batch(0, vec![0, 1, 2], array![[0.0, -1.0, 2.0]])];
        let triplets =
            materialize(&Selection::All, &Selection::All, (1, 3), batches).unwrap();

        assert_eq!(triplets.shape(), (1, 3));
        let collected: Vec<_> = triplets.iter().collect();
        assert_eq!(collected, vec![(0, 2, 2.0)]);
    }

    #[test]
    fn test_column_remapping_through_batches() {
        // Two batches covering output columns {2, 0} and {1}
        let batches = vec![
            batch(0, vec![2, 0], array![[1.0, 0.0], [0.0, 4.0]]),
            batch(1, vec![1], array![[3.0], [0.0]]),
        ];
        let triplets =
            materialize(&Selection::All, &Selection::All, (2, 3), batches).unwrap();

        let mut collected: Vec<_> = triplets.iter().collect();
        collected.sort_unstable_by_key(|&(row, col, _)| (row, col));
        assert_eq!(collected, vec![(0, 1, 3.0), (0, 2, 1.0), (1, 0, 4.0)]);
    }

    #[test]
    fn test_failure_is_all_or_nothing() {
        let batches = vec![
            batch(0, vec![0], array![[5.0]]),
            Err(LayerError::Scan("backend gone")),
        ];
        let result = materialize(&Selection::All, &Selection::All, (1, 2), batches);
        assert_eq!(result, Err(LayerError::Scan("backend gone")));
    }

    #[test]
    fn test_selection_bounds_checked_up_front() {
        let result = materialize(
            &Selection::from(vec![9]),
            &Selection::All,
            (2, 2),
            Vec::new(),
        );
        assert_eq!(result, Err(LayerError::IndexOutOfBounds));
    }

    #[test]
    fn test_empty_scan_yields_empty_triplets() {
        let triplets =
            materialize(&Selection::All, &Selection::All, (3, 4), Vec::new()).unwrap();
        assert!(triplets.is_empty());
        assert_eq!(triplets.shape(), (3, 4));
    }
}
