//! Fully in-memory layer over a dense 2D array

use lamina_core::{BlockSlice, LayerError, Result, Selection, SparseTriplets};
use ndarray::{s, Array2, ArrayView2};

use crate::layer::{Layer, LayerName};

/// In-memory layer wrapping a fully materialized 2D array
///
/// The shape is fixed at construction to the array's shape. Typical use
/// is holding a previously sliced sub-dataset that fits in memory, for
/// example inside a [`LayerSetView`](crate::view::LayerSetView).
#[derive(Debug, Clone)]
pub struct DenseLayer {
    name: LayerName,
    values: Array2<f64>,
}

impl DenseLayer {
    /// Create a layer from a resident array
    pub fn new(name: impl Into<LayerName>, values: Array2<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Borrow the backing array
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Consume the layer, returning the backing array
    pub fn into_inner(self) -> Array2<f64> {
        self.values
    }
}

impl Layer for DenseLayer {
    fn name(&self) -> &LayerName {
        &self.name
    }

    fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    fn read(&self, slice: &BlockSlice) -> Result<Array2<f64>> {
        let (rows, cols) = slice.resolve(self.shape())?;
        Ok(self.values.slice(s![rows, cols]).to_owned())
    }

    fn write(&mut self, slice: &BlockSlice, data: ArrayView2<'_, f64>) -> Result<()> {
        let (rows, cols) = slice.resolve(self.shape())?;
        let expected = (rows.len(), cols.len());
        if data.dim() != expected {
            return Err(LayerError::ShapeMismatch {
                expected,
                actual: data.dim(),
            });
        }
        self.values.slice_mut(s![rows, cols]).assign(&data);
        Ok(())
    }

    fn to_sparse(&self, rows: &Selection, cols: &Selection) -> Result<SparseTriplets> {
        let (n_rows, n_cols) = self.shape();
        rows.validate(n_rows)?;
        cols.validate(n_cols)?;

        // Data is already resident, so triplets are built by direct
        // indexing; no chunked scan is involved.
        let mut triplets = SparseTriplets::new((rows.len(n_rows), cols.len(n_cols)));
        for (out_row, row) in rows.iter(n_rows).enumerate() {
            for (out_col, col) in cols.iter(n_cols).enumerate() {
                let value = self.values[[row, col]];
                // Strictly positive by policy; zero and negative values
                // are treated as absent.
                if value > 0.0 {
                    triplets.push(out_row, out_col, value);
                }
            }
        }
        Ok(triplets)
    }
}
