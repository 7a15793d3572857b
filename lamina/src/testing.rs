//! In-memory reference store for tests, examples, and benches
//!
//! [`MemStore`] fulfils the [`MatrixStore`]/[`ChunkedDataset`] boundary
//! contracts with plain resident arrays: resizable datasets with a
//! declared maximum shape, a column-batched scan with configurable
//! batch width, and optional failure injection for exercising the
//! all-or-nothing materialization law.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use hashbrown::HashMap;
use lamina_core::{LayerError, Result, Selection};
use ndarray::{Array2, ArrayView2};

use crate::layer::LayerName;
use crate::scan::ScanBatch;
use crate::store::{ChunkedDataset, MatrixStore, ResizeSpec};

/// Default number of columns per scan batch
pub const DEFAULT_BATCH_WIDTH: usize = 64;

/// Resident dataset with a declared maximum shape
#[derive(Debug, Clone)]
pub struct MemDataset {
    values: Array2<f64>,
    max_shape: (usize, usize),
}

impl MemDataset {
    /// Create a dataset; `max_shape` bounds all future resizes
    pub fn new(values: Array2<f64>, max_shape: (usize, usize)) -> Result<Self> {
        let shape = values.dim();
        if shape.0 > max_shape.0 || shape.1 > max_shape.1 {
            return Err(LayerError::Resize("initial shape exceeds maximum shape"));
        }
        Ok(Self { values, max_shape })
    }

    /// Borrow the resident values
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    fn check_block(&self, rows: &Range<usize>, cols: &Range<usize>) -> Result<()> {
        let (n_rows, n_cols) = self.values.dim();
        if rows.end > n_rows || cols.end > n_cols {
            return Err(LayerError::Io("block range beyond dataset extent"));
        }
        Ok(())
    }
}

impl ChunkedDataset for MemDataset {
    fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    fn read_block(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Array2<f64>> {
        self.check_block(&rows, &cols)?;
        Ok(self.values.slice(ndarray::s![rows, cols]).to_owned())
    }

    fn write_block(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
        data: ArrayView2<'_, f64>,
    ) -> Result<()> {
        self.check_block(&rows, &cols)?;
        if data.dim() != (rows.len(), cols.len()) {
            return Err(LayerError::Io("payload does not match block extents"));
        }
        self.values.slice_mut(ndarray::s![rows, cols]).assign(&data);
        Ok(())
    }

    fn resize(&mut self, spec: ResizeSpec) -> Result<()> {
        let current = self.values.dim();
        let target = spec.target(current);
        if target.0 > self.max_shape.0 || target.1 > self.max_shape.1 {
            return Err(LayerError::Resize("target extent exceeds maximum shape"));
        }

        // Coordinates are fixed: copy the overlapping block, zero-fill
        // any grown extent, drop anything beyond a shrunk extent.
        let mut resized = Array2::zeros(target);
        let keep = (current.0.min(target.0), current.1.min(target.1));
        resized
            .slice_mut(ndarray::s![..keep.0, ..keep.1])
            .assign(&self.values.slice(ndarray::s![..keep.0, ..keep.1]));
        self.values = resized;
        Ok(())
    }
}

/// In-memory store holding one primary dataset plus named layers
#[derive(Debug, Clone)]
pub struct MemStore {
    // The default dataset is inserted at construction and never removed.
    datasets: HashMap<LayerName, MemDataset>,
    batch_width: usize,
    fail_after: Option<usize>,
}

impl MemStore {
    /// Create a store around a primary matrix
    pub fn new(primary: Array2<f64>, max_shape: (usize, usize)) -> Result<Self> {
        let mut datasets = HashMap::new();
        datasets.insert(LayerName::Default, MemDataset::new(primary, max_shape)?);
        Ok(Self {
            datasets,
            batch_width: DEFAULT_BATCH_WIDTH,
            fail_after: None,
        })
    }

    /// Set the number of columns per scan batch
    pub fn with_batch_width(mut self, width: usize) -> Self {
        self.batch_width = width.max(1);
        self
    }

    /// Make every scan fail after yielding `batches` batches
    pub fn failing_after(mut self, batches: usize) -> Self {
        self.fail_after = Some(batches);
        self
    }

    /// Add a named dataset; it must match the primary shape at creation
    pub fn add_layer(&mut self, name: &str, values: Array2<f64>) -> Result<()> {
        let expected = self.shape();
        if values.dim() != expected {
            return Err(LayerError::ShapeMismatch {
                expected,
                actual: values.dim(),
            });
        }
        let max_shape = self.datasets[&LayerName::Default].max_shape;
        self.datasets
            .insert(LayerName::new(name), MemDataset::new(values, max_shape)?);
        Ok(())
    }

    /// Wrap the store in the shared handle layers are opened over
    pub fn into_handle(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

impl MatrixStore for MemStore {
    type Dataset = MemDataset;

    fn shape(&self) -> (usize, usize) {
        self.datasets[&LayerName::Default].shape()
    }

    fn dataset(&self, name: &LayerName) -> Result<&MemDataset> {
        self.datasets
            .get(name)
            .ok_or(LayerError::Io("no dataset for layer"))
    }

    fn dataset_mut(&mut self, name: &LayerName) -> Result<&mut MemDataset> {
        self.datasets
            .get_mut(name)
            .ok_or(LayerError::Io("no dataset for layer"))
    }

    fn batch_scan<'a>(
        &'a self,
        rows: &Selection,
        cols: &Selection,
        layer: &LayerName,
    ) -> Result<Box<dyn Iterator<Item = Result<ScanBatch>> + 'a>> {
        let dataset = self.dataset(layer)?;
        let (n_rows, n_cols) = dataset.shape();
        rows.validate(n_rows)?;
        cols.validate(n_cols)?;

        Ok(Box::new(MemBatchIter {
            dataset,
            row_idx: rows.to_indices(n_rows),
            col_idx: cols.to_indices(n_cols),
            batch_width: self.batch_width,
            fail_after: self.fail_after,
            next_col: 0,
            index: 0,
        }))
    }
}

/// Column-batched scan over a [`MemDataset`]
struct MemBatchIter<'a> {
    dataset: &'a MemDataset,
    row_idx: Vec<usize>,
    col_idx: Vec<usize>,
    batch_width: usize,
    fail_after: Option<usize>,
    next_col: usize,
    index: usize,
}

impl Iterator for MemBatchIter<'_> {
    type Item = Result<ScanBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_col >= self.col_idx.len() {
            return None;
        }
        if self.fail_after == Some(self.index) {
            self.next_col = self.col_idx.len();
            return Some(Err(LayerError::Scan("injected scan failure")));
        }

        let start = self.next_col;
        let end = (start + self.batch_width).min(self.col_idx.len());
        self.next_col = end;

        let mut values = Array2::zeros((self.row_idx.len(), end - start));
        for (local_col, &col) in self.col_idx[start..end].iter().enumerate() {
            for (local_row, &row) in self.row_idx.iter().enumerate() {
                values[[local_row, local_col]] = self.dataset.values[[row, col]];
            }
        }

        let batch = ScanBatch {
            index: self.index,
            // Output-space coordinates: positions within the selection.
            columns: (start..end).collect(),
            values,
        };
        self.index += 1;
        Some(Ok(batch))
    }
}
