//! Disk-backed layer over a shared chunked store handle

use std::cell::RefCell;
use std::rc::Rc;

use lamina_core::{BlockSlice, DataType, LayerError, Result, Selection, SparseTriplets};
use ndarray::{Array2, ArrayView2};

use crate::layer::{Layer, LayerName};
use crate::scan;
use crate::store::{ChunkedDataset, MatrixStore, ResizeSpec};

/// Layer backed by a named dataset inside a chunked container
///
/// The layer is a non-owning view: the store handle is shared through
/// `Rc` and outlives every layer created from it, while `RefCell`
/// enforces the single-writer rule at run time. Writes are cast into the
/// declared element type before they reach the backend.
pub struct DiskLayer<S: MatrixStore> {
    store: Rc<RefCell<S>>,
    name: LayerName,
    dtype: DataType,
    shape: (usize, usize),
}

impl<S: MatrixStore> DiskLayer<S> {
    /// Open a layer over an existing dataset in the store
    ///
    /// Fails with `Io` if the store has no dataset for `name`. The shape
    /// mirrors the store's primary matrix for the default layer and the
    /// named dataset otherwise.
    pub fn open(store: Rc<RefCell<S>>, name: impl Into<LayerName>, dtype: DataType) -> Result<Self> {
        let name = name.into();
        let shape = {
            let store = store.borrow();
            if name.is_default() {
                store.dataset(&name)?;
                store.shape()
            } else {
                store.dataset(&name)?.shape()
            }
        };
        Ok(Self {
            store,
            name,
            dtype,
            shape,
        })
    }

    /// The declared element type writes are cast into
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Grow or shrink the backing dataset
    ///
    /// Each axis changes independently; existing data below the new
    /// extent keeps its coordinates (this is not a reshape), shrunk data
    /// is discarded, and grown extent is backend-default initialized.
    /// Fails with `Resize` if the dataset is not resizable that far.
    pub fn resize(&mut self, spec: ResizeSpec) -> Result<()> {
        let mut store = self.store.borrow_mut();
        let dataset = store.dataset_mut(&self.name)?;
        dataset.resize(spec)?;
        self.shape = dataset.shape();
        Ok(())
    }
}

impl<S: MatrixStore> Layer for DiskLayer<S> {
    fn name(&self) -> &LayerName {
        &self.name
    }

    fn shape(&self) -> (usize, usize) {
        self.shape
    }

    fn read(&self, slice: &BlockSlice) -> Result<Array2<f64>> {
        let (rows, cols) = slice.resolve(self.shape)?;
        self.store.borrow().dataset(&self.name)?.read_block(rows, cols)
    }

    fn write(&mut self, slice: &BlockSlice, data: ArrayView2<'_, f64>) -> Result<()> {
        let (rows, cols) = slice.resolve(self.shape)?;
        let expected = (rows.len(), cols.len());
        if data.dim() != expected {
            return Err(LayerError::ShapeMismatch {
                expected,
                actual: data.dim(),
            });
        }

        // Cast the whole payload before touching the backend so a
        // failing cast leaves persisted state unchanged.
        let mut cast = data.to_owned();
        for value in cast.iter_mut() {
            *value = self.dtype.cast(*value)?;
        }

        self.store
            .borrow_mut()
            .dataset_mut(&self.name)?
            .write_block(rows, cols, cast.view())
    }

    fn to_sparse(&self, rows: &Selection, cols: &Selection) -> Result<SparseTriplets> {
        let store = self.store.borrow();
        let batches = store.batch_scan(rows, cols, &self.name)?;
        scan::materialize(rows, cols, self.shape, batches)
    }
}
