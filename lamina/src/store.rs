//! Boundary interfaces to the chunked storage backend
//!
//! These traits describe what the core needs from a storage backend: a
//! named dataset supporting ranged reads/writes and axis-independent
//! resize, and an owning connection that can look datasets up and drive
//! a column-batched scan. The container itself (file layout, chunking,
//! compression) lives entirely behind these interfaces.

use std::ops::Range;

use lamina_core::{Result, Selection};
use ndarray::{Array2, ArrayView2};

use crate::layer::LayerName;
use crate::scan::ScanBatch;

/// Axis of a rank-2 dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

/// Target extents for a resize
///
/// `PerAxis` grows or shrinks a single extent and leaves the other
/// untouched; `Full` names both extents at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeSpec {
    /// New extents for both axes
    Full(usize, usize),
    /// New extent along one axis only
    PerAxis { axis: Axis, extent: usize },
}

impl ResizeSpec {
    /// Resolve into absolute target extents given the current shape
    pub fn target(self, current: (usize, usize)) -> (usize, usize) {
        match self {
            ResizeSpec::Full(rows, cols) => (rows, cols),
            ResizeSpec::PerAxis {
                axis: Axis::Rows,
                extent,
            } => (extent, current.1),
            ResizeSpec::PerAxis {
                axis: Axis::Cols,
                extent,
            } => (current.0, extent),
        }
    }
}

/// Ranged access to one named dataset inside a chunked container
///
/// Resizing is NOT a reshape: existing data keeps its coordinates, data
/// beyond a shrunk extent is discarded, and grown extent is filled with
/// the backend default (zero). Implementations report `Resize` when the
/// dataset was not created resizable or the target exceeds its declared
/// maximum shape.
pub trait ChunkedDataset {
    /// Current shape as (rows, cols)
    fn shape(&self) -> (usize, usize);

    /// Read a rectangular block
    fn read_block(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Array2<f64>>;

    /// Write a rectangular block; `data` must match the range extents
    fn write_block(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
        data: ArrayView2<'_, f64>,
    ) -> Result<()>;

    /// Grow or shrink the dataset without reshuffling
    fn resize(&mut self, spec: ResizeSpec) -> Result<()>;
}

/// The owning connection over a chunked container
///
/// Exposes the primary matrix shape, dataset lookup by layer name, and
/// the batch-scan primitive the sparse materializer drives.
pub trait MatrixStore {
    /// Concrete dataset handle type
    type Dataset: ChunkedDataset;

    /// Shape of the primary (default layer) matrix
    fn shape(&self) -> (usize, usize);

    /// Look up the dataset backing a layer
    fn dataset(&self, name: &LayerName) -> Result<&Self::Dataset>;

    /// Look up the dataset backing a layer, mutably
    fn dataset_mut(&mut self, name: &LayerName) -> Result<&mut Self::Dataset>;

    /// Drive a lazy, finite scan over the selected columns of a layer
    ///
    /// Contract required by the materializer:
    /// - batches partition the selected column space, so no coordinate
    ///   appears in two batches;
    /// - [`ScanBatch::columns`] holds output-space coordinates, i.e.
    ///   positions within `cols` (or within `0..n_cols` for `All`);
    /// - [`ScanBatch::values`] is dense with one row per selected row,
    ///   in selection order;
    /// - each call produces a fresh iteration over the full range;
    /// - a mid-iteration failure is yielded as an `Err` item and ends
    ///   the scan.
    #[allow(clippy::type_complexity)]
    fn batch_scan<'a>(
        &'a self,
        rows: &Selection,
        cols: &Selection,
        layer: &LayerName,
    ) -> Result<Box<dyn Iterator<Item = Result<ScanBatch>> + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_target_resolution() {
        assert_eq!(ResizeSpec::Full(6, 3).target((4, 3)), (6, 3));
        assert_eq!(
            ResizeSpec::PerAxis {
                axis: Axis::Rows,
                extent: 6
            }
            .target((4, 3)),
            (6, 3)
        );
        assert_eq!(
            ResizeSpec::PerAxis {
                axis: Axis::Cols,
                extent: 8
            }
            .target((4, 3)),
            (4, 8)
        );
    }
}
