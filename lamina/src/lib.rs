//! Lamina - Layered Access to Chunked 2D Matrices
//!
//! This library presents a uniform "layer" abstraction over large
//! two-dimensional numeric matrices that may be too big to hold in
//! memory. A layer can be fully resident ([`DenseLayer`]) or backed by a
//! named dataset inside a chunked container ([`DiskLayer`]); both expose
//! the same sliced read/write contract and the same conversion into a
//! sparse coordinate representation.
//!
//! ## Architecture
//!
//! Lamina follows a contract/implementation separation:
//!
//! - **lamina-core**: pure definitions (errors, type tags, selections,
//!   range specs, triplet accumulation) with no I/O
//! - **lamina**: concrete layers, the batch-scan materializer, the
//!   aggregate view, and the boundary traits a storage backend fulfils
//!
//! ## Quick Start
//!
//! ```
//! use lamina::{DenseLayer, Layer, Selection};
//! use ndarray::array;
//!
//! let layer = DenseLayer::new("", array![[0.0, 1.0], [2.0, 0.0]]);
//! let sparse = layer.to_sparse(&Selection::All, &Selection::All)?;
//! assert_eq!(sparse.nnz(), 2);
//! assert_eq!(sparse.shape(), (2, 2));
//! # Ok::<(), lamina::LayerError>(())
//! ```
//!
//! ## Sparse materialization
//!
//! Converting a disk-backed layer never materializes the dense
//! selection: the owning store supplies bounded-width column batches and
//! [`scan::materialize`] folds them into [`SparseTriplets`], strictly
//! keeping values greater than zero. Any mid-scan failure aborts the
//! whole conversion; no partial result is ever returned.
//!
//! ## Concurrency model
//!
//! Everything here is single-threaded, synchronous, and blocking. The
//! backing store handle assumes exclusive ownership for the duration of
//! any write or resize; cross-process serialization is the caller's
//! concern.

// Re-export core contracts
pub use lamina_core::{
    AxisSlice, BlockSlice, DataType, LayerError, Result, Selection, SparseTriplets,
};

// Implementation modules
pub mod dense;
pub mod disk;
pub mod layer;
pub mod scan;
pub mod store;
pub mod testing;
pub mod view;

// Public exports
pub use dense::DenseLayer;
pub use disk::DiskLayer;
pub use layer::{Layer, LayerName};
pub use scan::{materialize, ScanBatch};
pub use store::{Axis, ChunkedDataset, MatrixStore, ResizeSpec};
pub use view::{AttrValues, LayerSetView};
