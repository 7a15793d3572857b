//! The layer contract shared by in-memory and disk-backed matrices

use core::fmt;

use lamina_core::{BlockSlice, Result, Selection, SparseTriplets};
use ndarray::{Array2, ArrayView2};

/// Identity of a layer within its owning dataset
///
/// The default layer is the dataset's primary matrix; any other name
/// denotes an auxiliary matrix of the same rank. The variant is resolved
/// once at construction so access paths never branch on string
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayerName {
    /// The primary matrix (the empty name)
    Default,
    /// An auxiliary named matrix
    Named(String),
}

impl LayerName {
    /// Resolve a raw name; the empty string denotes the default layer
    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            LayerName::Default
        } else {
            LayerName::Named(name.to_owned())
        }
    }

    /// The raw name ("" for the default layer)
    pub fn as_str(&self) -> &str {
        match self {
            LayerName::Default => "",
            LayerName::Named(name) => name,
        }
    }

    /// Whether this is the default layer
    pub fn is_default(&self) -> bool {
        matches!(self, LayerName::Default)
    }
}

impl From<&str> for LayerName {
    fn from(name: &str) -> Self {
        LayerName::new(name)
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability set shared by every layer implementation
///
/// A layer is a named 2D matrix view with a fixed logical shape. Reads
/// and writes address rectangular sub-blocks through [`BlockSlice`];
/// sparse conversion produces coordinate triplets in the coordinate
/// space of the given selections.
pub trait Layer {
    /// The layer's identity within its owning dataset
    fn name(&self) -> &LayerName;

    /// Logical shape as (rows, cols)
    fn shape(&self) -> (usize, usize);

    /// Read the addressed sub-block as a dense array
    fn read(&self, slice: &BlockSlice) -> Result<Array2<f64>>;

    /// Write a dense block into the addressed sub-block
    ///
    /// The payload shape must equal the resolved slice shape; a
    /// disagreement is reported as `ShapeMismatch`.
    fn write(&mut self, slice: &BlockSlice, data: ArrayView2<'_, f64>) -> Result<()>;

    /// Convert the selected sub-matrix into sparse triplets
    ///
    /// Keeps strictly positive values only; the output shape is
    /// `(|rows|, |cols|)` regardless of how the data was scanned.
    fn to_sparse(&self, rows: &Selection, cols: &Selection) -> Result<SparseTriplets>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_resolution() {
        assert_eq!(LayerName::new(""), LayerName::Default);
        assert_eq!(LayerName::new("spliced"), LayerName::Named("spliced".into()));
        assert!(LayerName::from("").is_default());
        assert!(!LayerName::from("raw").is_default());
    }

    #[test]
    fn test_name_round_trip() {
        assert_eq!(LayerName::Default.as_str(), "");
        assert_eq!(LayerName::new("raw").as_str(), "raw");
        assert_eq!(LayerName::new("raw").to_string(), "raw");
        assert_eq!(LayerName::Default.to_string(), "");
    }
}
