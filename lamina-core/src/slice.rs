//! Rank-2 range specifications for ranged reads and writes
//!
//! A [`BlockSlice`] addresses a rectangular sub-block of a layer in
//! (row, column) coordinate space. Each axis supports a single index, a
//! contiguous half-open range, an open-ended range, or the full axis.
//! Resolution always yields a rank-2 block: a single index becomes the
//! width-1 range `i..i + 1` rather than collapsing the axis.

use core::ops::Range;

use crate::error::{LayerError, Result};

/// Range specification along a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSlice {
    /// A single coordinate
    Index(usize),
    /// Contiguous half-open range `start..end`
    Range(usize, usize),
    /// Open-ended range `start..axis_len`
    From(usize),
    /// The full axis
    Full,
}

impl AxisSlice {
    /// Resolve into a concrete half-open range against an axis length
    pub fn resolve(self, axis_len: usize) -> Result<Range<usize>> {
        match self {
            AxisSlice::Index(i) => {
                if i >= axis_len {
                    return Err(LayerError::IndexOutOfBounds);
                }
                Ok(i..i + 1)
            }
            AxisSlice::Range(start, end) => {
                if start > end || end > axis_len {
                    return Err(LayerError::IndexOutOfBounds);
                }
                Ok(start..end)
            }
            AxisSlice::From(start) => {
                if start > axis_len {
                    return Err(LayerError::IndexOutOfBounds);
                }
                Ok(start..axis_len)
            }
            AxisSlice::Full => Ok(0..axis_len),
        }
    }
}

/// Rank-2 slice in (row, column) coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSlice {
    pub rows: AxisSlice,
    pub cols: AxisSlice,
}

impl BlockSlice {
    /// Create a slice from two axis specifications
    pub fn new(rows: AxisSlice, cols: AxisSlice) -> Self {
        Self { rows, cols }
    }

    /// The slice covering the whole matrix
    pub const fn full() -> Self {
        Self {
            rows: AxisSlice::Full,
            cols: AxisSlice::Full,
        }
    }

    /// Resolve both axes against a matrix shape
    pub fn resolve(&self, shape: (usize, usize)) -> Result<(Range<usize>, Range<usize>)> {
        let rows = self.rows.resolve(shape.0)?;
        let cols = self.cols.resolve(shape.1)?;
        Ok((rows, cols))
    }

    /// Shape of the block this slice addresses within the given matrix
    pub fn shape(&self, shape: (usize, usize)) -> Result<(usize, usize)> {
        let (rows, cols) = self.resolve(shape)?;
        Ok((rows.len(), cols.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_resolution() {
        assert_eq!(AxisSlice::Full.resolve(5), Ok(0..5));
        assert_eq!(AxisSlice::Index(2).resolve(5), Ok(2..3));
        assert_eq!(AxisSlice::Range(1, 4).resolve(5), Ok(1..4));
        assert_eq!(AxisSlice::From(3).resolve(5), Ok(3..5));

        // Empty ranges are valid
        assert_eq!(AxisSlice::Range(2, 2).resolve(5), Ok(2..2));
        assert_eq!(AxisSlice::From(5).resolve(5), Ok(5..5));
        assert_eq!(AxisSlice::Full.resolve(0), Ok(0..0));
    }

    #[test]
    fn test_axis_bounds_errors() {
        assert_eq!(
            AxisSlice::Index(5).resolve(5),
            Err(LayerError::IndexOutOfBounds)
        );
        assert_eq!(
            AxisSlice::Range(1, 6).resolve(5),
            Err(LayerError::IndexOutOfBounds)
        );
        assert_eq!(
            AxisSlice::Range(4, 2).resolve(5),
            Err(LayerError::IndexOutOfBounds)
        );
        assert_eq!(
            AxisSlice::From(6).resolve(5),
            Err(LayerError::IndexOutOfBounds)
        );
    }

    #[test]
    fn test_block_shape() {
        let slice = BlockSlice::new(AxisSlice::Range(0, 2), AxisSlice::Index(1));
        assert_eq!(slice.shape((4, 3)), Ok((2, 1)));
        assert_eq!(BlockSlice::full().shape((4, 3)), Ok((4, 3)));
    }
}
