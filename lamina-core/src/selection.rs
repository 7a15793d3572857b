//! Axis selections for sub-matrix access
//!
//! A selection names an ordered subset of the coordinates along one
//! axis. The absent selection (`All`) is equivalent to the full ordered
//! range `0..n` of whatever axis it is applied to.

use alloc::vec::Vec;

use crate::error::{LayerError, Result};

/// Ordered index subset along one axis
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Every coordinate of the axis, in order
    All,
    /// An explicit ordered list of coordinates
    Indices(Vec<usize>),
}

impl Selection {
    /// Whether this selection covers the whole axis
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Number of selected coordinates for an axis of the given length
    pub fn len(&self, axis_len: usize) -> usize {
        match self {
            Selection::All => axis_len,
            Selection::Indices(indices) => indices.len(),
        }
    }

    /// Whether the selection is empty for an axis of the given length
    pub fn is_empty(&self, axis_len: usize) -> bool {
        self.len(axis_len) == 0
    }

    /// Check every selected coordinate against the axis length
    pub fn validate(&self, axis_len: usize) -> Result<()> {
        if let Selection::Indices(indices) = self {
            if indices.iter().any(|&i| i >= axis_len) {
                return Err(LayerError::IndexOutOfBounds);
            }
        }
        Ok(())
    }

    /// Map a local (selection-space) position to its axis coordinate
    ///
    /// # Panics
    ///
    /// Panics if `local` is not a valid position within the selection.
    pub fn index(&self, local: usize) -> usize {
        match self {
            Selection::All => local,
            Selection::Indices(indices) => indices[local],
        }
    }

    /// Iterate the selected axis coordinates in order
    pub fn iter(&self, axis_len: usize) -> SelectionIter<'_> {
        match self {
            Selection::All => SelectionIter::All(0..axis_len),
            Selection::Indices(indices) => SelectionIter::Indices(indices.iter()),
        }
    }

    /// Collect the selected axis coordinates into a vector
    pub fn to_indices(&self, axis_len: usize) -> Vec<usize> {
        self.iter(axis_len).collect()
    }
}

impl From<Vec<usize>> for Selection {
    fn from(indices: Vec<usize>) -> Self {
        Selection::Indices(indices)
    }
}

/// Iterator over the coordinates of a [`Selection`]
pub enum SelectionIter<'a> {
    All(core::ops::Range<usize>),
    Indices(core::slice::Iter<'a, usize>),
}

impl Iterator for SelectionIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            SelectionIter::All(range) => range.next(),
            SelectionIter::Indices(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            SelectionIter::All(range) => range.size_hint(),
            SelectionIter::Indices(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for SelectionIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_all_is_full_ordered_range() {
        let sel = Selection::All;
        assert_eq!(sel.len(4), 4);
        assert_eq!(sel.to_indices(4), vec![0, 1, 2, 3]);
        assert_eq!(sel.index(2), 2);
        assert!(sel.validate(0).is_ok());
    }

    #[test]
    fn test_indices_keep_order() {
        let sel = Selection::from(vec![3, 0, 2]);
        assert_eq!(sel.len(10), 3);
        assert_eq!(sel.to_indices(10), vec![3, 0, 2]);
        assert_eq!(sel.index(0), 3);
        assert_eq!(sel.index(2), 2);
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let sel = Selection::from(vec![0, 5]);
        assert!(sel.validate(6).is_ok());
        assert_eq!(sel.validate(5), Err(LayerError::IndexOutOfBounds));
    }

    #[test]
    fn test_empty_selection() {
        let sel = Selection::from(vec![]);
        assert!(sel.is_empty(10));
        assert!(!Selection::All.is_empty(10));
        assert!(Selection::All.is_empty(0));
    }
}
