//! Error types for layer operations

use crate::dtype::DataType;

/// Errors that can occur during layer operations
///
/// Every failure is surfaced to the immediate caller as one of these
/// variants; nothing is swallowed or downgraded to a default value, and
/// there is no retry policy at this level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerError {
    /// Write payload shape disagrees with the target slice shape
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Slice or selection index beyond the layer shape
    IndexOutOfBounds,
    /// Backend read, write, or lookup failure, including use of a
    /// closed or invalid handle and invalid backend ranges
    Io(&'static str),
    /// Value cannot be represented in the layer's declared element type
    TypeCast { dtype: DataType, value: f64 },
    /// Resize beyond the declared maximum extent, or the backend was not
    /// created resizable
    Resize(&'static str),
    /// An aggregate view has no default layer but a default-layer
    /// operation was requested
    MissingDefaultLayer,
    /// Two layers with the same name were supplied to an aggregate view
    DuplicateLayer,
    /// The batch-scan collaborator failed mid-iteration
    Scan(&'static str),
}

impl core::fmt::Display for LayerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LayerError::ShapeMismatch { expected, actual } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            LayerError::IndexOutOfBounds => write!(f, "index out of bounds"),
            LayerError::Io(msg) => write!(f, "backend I/O failure: {msg}"),
            LayerError::TypeCast { dtype, value } => {
                write!(f, "value {value} is not representable as {dtype}")
            }
            LayerError::Resize(msg) => write!(f, "resize rejected: {msg}"),
            LayerError::MissingDefaultLayer => write!(f, "no default layer present"),
            LayerError::DuplicateLayer => write!(f, "duplicate layer name"),
            LayerError::Scan(msg) => write!(f, "batch scan failed: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for LayerError {}

/// Result type for layer operations
pub type Result<T> = core::result::Result<T, LayerError>;
