//! Element type tags for layer storage
//!
//! A disk-backed layer declares the numeric type its values are stored
//! as; writes are cast through that type before they reach the backend.
//! Casts that would change a value beyond normal narrowing are reported
//! as errors, never silently widened.

use crate::error::{LayerError, Result};

/// Numeric storage types a layer can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    F32 = 0,
    F64 = 1,
    I32 = 2,
    I64 = 3,
    U32 = 4,
    U64 = 5,
}

impl DataType {
    /// Parse a type tag string
    ///
    /// Accepts both Rust-style tags ("f32", "u64") and NumPy-style tags
    /// ("float32", "uint64") since dataset metadata commonly carries
    /// either form. Returns `None` for unknown tags.
    pub fn parse(tag: &str) -> Option<DataType> {
        match tag {
            "f32" | "float32" => Some(DataType::F32),
            "f64" | "float64" => Some(DataType::F64),
            "i32" | "int32" => Some(DataType::I32),
            "i64" | "int64" => Some(DataType::I64),
            "u32" | "uint32" => Some(DataType::U32),
            "u64" | "uint64" => Some(DataType::U64),
            _ => None,
        }
    }

    /// Get the size in bytes for this data type
    pub const fn size_bytes(&self) -> usize {
        match self {
            DataType::F32 | DataType::I32 | DataType::U32 => 4,
            DataType::F64 | DataType::I64 | DataType::U64 => 8,
        }
    }

    /// Cast a value into this storage type, checking representability
    ///
    /// Integer kinds reject non-finite, fractional, and out-of-range
    /// values. `F32` rejects finite values that overflow to infinity;
    /// in-range values round to the nearest f32, which is ordinary
    /// narrowing, not an error. `F64` is the identity.
    pub fn cast(self, value: f64) -> Result<f64> {
        let mismatch = LayerError::TypeCast { dtype: self, value };
        match self {
            DataType::F64 => Ok(value),
            DataType::F32 => {
                let narrowed = value as f32;
                if value.is_finite() && !narrowed.is_finite() {
                    return Err(mismatch);
                }
                Ok(narrowed as f64)
            }
            // Float-to-int casts saturate, so an exact round-trip holds
            // iff the value is integral and in range. NaN round-trips to
            // zero and is rejected by the comparison.
            DataType::I32 => {
                if value == (value as i32) as f64 {
                    Ok(value)
                } else {
                    Err(mismatch)
                }
            }
            // At 64 bits the round-trip alone is not enough: 2^63
            // saturates to i64::MAX, which rounds back to 2^63 (and
            // 2^64 likewise for u64), so the upper bound is checked
            // explicitly.
            DataType::I64 => {
                if value < 9_223_372_036_854_775_808.0 && value == (value as i64) as f64 {
                    Ok(value)
                } else {
                    Err(mismatch)
                }
            }
            DataType::U32 => {
                if value == (value as u32) as f64 {
                    Ok(value)
                } else {
                    Err(mismatch)
                }
            }
            DataType::U64 => {
                if value < 18_446_744_073_709_551_616.0 && value == (value as u64) as f64 {
                    Ok(value)
                } else {
                    Err(mismatch)
                }
            }
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U32 => write!(f, "u32"),
            DataType::U64 => write!(f, "u64"),
        }
    }
}
