#![no_std]

//! Lamina Core - Layer Contracts for Chunked Matrix Access
//!
//! This crate provides the pure definitions shared by every lamina layer
//! implementation: the error taxonomy, element type tags, axis
//! selections, rank-2 range specifications, and the sparse triplet
//! accumulator. It contains no I/O and no backend code.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod dtype;
pub mod error;
#[cfg(feature = "alloc")]
pub mod selection;
pub mod slice;
#[cfg(feature = "alloc")]
pub mod triplets;

pub use dtype::*;
pub use error::*;
#[cfg(feature = "alloc")]
pub use selection::*;
pub use slice::*;
#[cfg(feature = "alloc")]
pub use triplets::*;
