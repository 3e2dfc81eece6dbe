//! Core types and utilities for the Mosaic grid engine.
//!
//! This crate provides the foundational types used across all other mosaic crates:
//! - Block identity and column-span types
//! - The committed block sequence and its structural layout key
//! - Screen-space geometry
//! - Error types

pub mod errors;
pub mod geometry;
pub mod sequence;
pub mod types;

pub use errors::*;
pub use geometry::*;
pub use sequence::*;
pub use types::*;
