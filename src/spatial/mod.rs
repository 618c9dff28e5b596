//! Spatial data structures for targets and cells
//!
//! This module contains the pixel-level building blocks:
//! - Packed-RGB raster storage
//! - Target partitioning into the scoring cell grid

/// Target partitioning and the cell grid
pub mod grid;
/// Packed-RGB pixel storage
pub mod raster;

pub use grid::TargetGrid;
pub use raster::Raster;
