//! Mosaic composition from assignment results
//!
//! This module turns the frozen assignment table into pixels:
//! - Crop strategies fitting candidates to the tile aspect ratio
//! - The compiler that re-decodes candidates and fills the canvas

/// Final mosaic composition
pub mod compiler;
/// Tile cropping strategies
pub mod crop;

pub use compiler::compile;
pub use crop::{CropRegion, CropStrategy};
