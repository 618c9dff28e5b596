//! Photographic mosaic generation by greedy cell assignment
//!
//! The crate partitions a target image into a grid of cells, scores a
//! library of candidate tile images against every cell, and greedily assigns
//! candidates to the cells they match best, evicting weaker occupants as
//! better ones arrive. The winning assignment is composited into a single
//! JPEG at the largest size the pixel budget allows.

#![forbid(unsafe_code)]

/// Greedy cell assignment and usage accounting
pub mod assignment;
/// Mosaic configuration and run orchestration
pub mod collage;
/// Scoring functions comparing candidates to target cells
pub mod diff;
/// Input/output operations and error handling
pub mod io;
/// Composition of the winning assignment into the output image
pub mod render;
/// Spatial data structures for targets and cells
pub mod spatial;

pub use collage::{Mosaic, MosaicBuilder};
pub use io::error::{MosaicError, Result};
