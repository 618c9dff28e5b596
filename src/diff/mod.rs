//! Pluggable image similarity scoring
//!
//! A diff function turns one normalized candidate into a vector of per-cell
//! scores against the target grid. Scores are only ever compared through the
//! [`CellScores`] trait, so "better" can mean lower (absolute RGB distance)
//! or higher (structural similarity) without the assignment engine knowing
//! which.

use crate::spatial::grid::TargetGrid;
use crate::spatial::raster::Raster;

/// Absolute RGB channel distance scoring
pub mod abs_rgb;
/// Structural similarity scoring
pub mod ssim;

pub use abs_rgb::{AbsRgbDiff, AbsRgbScores};
pub use ssim::{SsimDiff, SsimScores};

/// Per-cell score vector produced by scoring one candidate
///
/// Both comparisons are strict; a tie is never an improvement. Cell indices
/// are flat row-major positions in the target grid.
pub trait CellScores {
    /// Whether this candidate is strictly better than `other` at `cell`
    fn is_better(&self, cell: usize, other: &Self) -> bool;

    /// Whether this candidate fits `first` strictly better than `second`
    fn prefers(&self, first: usize, second: usize) -> bool;
}

/// A scoring strategy comparing candidates against every target cell
///
/// Implementations are stateless and side-effect free; scoring runs from
/// many threads at once over a shared reference.
pub trait DiffFunction: Sync {
    /// Score vector type produced for each candidate
    type Scores: CellScores + Send;

    /// Score a normalized candidate against every cell of the grid
    ///
    /// The returned vector holds exactly one entry per grid cell, in cell
    /// order. The candidate raster has already been scaled to cell size.
    fn score(&self, candidate: &Raster, grid: &TargetGrid) -> Self::Scores;
}

/// Available scoring strategies, selectable at run time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiffKind {
    /// Sum of absolute RGB channel differences (lower is better)
    #[default]
    AbsRgb,
    /// Global structural similarity over luma (higher is better)
    Ssim,
}
