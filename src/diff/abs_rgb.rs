//! Absolute RGB channel distance scoring
//!
//! Scores a candidate against a cell as the sum over every pixel of
//! `|r1-r2| + |g1-g2| + |b1-b2|`. Totals accumulate in `u64`, which cannot
//! overflow: a cell of `n` pixels contributes at most `765 * n`.

use crate::diff::{CellScores, DiffFunction};
use crate::spatial::grid::TargetGrid;
use crate::spatial::raster::{Raster, unpack_rgb};

/// Sum-of-absolute-differences scoring over packed RGB channels
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsRgbDiff;

/// Per-cell totals of absolute channel differences (lower is better)
#[derive(Clone, Debug)]
pub struct AbsRgbScores {
    diffs: Vec<u64>,
}

impl AbsRgbScores {
    /// Raw per-cell totals in cell order
    pub fn diffs(&self) -> &[u64] {
        &self.diffs
    }
}

impl DiffFunction for AbsRgbDiff {
    type Scores = AbsRgbScores;

    fn score(&self, candidate: &Raster, grid: &TargetGrid) -> AbsRgbScores {
        AbsRgbScores {
            diffs: grid
                .cells()
                .iter()
                .map(|cell| raster_distance(cell, candidate))
                .collect(),
        }
    }
}

impl CellScores for AbsRgbScores {
    fn is_better(&self, cell: usize, other: &Self) -> bool {
        match (self.diffs.get(cell), other.diffs.get(cell)) {
            (Some(mine), Some(theirs)) => mine < theirs,
            _ => false,
        }
    }

    fn prefers(&self, first: usize, second: usize) -> bool {
        match (self.diffs.get(first), self.diffs.get(second)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}

/// Total channel distance between two equally sized rasters
fn raster_distance(a: &Raster, b: &Raster) -> u64 {
    a.pixels()
        .iter()
        .zip(b.pixels())
        .map(|(&pixel_a, &pixel_b)| pixel_distance(pixel_a, pixel_b))
        .sum()
}

const fn pixel_distance(a: u32, b: u32) -> u64 {
    let [ar, ag, ab] = unpack_rgb(a);
    let [br, bg, bb] = unpack_rgb(b);
    ar.abs_diff(br) as u64 + ag.abs_diff(bg) as u64 + ab.abs_diff(bb) as u64
}
