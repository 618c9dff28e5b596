//! Structural similarity scoring over luma statistics
//!
//! Computes a single global SSIM value per cell from luma mean, population
//! variance, and covariance, stabilized by the standard `c1`/`c2` constants
//! for 8-bit dynamic range. Cells are small enough that global statistics
//! discriminate well; windowed SSIM is deliberately not implemented.
//!
//! The candidate's luma vector and its statistics are computed once per
//! candidate and reused across every cell comparison.

use crate::diff::{CellScores, DiffFunction};
use crate::spatial::grid::TargetGrid;
use crate::spatial::raster::{Raster, unpack_rgb};

const K1: f64 = 0.01;
const K2: f64 = 0.03;
const LUMA_RANGE: f64 = 255.0;
const C1: f64 = (K1 * LUMA_RANGE) * (K1 * LUMA_RANGE);
const C2: f64 = (K2 * LUMA_RANGE) * (K2 * LUMA_RANGE);

/// Structural similarity scoring over luma
#[derive(Clone, Copy, Debug, Default)]
pub struct SsimDiff;

/// Per-cell SSIM values (higher is better)
#[derive(Clone, Debug)]
pub struct SsimScores {
    ssims: Vec<f64>,
}

impl SsimScores {
    /// Raw per-cell SSIM values in cell order
    pub fn ssims(&self) -> &[f64] {
        &self.ssims
    }
}

impl DiffFunction for SsimDiff {
    type Scores = SsimScores;

    fn score(&self, candidate: &Raster, grid: &TargetGrid) -> SsimScores {
        let candidate_lumas = lumas(candidate);
        let candidate_mean = mean(&candidate_lumas);
        let candidate_variance = variance(&candidate_lumas, candidate_mean);

        SsimScores {
            ssims: grid
                .cells()
                .iter()
                .map(|cell| ssim(cell, &candidate_lumas, candidate_mean, candidate_variance))
                .collect(),
        }
    }
}

impl CellScores for SsimScores {
    fn is_better(&self, cell: usize, other: &Self) -> bool {
        match (self.ssims.get(cell), other.ssims.get(cell)) {
            (Some(mine), Some(theirs)) => mine > theirs,
            _ => false,
        }
    }

    fn prefers(&self, first: usize, second: usize) -> bool {
        match (self.ssims.get(first), self.ssims.get(second)) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }
}

/// Rec. 709 luma for every pixel of a raster
fn lumas(raster: &Raster) -> Vec<f64> {
    raster
        .pixels()
        .iter()
        .map(|&pixel| {
            let [r, g, b] = unpack_rgb(pixel);
            (r as f64).mul_add(0.2126, (g as f64).mul_add(0.7152, 0.0722 * b as f64))
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n, not n - 1)
fn variance(values: &[f64], average: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|&value| (value - average).powi(2)).sum();
    sum / values.len() as f64
}

fn covariance(a: &[f64], a_mean: f64, b: &[f64], b_mean: f64) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (x - a_mean) * (y - b_mean))
        .sum();
    sum / a.len() as f64
}

fn ssim(
    cell: &Raster,
    candidate_lumas: &[f64],
    candidate_mean: f64,
    candidate_variance: f64,
) -> f64 {
    let cell_lumas = lumas(cell);
    let cell_mean = mean(&cell_lumas);
    let cell_variance = variance(&cell_lumas, cell_mean);
    let cov = covariance(&cell_lumas, cell_mean, candidate_lumas, candidate_mean);

    let numerator = (2.0 * cell_mean).mul_add(candidate_mean, C1) * 2.0_f64.mul_add(cov, C2);
    let denominator = cell_mean.mul_add(
        cell_mean,
        candidate_mean.mul_add(candidate_mean, C1),
    ) * (cell_variance + candidate_variance + C2);
    numerator / denominator
}
