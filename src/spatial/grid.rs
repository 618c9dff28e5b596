//! Target image partitioning into the mosaic cell grid
//!
//! Divides a target raster into equally sized rectangular cells in row-major
//! order. Cell dimensions are floored, so remainder pixels along the right and
//! bottom edges of the target never participate in scoring or composition.

use crate::io::configuration::{ASPECT_RATIO_TOLERANCE_MAX, ASPECT_RATIO_TOLERANCE_MIN};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::raster::Raster;

/// The target image partitioned into scoring cells
///
/// Cells are stored row-major (left to right, top to bottom) so a flat cell
/// index and a (row, column) pair are interchangeable everywhere downstream.
#[derive(Clone, Debug)]
pub struct TargetGrid {
    cells: Vec<Raster>,
    columns: u32,
    rows: u32,
    cell_width: u32,
    cell_height: u32,
}

impl TargetGrid {
    /// Partition a target raster into `columns * rows` equally sized cells
    ///
    /// # Errors
    ///
    /// Returns [`crate::io::error::MosaicError::InvalidParameter`] when either
    /// count is zero or exceeds the target dimension, since both produce
    /// zero-sized cells.
    pub fn partition(target: &Raster, columns: u32, rows: u32) -> Result<Self> {
        if columns == 0 {
            return Err(invalid_parameter(
                "horizontal_sub_sections",
                &columns,
                &"must be at least one",
            ));
        }
        if rows == 0 {
            return Err(invalid_parameter(
                "vertical_sub_sections",
                &rows,
                &"must be at least one",
            ));
        }

        let cell_width = target.width() / columns;
        let cell_height = target.height() / rows;
        if cell_width == 0 {
            return Err(invalid_parameter(
                "horizontal_sub_sections",
                &columns,
                &format!("target is only {} pixels wide", target.width()),
            ));
        }
        if cell_height == 0 {
            return Err(invalid_parameter(
                "vertical_sub_sections",
                &rows,
                &format!("target is only {} pixels tall", target.height()),
            ));
        }

        let mut cells = Vec::with_capacity((columns as usize) * (rows as usize));
        for row in 0..rows {
            for column in 0..columns {
                cells.push(target.sub_raster(
                    column * cell_width,
                    row * cell_height,
                    cell_width,
                    cell_height,
                ));
            }
        }

        Ok(Self {
            cells,
            columns,
            rows,
            cell_width,
            cell_height,
        })
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[Raster] {
        &self.cells
    }

    /// Number of cell columns
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Width of every cell in pixels
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Height of every cell in pixels
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    /// Whether a candidate of the given native size may be scored
    ///
    /// Compares the candidate aspect ratio against the cell aspect ratio;
    /// agreement must be strictly within one percent. Scaling a candidate
    /// that passes this gate to cell size distorts it imperceptibly.
    pub const fn accepts_aspect(&self, width: u32, height: u32) -> bool {
        let candidate = width as f64 / height as f64;
        let cell = self.cell_width as f64 / self.cell_height as f64;
        let ratio = candidate / cell;
        ratio > ASPECT_RATIO_TOLERANCE_MIN && ratio < ASPECT_RATIO_TOLERANCE_MAX
    }
}
