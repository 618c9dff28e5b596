//! Final mosaic composition from the frozen assignment table
//!
//! One tile resolution is derived from the first assignment's candidate at
//! native size, scaled down by an integer factor until the full canvas fits
//! the output pixel budget. Candidates are then re-decoded in parallel and
//! drawn serially onto a shared canvas; claimed cells are disjoint, so draw
//! order does not matter.

use image::imageops::FilterType;
use image::{Rgb, RgbImage, imageops};
use log::{info, warn};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::sync::{Mutex, PoisonError};

use crate::assignment::engine::{AssignmentTable, TileAssignment};
use crate::io::configuration::MAX_OUTPUT_PIXELS;
use crate::io::error::{MosaicError, Result};
use crate::io::image as image_io;
use crate::render::crop::CropStrategy;

/// Fill for cells no candidate claimed
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Smallest integer divisor keeping the compiled output under the pixel budget
///
/// The canvas would be `native_width * columns` by `native_height * rows`
/// at scale one; both sides shrink by the returned factor until the pixel
/// count drops below [`MAX_OUTPUT_PIXELS`].
pub const fn output_scale(
    native_width: u32,
    native_height: u32,
    columns: usize,
    rows: usize,
) -> u32 {
    let width = (native_width as u64).saturating_mul(columns as u64);
    let height = (native_height as u64).saturating_mul(rows as u64);

    let mut scale = 1u64;
    loop {
        match (width / scale).checked_mul(height / scale) {
            Some(pixels) if pixels < MAX_OUTPUT_PIXELS => return scale as u32,
            _ => scale += 1,
        }
    }
}

/// Compose the final mosaic image
///
/// # Errors
///
/// Returns [`MosaicError::EmptyAssignment`] when the table holds no
/// assignments, and propagates loading errors when a candidate can no
/// longer be decoded at composition time.
pub fn compile(table: &AssignmentTable, crop: CropStrategy) -> Result<RgbImage> {
    let Some(first) = table.assignments().first() else {
        return Err(MosaicError::EmptyAssignment {
            scored_candidates: table.scored_candidates(),
        });
    };

    let (tile_width, tile_height) = {
        let probe = image_io::load_oriented(first.source())?;
        let scale = output_scale(probe.width(), probe.height(), table.columns(), table.rows());
        ((probe.width() / scale).max(1), (probe.height() / scale).max(1))
    };

    let canvas_width = tile_width * table.columns() as u32;
    let canvas_height = tile_height * table.rows() as u32;
    info!(
        "compiling {} assignments into a {canvas_width}x{canvas_height} mosaic",
        table.assignments().len()
    );

    let canvas = Mutex::new(RgbImage::from_pixel(canvas_width, canvas_height, BACKGROUND));
    table.assignments().par_iter().try_for_each(|assignment| {
        render_assignment(assignment, &canvas, tile_width, tile_height, crop)
    })?;

    Ok(canvas.into_inner().unwrap_or_else(PoisonError::into_inner))
}

/// Re-decode one candidate and draw it into every cell it claimed
fn render_assignment(
    assignment: &TileAssignment,
    canvas: &Mutex<RgbImage>,
    tile_width: u32,
    tile_height: u32,
    crop: CropStrategy,
) -> Result<()> {
    let image = image_io::load_oriented(assignment.source())?;
    let Some(region) = crop.crop_region(image.width(), image.height(), tile_width, tile_height)
    else {
        warn!(
            "{} does not fit the tile aspect ratio, leaving {} cells empty",
            assignment.source().display(),
            assignment.cells().len()
        );
        return Ok(());
    };

    let scaled = image
        .crop_imm(region.x, region.y, region.width, region.height)
        .resize_exact(tile_width, tile_height, FilterType::Triangle);
    let tile = image_io::flatten_to_rgb(&scaled);

    let mut canvas = canvas.lock().unwrap_or_else(PoisonError::into_inner);
    for cell in assignment.cells() {
        let [row, column] = *cell;
        imageops::replace(
            &mut *canvas,
            &tile,
            column as i64 * i64::from(tile_width),
            row as i64 * i64::from(tile_height),
        );
    }

    Ok(())
}
