//! Image decoding, orientation correction, and collage output
//!
//! All decoding funnels through [`load_oriented`] so that EXIF rotation is
//! applied identically during scoring and composition. Mirrored orientation
//! values are refused rather than guessed at. Output files get unique names
//! so repeated runs never overwrite earlier results.

use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{
    DynamicImage, ImageDecoder, ImageFormat, ImageReader, ImageResult, RgbImage, Rgba, RgbaImage,
    imageops,
};
use log::debug;
use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::io::configuration::{OUTPUT_FILE_PREFIX, OUTPUT_FILE_SUFFIX};
use crate::io::error::{MosaicError, Result};
use crate::spatial::raster::{Raster, pack_rgb};

/// Decode an image and apply its EXIF orientation
///
/// Orientation is read before decoding. Pure rotations are applied to the
/// decoded image; absent or unreadable orientation metadata means no
/// transform.
///
/// # Errors
///
/// Returns [`MosaicError::FileSystem`] when the file cannot be opened,
/// [`MosaicError::ImageLoad`] when decoding fails, and
/// [`MosaicError::UnsupportedOrientation`] for mirrored orientation values.
pub fn load_oriented(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|source| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "open image",
            source,
        })?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|source| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
    let orientation = decoder.orientation();

    let mut image =
        DynamicImage::from_decoder(decoder).map_err(|source| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(rotation) = resolve_orientation(path, orientation)? {
        image.apply_orientation(rotation);
    }

    Ok(image)
}

/// Interpret a decoder's reported EXIF orientation
///
/// Pure rotations come back as the transform to apply. Absent or unreadable
/// metadata means identity, logged at debug level.
///
/// # Errors
///
/// Returns [`MosaicError::UnsupportedOrientation`] for mirrored orientation
/// values.
pub fn resolve_orientation(
    path: &Path,
    orientation: ImageResult<Orientation>,
) -> Result<Option<Orientation>> {
    match orientation {
        Ok(Orientation::NoTransforms) => Ok(None),
        Ok(
            rotation @ (Orientation::Rotate90 | Orientation::Rotate180 | Orientation::Rotate270),
        ) => Ok(Some(rotation)),
        Ok(mirrored) => Err(MosaicError::UnsupportedOrientation {
            path: path.to_path_buf(),
            orientation: format!("{mirrored:?}"),
        }),
        Err(error) => {
            debug!(
                "{}: no usable orientation metadata ({error})",
                path.display()
            );
            Ok(None)
        }
    }
}

/// Convert to RGB, compositing any alpha channel onto white
pub fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    if image.color().has_alpha() {
        let mut canvas = RgbaImage::from_pixel(
            image.width(),
            image.height(),
            Rgba([255, 255, 255, 255]),
        );
        imageops::overlay(&mut canvas, &image.to_rgba8(), 0, 0);
        DynamicImage::ImageRgba8(canvas).to_rgb8()
    } else {
        image.to_rgb8()
    }
}

/// Scale a decoded candidate to exactly cell size and pack it
///
/// The aspect gate has already vouched that the distortion introduced by an
/// exact resize stays within one percent. Transparent pixels land on white,
/// matching the composition background.
pub fn normalize_to_cell(image: &DynamicImage, width: u32, height: u32) -> Raster {
    let scaled = image.resize_exact(width, height, FilterType::Triangle);
    raster_from_rgb(&flatten_to_rgb(&scaled))
}

/// Pack an RGB image buffer into a raster
pub fn raster_from_rgb(image: &RgbImage) -> Raster {
    let pixels = image
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            pack_rgb(r, g, b)
        })
        .collect();
    Raster::new(image.width(), image.height(), pixels)
}

/// Write the compiled mosaic as a uniquely named JPEG
///
/// The file lands in `output_directory` (created if missing) or the system
/// temporary directory when none is given. Returns the full path of the
/// written file.
///
/// # Errors
///
/// Returns [`MosaicError::FileSystem`] when the directory or file cannot be
/// created and [`MosaicError::ImageExport`] when encoding fails.
pub fn write_collage(image: &RgbImage, output_directory: Option<&Path>) -> Result<PathBuf> {
    let directory = match output_directory {
        Some(directory) => {
            fs::create_dir_all(directory).map_err(|source| MosaicError::FileSystem {
                path: directory.to_path_buf(),
                operation: "create output directory",
                source,
            })?;
            directory.to_path_buf()
        }
        None => env::temp_dir(),
    };

    let temp = tempfile::Builder::new()
        .prefix(OUTPUT_FILE_PREFIX)
        .suffix(OUTPUT_FILE_SUFFIX)
        .tempfile_in(&directory)
        .map_err(|source| MosaicError::FileSystem {
            path: directory.clone(),
            operation: "create output file",
            source,
        })?;
    let (file, path) = temp.keep().map_err(|error| MosaicError::FileSystem {
        path: directory,
        operation: "persist output file",
        source: error.error,
    })?;

    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Jpeg)
        .map_err(|source| MosaicError::ImageExport {
            path: path.clone(),
            source,
        })?;
    writer.flush().map_err(|source| MosaicError::FileSystem {
        path: path.clone(),
        operation: "flush output file",
        source,
    })?;

    Ok(path)
}
