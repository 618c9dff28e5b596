//! Packed-RGB pixel storage
//!
//! Stores decoded image data as a flat row-major buffer of `0xRRGGBB` words.
//! Alpha is never stored; transparent sources are flattened onto white before
//! they reach a raster. Sub-region extraction copies into an independent
//! buffer so cells can be scored without holding the source image alive.

/// Pack 8-bit channels into a `0xRRGGBB` word
pub const fn pack_rgb(red: u8, green: u8, blue: u8) -> u32 {
    ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32)
}

/// Split a `0xRRGGBB` word into `[red, green, blue]`
pub const fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Immutable raster of packed RGB pixels in row-major order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Raster {
    /// Create a raster from dimensions and packed pixel data
    ///
    /// The pixel buffer is truncated or zero-padded to exactly
    /// `width * height` entries so the row-major invariant always holds.
    pub fn new(width: u32, height: u32, mut pixels: Vec<u32>) -> Self {
        pixels.resize((width as usize) * (height as usize), 0);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Raster width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Packed pixels in row-major order
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Copy a sub-region into an independent raster
    ///
    /// Regions are clamped to the source bounds; a request entirely outside
    /// the raster yields an empty raster rather than failing.
    pub fn sub_raster(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let left = x.min(self.width);
        let top = y.min(self.height);
        let clamped_width = width.min(self.width - left);
        let clamped_height = height.min(self.height - top);

        let mut pixels = Vec::with_capacity((clamped_width as usize) * (clamped_height as usize));
        for row in top..top + clamped_height {
            let start = (row as usize) * (self.width as usize) + (left as usize);
            let end = start + clamped_width as usize;
            pixels.extend_from_slice(self.pixels.get(start..end).unwrap_or(&[]));
        }

        Self {
            width: clamped_width,
            height: clamped_height,
            pixels,
        }
    }
}
