//! Tile cropping strategies for mosaic composition
//!
//! A crop strategy selects the sub-rectangle of a candidate image that will
//! be scaled to tile size. Only the aspect ratio of the desired dimensions
//! matters here; the compiler scales whatever region is returned.

use crate::io::configuration::{CROP_ASPECT_TOLERANCE_MAX, CROP_ASPECT_TOLERANCE_MIN};

/// Rectangle within a source image selected for rendering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Region width in pixels
    pub width: u32,
    /// Region height in pixels
    pub height: u32,
}

/// How candidate images are fitted to the tile aspect ratio
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CropStrategy {
    /// Use the full image, skipping candidates whose aspect ratio deviates
    /// more than five percent from the tile's
    RejectBadAspectRatio,
    /// Take the largest centered region matching the tile aspect ratio
    #[default]
    CropFromMiddle,
}

impl CropStrategy {
    /// Select the sub-rectangle of a `width` by `height` image to render
    ///
    /// Returns `None` when the strategy rejects the image outright. The
    /// returned region matches the desired aspect ratio, not the desired
    /// dimensions.
    pub fn crop_region(
        self,
        width: u32,
        height: u32,
        desired_width: u32,
        desired_height: u32,
    ) -> Option<CropRegion> {
        match self {
            Self::RejectBadAspectRatio => {
                let desired = f64::from(desired_width) / f64::from(desired_height);
                let actual = f64::from(width) / f64::from(height);
                let ratio = actual / desired;
                (ratio > CROP_ASPECT_TOLERANCE_MIN && ratio < CROP_ASPECT_TOLERANCE_MAX).then_some(
                    CropRegion {
                        x: 0,
                        y: 0,
                        width,
                        height,
                    },
                )
            }
            Self::CropFromMiddle => {
                let desired_area = u64::from(desired_width) * u64::from(height);
                let actual_area = u64::from(width) * u64::from(desired_height);
                if desired_area <= actual_area {
                    // Wide input, keep full height and trim the sides
                    let cropped_width = (desired_area / u64::from(desired_height)) as u32;
                    Some(CropRegion {
                        x: (width - cropped_width) / 2,
                        y: 0,
                        width: cropped_width,
                        height,
                    })
                } else {
                    // Tall input, keep full width and trim top and bottom
                    let cropped_height =
                        (u64::from(desired_height) * u64::from(width) / u64::from(desired_width))
                            as u32;
                    Some(CropRegion {
                        x: 0,
                        y: (height - cropped_height) / 2,
                        width,
                        height: cropped_height,
                    })
                }
            }
        }
    }
}
