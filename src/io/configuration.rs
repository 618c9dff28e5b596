//! Mosaic constants and runtime configuration defaults

// Candidate admission settings
/// Lower bound on candidate/cell aspect ratio agreement during scoring
pub const ASPECT_RATIO_TOLERANCE_MIN: f64 = 0.99;
/// Upper bound on candidate/cell aspect ratio agreement during scoring
pub const ASPECT_RATIO_TOLERANCE_MAX: f64 = 1.01;

// Composition settings
/// Lower bound on tile/cell aspect ratio agreement for the rejecting crop
pub const CROP_ASPECT_TOLERANCE_MIN: f64 = 0.95;
/// Upper bound on tile/cell aspect ratio agreement for the rejecting crop
pub const CROP_ASPECT_TOLERANCE_MAX: f64 = 1.05;

// Keeps the compiled canvas addressable with 32-bit pixel counts
/// Maximum number of pixels in the compiled output image (exclusive)
pub const MAX_OUTPUT_PIXELS: u64 = i32::MAX as u64;

// Default values for configurable parameters
/// Default number of horizontal and vertical sub-sections
pub const DEFAULT_SUB_SECTIONS: u32 = 32;

/// Default maximum number of cells a single candidate may occupy
pub const DEFAULT_USAGES_PER_IMAGE: usize = 1;

// Output settings
/// Prefix for generated output filenames
pub const OUTPUT_FILE_PREFIX: &str = "collage-";
/// Extension for generated output filenames
pub const OUTPUT_FILE_SUFFIX: &str = ".jpg";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
