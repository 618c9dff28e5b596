//! Command-line interface for assembling photographic mosaics

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::collage::MosaicBuilder;
use crate::diff::DiffKind;
use crate::io::configuration::{DEFAULT_SUB_SECTIONS, DEFAULT_USAGES_PER_IMAGE};
use crate::io::error::Result;
use crate::render::crop::CropStrategy;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Assemble a photographic mosaic from a library of tile images"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Image the mosaic should approximate
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Candidate tile image (repeatable)
    #[arg(short, long)]
    pub tile: Vec<PathBuf>,

    /// Directory of candidate tile images, searched recursively (repeatable)
    #[arg(short = 'd', long)]
    pub tile_dir: Vec<PathBuf>,

    /// Number of sub-sections along both axes
    #[arg(short, long, default_value_t = DEFAULT_SUB_SECTIONS)]
    pub sections: u32,

    /// Override the horizontal sub-section count
    #[arg(long)]
    pub across: Option<u32>,

    /// Override the vertical sub-section count
    #[arg(long)]
    pub down: Option<u32>,

    /// Maximum number of cells one tile image may occupy
    #[arg(short, long, default_value_t = DEFAULT_USAGES_PER_IMAGE)]
    pub usages: usize,

    /// Scoring function used to compare tiles against cells
    #[arg(long, value_enum, default_value = "abs-rgb")]
    pub diff: DiffArg,

    /// How tiles with a mismatched aspect ratio are fitted
    #[arg(long, value_enum, default_value = "center")]
    pub crop: CropArg,

    /// Directory the output file is written to (defaults to the system
    /// temporary directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Scoring functions selectable on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DiffArg {
    /// Sum of absolute RGB channel differences per cell
    AbsRgb,
    /// Structural similarity over luminance
    Ssim,
}

impl From<DiffArg> for DiffKind {
    fn from(arg: DiffArg) -> Self {
        match arg {
            DiffArg::AbsRgb => Self::AbsRgb,
            DiffArg::Ssim => Self::Ssim,
        }
    }
}

/// Crop strategies selectable on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CropArg {
    /// Crop a centered region matching the tile aspect ratio
    Center,
    /// Leave tiles with a mismatched aspect ratio blank
    Reject,
}

impl From<CropArg> for CropStrategy {
    fn from(arg: CropArg) -> Self {
        match arg {
            CropArg::Center => Self::CropFromMiddle,
            CropArg::Reject => Self::RejectBadAspectRatio,
        }
    }
}

/// Orchestrates a mosaic run from parsed command-line arguments
pub struct CollageProcessor {
    cli: Cli,
}

impl CollageProcessor {
    /// Create a processor for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the mosaic and print the output path
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid, a tile directory
    /// cannot be read, or the run itself fails.
    // The output path is the tool's result, so it goes to stdout
    #[allow(clippy::print_stdout)]
    pub fn process(&self) -> Result<()> {
        let mut builder = MosaicBuilder::new()
            .target_image(&self.cli.target)
            .sub_sections(self.cli.sections)
            .usages_per_image(self.cli.usages)
            .diff_function(self.cli.diff.into())
            .crop_strategy(self.cli.crop.into())
            .show_progress(self.cli.should_show_progress());

        if let Some(across) = self.cli.across {
            builder = builder.horizontal_sub_sections(across);
        }
        if let Some(down) = self.cli.down {
            builder = builder.vertical_sub_sections(down);
        }
        for tile in &self.cli.tile {
            builder = builder.sub_image(tile);
        }
        for directory in &self.cli.tile_dir {
            builder = builder.sub_image_directory(directory)?;
        }
        if let Some(ref output_dir) = self.cli.output_dir {
            builder = builder.output_directory(output_dir);
        }

        let output = builder.build()?.run()?;
        println!("{}", output.display());
        Ok(())
    }
}
