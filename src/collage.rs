//! Mosaic configuration and run orchestration
//!
//! The builder mirrors the shape of the pipeline: name a target, add
//! candidates, tune the grid, then [`build`](MosaicBuilder::build) validates
//! everything into an immutable [`Mosaic`] whose [`run`](Mosaic::run)
//! executes partition, parallel scoring, ordered insertion, composition, and
//! output.
//!
//! Candidate paths live in a sorted set, so a given input set always scores
//! and inserts in the same order regardless of how it was collected. Runs
//! are fully deterministic.

use log::{debug, error, info, warn};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assignment::candidate::ScoredCandidate;
use crate::assignment::engine::{AssignmentEngine, AssignmentTable};
use crate::diff::{AbsRgbDiff, DiffFunction, DiffKind, SsimDiff};
use crate::io::configuration::{DEFAULT_SUB_SECTIONS, DEFAULT_USAGES_PER_IMAGE};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image as image_io;
use crate::io::progress::ProgressManager;
use crate::render::compiler;
use crate::render::crop::CropStrategy;
use crate::spatial::grid::TargetGrid;

/// Fluent configuration for a mosaic run
#[derive(Clone, Debug)]
#[must_use]
pub struct MosaicBuilder {
    target_image: Option<PathBuf>,
    sub_images: BTreeSet<PathBuf>,
    horizontal_sub_sections: u32,
    vertical_sub_sections: u32,
    usages_per_image: usize,
    diff_function: DiffKind,
    crop_strategy: CropStrategy,
    output_directory: Option<PathBuf>,
    show_progress: bool,
}

impl Default for MosaicBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MosaicBuilder {
    /// Create a builder with default grid and scoring settings
    pub const fn new() -> Self {
        Self {
            target_image: None,
            sub_images: BTreeSet::new(),
            horizontal_sub_sections: DEFAULT_SUB_SECTIONS,
            vertical_sub_sections: DEFAULT_SUB_SECTIONS,
            usages_per_image: DEFAULT_USAGES_PER_IMAGE,
            diff_function: DiffKind::AbsRgb,
            crop_strategy: CropStrategy::CropFromMiddle,
            output_directory: None,
            show_progress: false,
        }
    }

    /// Set the image the mosaic should approximate
    pub fn target_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_image = Some(path.into());
        self
    }

    /// Add one candidate tile image
    ///
    /// Paths are deduplicated; adding the same path twice has no effect.
    pub fn sub_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.sub_images.insert(path.into());
        self
    }

    /// Add every regular file under a directory, recursively
    ///
    /// Files that fail to decode are skipped during scoring, so a directory
    /// may freely mix images with other content.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::FileSystem`] when a directory cannot be read.
    pub fn sub_image_directory(mut self, directory: impl AsRef<Path>) -> Result<Self> {
        let mut stack = vec![directory.as_ref().to_path_buf()];
        while let Some(current) = stack.pop() {
            let entries = fs::read_dir(&current).map_err(|source| MosaicError::FileSystem {
                path: current.clone(),
                operation: "read sub image directory",
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| MosaicError::FileSystem {
                    path: current.clone(),
                    operation: "read sub image directory",
                    source,
                })?;
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    self.sub_images.insert(path);
                }
            }
        }
        Ok(self)
    }

    /// Set both sub-section counts at once
    pub const fn sub_sections(mut self, count: u32) -> Self {
        self.horizontal_sub_sections = count;
        self.vertical_sub_sections = count;
        self
    }

    /// Set the number of horizontal sub-sections
    pub const fn horizontal_sub_sections(mut self, count: u32) -> Self {
        self.horizontal_sub_sections = count;
        self
    }

    /// Set the number of vertical sub-sections
    pub const fn vertical_sub_sections(mut self, count: u32) -> Self {
        self.vertical_sub_sections = count;
        self
    }

    /// Set the maximum number of cells one candidate may occupy
    pub const fn usages_per_image(mut self, usages: usize) -> Self {
        self.usages_per_image = usages;
        self
    }

    /// Choose the scoring function
    pub const fn diff_function(mut self, diff: DiffKind) -> Self {
        self.diff_function = diff;
        self
    }

    /// Choose how candidates are fitted to tiles during composition
    pub const fn crop_strategy(mut self, crop: CropStrategy) -> Self {
        self.crop_strategy = crop;
        self
    }

    /// Set the directory the output file is written to
    ///
    /// The system temporary directory is used when no directory is set.
    pub fn output_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(directory.into());
        self
    }

    /// Toggle the scoring progress bar
    pub const fn show_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Validate the configuration into an immutable mosaic
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidParameter`] when no target is set, the
    /// candidate set is empty, a sub-section count is zero, or the usage cap
    /// is zero.
    pub fn build(self) -> Result<Mosaic> {
        let Some(target_image) = self.target_image else {
            return Err(invalid_parameter(
                "target_image",
                &"<unset>",
                &"a target image is required",
            ));
        };
        if self.sub_images.is_empty() {
            return Err(invalid_parameter(
                "sub_images",
                &"<empty>",
                &"at least one sub image is required",
            ));
        }
        if self.horizontal_sub_sections == 0 {
            return Err(invalid_parameter(
                "horizontal_sub_sections",
                &self.horizontal_sub_sections,
                &"must be at least one",
            ));
        }
        if self.vertical_sub_sections == 0 {
            return Err(invalid_parameter(
                "vertical_sub_sections",
                &self.vertical_sub_sections,
                &"must be at least one",
            ));
        }
        if self.usages_per_image == 0 {
            return Err(invalid_parameter(
                "usages_per_image",
                &self.usages_per_image,
                &"must be at least one",
            ));
        }

        Ok(Mosaic {
            target_image,
            sub_images: self.sub_images,
            horizontal_sub_sections: self.horizontal_sub_sections,
            vertical_sub_sections: self.vertical_sub_sections,
            usages_per_image: self.usages_per_image,
            diff_function: self.diff_function,
            crop_strategy: self.crop_strategy,
            output_directory: self.output_directory,
            show_progress: self.show_progress,
        })
    }
}

/// A validated, immutable mosaic configuration
#[derive(Clone, Debug)]
pub struct Mosaic {
    target_image: PathBuf,
    sub_images: BTreeSet<PathBuf>,
    horizontal_sub_sections: u32,
    vertical_sub_sections: u32,
    usages_per_image: usize,
    diff_function: DiffKind,
    crop_strategy: CropStrategy,
    output_directory: Option<PathBuf>,
    show_progress: bool,
}

impl Mosaic {
    /// Generate the mosaic and return the path of the written image
    ///
    /// Runs the full pipeline: partition the target, score every candidate
    /// in parallel, insert the results in canonical order, compile the
    /// winning assignment, and write a uniquely named JPEG.
    ///
    /// # Errors
    ///
    /// Propagates target loading and partitioning errors, fatal candidate
    /// errors ([`MosaicError::UnsupportedOrientation`]), composition errors
    /// including [`MosaicError::EmptyAssignment`], and output I/O errors.
    pub fn run(&self) -> Result<PathBuf> {
        match self.diff_function {
            DiffKind::AbsRgb => self.run_with(&AbsRgbDiff),
            DiffKind::Ssim => self.run_with(&SsimDiff),
        }
    }

    /// Target image path
    pub fn target_image(&self) -> &Path {
        &self.target_image
    }

    /// Number of distinct candidate paths
    pub fn sub_image_count(&self) -> usize {
        self.sub_images.len()
    }

    /// Number of horizontal sub-sections
    pub const fn horizontal_sub_sections(&self) -> u32 {
        self.horizontal_sub_sections
    }

    /// Number of vertical sub-sections
    pub const fn vertical_sub_sections(&self) -> u32 {
        self.vertical_sub_sections
    }

    /// Maximum number of cells one candidate may occupy
    pub const fn usages_per_image(&self) -> usize {
        self.usages_per_image
    }

    /// The configured scoring function
    pub const fn diff_function(&self) -> DiffKind {
        self.diff_function
    }

    /// The configured crop strategy
    pub const fn crop_strategy(&self) -> CropStrategy {
        self.crop_strategy
    }

    /// Score, assign, and compile with a concrete diff function
    fn run_with<D: DiffFunction>(&self, diff: &D) -> Result<PathBuf> {
        let target = image_io::load_oriented(&self.target_image)?;
        let raster = image_io::raster_from_rgb(&image_io::flatten_to_rgb(&target));
        let grid = TargetGrid::partition(
            &raster,
            self.horizontal_sub_sections,
            self.vertical_sub_sections,
        )?;
        info!(
            "partitioned {} into {}x{} cells of {}x{} pixels",
            self.target_image.display(),
            grid.columns(),
            grid.rows(),
            grid.cell_width(),
            grid.cell_height()
        );

        let table = self.assign(diff, &grid)?;
        info!(
            "assigned {} of {} cells",
            table.assigned_cells(),
            grid.cell_count()
        );

        let collage = compiler::compile(&table, self.crop_strategy)?;
        let output = image_io::write_collage(&collage, self.output_directory.as_deref())?;
        info!("wrote mosaic to {}", output.display());
        Ok(output)
    }

    /// Score candidates in parallel, then insert them in canonical order
    fn assign<D: DiffFunction>(&self, diff: &D, grid: &TargetGrid) -> Result<AssignmentTable> {
        let mut progress = ProgressManager::new(self.show_progress);
        progress.start_scoring(self.sub_images.len());

        let paths: Vec<&PathBuf> = self.sub_images.iter().collect();
        let scored = paths
            .par_iter()
            .map(|path| {
                let candidate = score_candidate(diff, path.as_path(), grid);
                progress.candidate_scored();
                candidate
            })
            .collect::<Result<Vec<_>>>()?;

        let admitted = scored.iter().filter(|entry| entry.is_some()).count();
        progress.finish_scoring(admitted);
        info!("scored {admitted} of {} candidates", paths.len());

        let mut engine = AssignmentEngine::new(
            grid.rows() as usize,
            grid.columns() as usize,
            self.usages_per_image,
        );
        for candidate in scored.into_iter().flatten() {
            engine.insert(candidate);
        }
        Ok(engine.finish())
    }
}

/// Normalize and score one candidate, or report why it was skipped
///
/// Decode failures are recoverable and yield `Ok(None)`; an unsupported
/// EXIF orientation aborts the whole run.
fn score_candidate<D: DiffFunction>(
    diff: &D,
    path: &Path,
    grid: &TargetGrid,
) -> Result<Option<ScoredCandidate<D::Scores>>> {
    let image = match image_io::load_oriented(path) {
        Ok(image) => image,
        Err(err @ MosaicError::UnsupportedOrientation { .. }) => return Err(err),
        Err(err) => {
            error!("cannot load {}: {err}", path.display());
            return Ok(None);
        }
    };

    if !grid.accepts_aspect(image.width(), image.height()) {
        warn!(
            "{} has bad aspect ratio ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        return Ok(None);
    }

    debug!("scoring {}", path.display());
    let raster = image_io::normalize_to_cell(&image, grid.cell_width(), grid.cell_height());
    Ok(Some(ScoredCandidate::new(
        path.to_path_buf(),
        diff.score(&raster, grid),
    )))
}
