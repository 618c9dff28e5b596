//! Input, output, and operational concerns
//!
//! Everything that touches the outside world lives here:
//! - Image decoding, normalization, and encoding
//! - The command-line surface
//! - Errors, tuning constants, and progress reporting

/// Command-line parsing and run orchestration
pub mod cli;
/// Shared tuning constants
pub mod configuration;
/// Error and result types for the crate
pub mod error;
/// Image decoding, normalization, and encoding
pub mod image;
/// Progress reporting for long scoring runs
pub mod progress;

pub use error::{MosaicError, Result};
