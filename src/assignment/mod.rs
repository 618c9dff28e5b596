//! Greedy usage-capped assignment of candidates to grid cells
//!
//! This module contains the sequential heart of the pipeline:
//! - Scored candidate bookkeeping with usage counts
//! - The insertion engine with its eviction cascade
//! - The frozen assignment table handed to the compiler

/// Scored candidate bookkeeping
pub mod candidate;
/// Assignment engine and the frozen assignment table
pub mod engine;

pub use candidate::ScoredCandidate;
pub use engine::{AssignmentEngine, AssignmentTable, TileAssignment};
