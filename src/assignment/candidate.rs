//! Scored candidate bookkeeping

use std::path::{Path, PathBuf};

/// A candidate image with its per-cell scores and current usage count
///
/// Usage counts are maintained exclusively by the assignment engine: a claim
/// increments, an eviction decrements. A candidate that never wins a cell
/// keeps usage zero and simply does not appear in the final table.
#[derive(Clone, Debug)]
pub struct ScoredCandidate<S> {
    source: PathBuf,
    scores: S,
    usages: usize,
}

impl<S> ScoredCandidate<S> {
    /// Create an unplaced candidate from its source path and score vector
    pub const fn new(source: PathBuf, scores: S) -> Self {
        Self {
            source,
            scores,
            usages: 0,
        }
    }

    /// Path the candidate was decoded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Score vector against the target grid
    pub const fn scores(&self) -> &S {
        &self.scores
    }

    /// Number of cells currently claimed
    pub const fn usages(&self) -> usize {
        self.usages
    }

    /// Record a claimed cell
    pub(crate) const fn record_claim(&mut self) {
        self.usages += 1;
    }

    /// Record the loss of a claimed cell
    pub(crate) const fn record_eviction(&mut self) {
        self.usages = self.usages.saturating_sub(1);
    }
}
