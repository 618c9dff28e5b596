//! Progress reporting for the candidate scoring phase

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SCORING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Scoring: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress display for mosaic generation
///
/// Scoring dominates the run time, so the bar tracks candidates scored. A
/// disabled manager displays nothing; every method becomes a no-op.
pub struct ProgressManager {
    enabled: bool,
    scoring_bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a progress manager
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            scoring_bar: None,
        }
    }

    /// Begin the scoring bar over the full candidate count
    pub fn start_scoring(&mut self, candidates: usize) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new(candidates as u64);
        bar.set_style(SCORING_STYLE.clone());
        self.scoring_bar = Some(bar);
    }

    /// Record one candidate as scored or skipped
    pub fn candidate_scored(&self) {
        if let Some(ref bar) = self.scoring_bar {
            bar.inc(1);
        }
    }

    /// Close the scoring bar, reporting how many candidates were admitted
    pub fn finish_scoring(&self, admitted: usize) {
        if let Some(ref bar) = self.scoring_bar {
            bar.finish_with_message(format!("{admitted} admitted"));
        }
    }
}
