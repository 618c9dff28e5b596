//! Usage-capped greedy assignment with cascading eviction
//!
//! Candidates are inserted one at a time in canonical order. Each insertion
//! claims the best improvable cell repeatedly until the candidate reaches the
//! usage cap or no cell improves. Claiming an occupied cell evicts the
//! occupant, which immediately re-competes for the rest of the grid before
//! the evictor resumes; the recursion of the textbook formulation is
//! expressed here as an explicit work stack with identical settle order.
//!
//! Cascades terminate: every claim strictly improves the claimed cell's
//! score, and scores are drawn from a finite set.

use ndarray::Array2;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assignment::candidate::ScoredCandidate;
use crate::diff::CellScores;

/// Greedy assignment of scored candidates to grid cells
///
/// Scoring may run on many threads, but insertion is sequential: `insert`
/// takes `&mut self`, so the compiler enforces the single-writer contract.
#[derive(Debug)]
pub struct AssignmentEngine<S> {
    candidates: Vec<ScoredCandidate<S>>,
    slots: Array2<Option<usize>>,
    usage_cap: usize,
}

impl<S: CellScores> AssignmentEngine<S> {
    /// Create an engine for a `rows` by `columns` grid
    ///
    /// `usage_cap` bounds how many cells one candidate may hold at once; a
    /// cap of zero admits nothing.
    pub fn new(rows: usize, columns: usize, usage_cap: usize) -> Self {
        Self {
            candidates: Vec::new(),
            slots: Array2::from_elem((rows, columns), None),
            usage_cap,
        }
    }

    /// Insert a candidate, letting it claim every cell it improves
    ///
    /// Runs the full eviction cascade: displaced occupants re-compete
    /// immediately, and this call returns only once every affected candidate
    /// has settled. The candidate is retained even if it claims nothing, so
    /// it can compete again when a later insertion frees a cell.
    pub fn insert(&mut self, candidate: ScoredCandidate<S>) {
        let index = self.candidates.len();
        self.candidates.push(candidate);

        let mut pending = vec![index];
        while let Some(current) = pending.pop() {
            if let Some(evicted) = self.settle(current) {
                // The evicted candidate settles before `current` resumes
                pending.push(current);
                pending.push(evicted);
            }
        }
    }

    /// Claim cells for one candidate until it evicts an occupant, reaches
    /// the usage cap, or runs out of improvable cells
    ///
    /// Returns the evicted candidate's index when a claim displaced one.
    fn settle(&mut self, index: usize) -> Option<usize> {
        loop {
            let usages = self
                .candidates
                .get(index)
                .map_or(usize::MAX, ScoredCandidate::usages);
            if usages >= self.usage_cap {
                return None;
            }

            let cell = self.best_improvable_cell(index)?;
            let columns = self.slots.ncols();
            let previous = match self.slots.get_mut([cell / columns, cell % columns]) {
                Some(slot) => slot.replace(index),
                None => return None,
            };
            if let Some(candidate) = self.candidates.get_mut(index) {
                candidate.record_claim();
            }

            if let Some(evicted) = previous {
                if let Some(occupant) = self.candidates.get_mut(evicted) {
                    occupant.record_eviction();
                }
                return Some(evicted);
            }
        }
    }

    /// Find the cell this candidate improves most, if any
    ///
    /// A cell is improvable when it is empty, or when the candidate beats
    /// the occupant there without holding more cells than the occupant does
    /// (the fairness rule). Among improvable cells the candidate's own
    /// cross-cell comparator decides; the first scanned cell wins ties.
    fn best_improvable_cell(&self, index: usize) -> Option<usize> {
        let candidate = self.candidates.get(index)?;
        let mut best: Option<usize> = None;

        for (cell, slot) in self.slots.iter().enumerate() {
            let improvable = slot.is_none_or(|occupant_index| {
                self.candidates.get(occupant_index).is_some_and(|occupant| {
                    candidate.scores().is_better(cell, occupant.scores())
                        && candidate.usages() <= occupant.usages()
                })
            });
            if !improvable {
                continue;
            }

            if best.is_none_or(|current| candidate.scores().prefers(cell, current)) {
                best = Some(cell);
            }
        }

        best
    }

    /// Candidates in insertion order
    pub fn candidates(&self) -> &[ScoredCandidate<S>] {
        &self.candidates
    }

    /// Current slot grid, `Some(candidate index)` where occupied
    pub const fn slots(&self) -> &Array2<Option<usize>> {
        &self.slots
    }

    /// Maximum cells a single candidate may hold
    pub const fn usage_cap(&self) -> usize {
        self.usage_cap
    }

    /// Number of currently occupied cells
    pub fn assigned_cells(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Freeze the engine into the final assignment table
    ///
    /// Assignments are grouped by candidate and ordered by each candidate's
    /// first claimed cell in row-major order, so the table's first entry
    /// renders the first occupied cell of the grid.
    pub fn finish(self) -> AssignmentTable {
        let rows = self.slots.nrows();
        let columns = self.slots.ncols();
        let mut positions: HashMap<usize, usize> = HashMap::new();
        let mut assignments: Vec<TileAssignment> = Vec::new();

        for ((row, column), slot) in self.slots.indexed_iter() {
            let Some(candidate_index) = slot else {
                continue;
            };

            let position = *positions.entry(*candidate_index).or_insert_with(|| {
                let position = assignments.len();
                let source = self
                    .candidates
                    .get(*candidate_index)
                    .map_or_else(PathBuf::new, |candidate| candidate.source().to_path_buf());
                assignments.push(TileAssignment {
                    source,
                    cells: Vec::new(),
                });
                position
            });

            if let Some(assignment) = assignments.get_mut(position) {
                assignment.cells.push([row, column]);
            }
        }

        AssignmentTable {
            rows,
            columns,
            scored_candidates: self.candidates.len(),
            assignments,
        }
    }
}

/// One candidate's claimed cells in the final mosaic
#[derive(Clone, Debug)]
pub struct TileAssignment {
    source: PathBuf,
    cells: Vec<[usize; 2]>,
}

impl TileAssignment {
    /// Path of the candidate image to render
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Claimed cells as `[row, column]` pairs in row-major order
    pub fn cells(&self) -> &[[usize; 2]] {
        &self.cells
    }
}

/// Frozen result of the assignment phase
#[derive(Clone, Debug)]
pub struct AssignmentTable {
    rows: usize,
    columns: usize,
    scored_candidates: usize,
    assignments: Vec<TileAssignment>,
}

impl AssignmentTable {
    /// Grid rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Grid columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// How many candidates were scored before assignment
    pub const fn scored_candidates(&self) -> usize {
        self.scored_candidates
    }

    /// Assignments grouped by candidate
    pub fn assignments(&self) -> &[TileAssignment] {
        &self.assignments
    }

    /// Total number of claimed cells
    pub fn assigned_cells(&self) -> usize {
        self.assignments
            .iter()
            .map(|assignment| assignment.cells.len())
            .sum()
    }

    /// Whether no candidate claimed any cell
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
