//! Tests for greedy assignment, fairness, and eviction cascades

#[cfg(test)]
mod tests {
    use photomosaic::assignment::candidate::ScoredCandidate;
    use photomosaic::assignment::engine::AssignmentEngine;
    use photomosaic::diff::CellScores;
    use std::path::PathBuf;

    // Fixed per-cell distances, lower is better
    struct FixedScores {
        diffs: Vec<u64>,
    }

    impl CellScores for FixedScores {
        fn is_better(&self, cell: usize, other: &Self) -> bool {
            match (self.diffs.get(cell), other.diffs.get(cell)) {
                (Some(mine), Some(theirs)) => mine < theirs,
                _ => false,
            }
        }

        fn prefers(&self, first: usize, second: usize) -> bool {
            match (self.diffs.get(first), self.diffs.get(second)) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            }
        }
    }

    fn candidate(name: &str, diffs: Vec<u64>) -> ScoredCandidate<FixedScores> {
        ScoredCandidate::new(PathBuf::from(name), FixedScores { diffs })
    }

    fn slot(engine: &AssignmentEngine<FixedScores>, row: usize, column: usize) -> Option<usize> {
        engine.slots().get([row, column]).copied().flatten()
    }

    fn usages(engine: &AssignmentEngine<FixedScores>, index: usize) -> usize {
        engine
            .candidates()
            .get(index)
            .map_or(usize::MAX, ScoredCandidate::usages)
    }

    // Tests the first candidate claims its best cell, not its first cell
    // Verified by claiming the first improvable cell instead
    #[test]
    fn test_candidate_claims_best_cell_first() {
        let mut engine = AssignmentEngine::new(1, 2, 1);
        engine.insert(candidate("a", vec![10, 5]));

        assert_eq!(slot(&engine, 0, 0), None);
        assert_eq!(slot(&engine, 0, 1), Some(0));
        assert_eq!(usages(&engine, 0), 1);
    }

    // Tests one candidate keeps claiming until the usage cap stops it
    // Verified by checking the cap after the loop instead of before
    #[test]
    fn test_usage_cap_limits_claims() {
        let mut engine = AssignmentEngine::new(1, 3, 2);
        engine.insert(candidate("a", vec![1, 2, 3]));

        assert_eq!(slot(&engine, 0, 0), Some(0));
        assert_eq!(slot(&engine, 0, 1), Some(0));
        assert_eq!(slot(&engine, 0, 2), None);
        assert_eq!(usages(&engine, 0), 2);
        assert_eq!(engine.assigned_cells(), 2);
        assert_eq!(engine.usage_cap(), 2);
    }

    // Tests an unbounded cap lets one candidate fill the grid
    #[test]
    fn test_unbounded_cap_fills_grid() {
        let mut engine = AssignmentEngine::new(1, 3, usize::MAX);
        engine.insert(candidate("a", vec![1, 2, 3]));

        assert_eq!(engine.assigned_cells(), 3);
        assert_eq!(usages(&engine, 0), 3);
    }

    // Tests a cap of zero admits nothing
    // Verified by checking the cap with a strict comparison
    #[test]
    fn test_zero_cap_admits_nothing() {
        let mut engine = AssignmentEngine::new(1, 2, 0);
        engine.insert(candidate("a", vec![1, 2]));

        assert_eq!(engine.assigned_cells(), 0);
        assert_eq!(engine.candidates().len(), 1);
        assert_eq!(usages(&engine, 0), 0);
    }

    // Tests a strictly better candidate evicts the occupant
    // Verified by skipping the usage decrement on eviction
    #[test]
    fn test_better_candidate_evicts_occupant() {
        let mut engine = AssignmentEngine::new(1, 1, 1);
        engine.insert(candidate("weak", vec![10]));
        engine.insert(candidate("strong", vec![5]));

        assert_eq!(slot(&engine, 0, 0), Some(1));
        assert_eq!(usages(&engine, 0), 0);
        assert_eq!(usages(&engine, 1), 1);
    }

    // Tests an equal score never displaces the sitting occupant
    // Verified by relaxing is_better to inclusive
    #[test]
    fn test_tie_never_evicts() {
        let mut engine = AssignmentEngine::new(1, 1, 1);
        engine.insert(candidate("first", vec![10]));
        engine.insert(candidate("tied", vec![10]));

        assert_eq!(slot(&engine, 0, 0), Some(0));
        assert_eq!(usages(&engine, 1), 0);
    }

    // Tests an evicted candidate immediately re-competes for other cells
    // Verified by dropping evicted candidates instead of re-settling them
    #[test]
    fn test_eviction_cascades_to_open_cells() {
        let mut engine = AssignmentEngine::new(1, 2, 1);
        engine.insert(candidate("a", vec![10, 100]));
        engine.insert(candidate("b", vec![5, 50]));

        // b takes cell 0 from a, and a falls back to cell 1
        assert_eq!(slot(&engine, 0, 0), Some(1));
        assert_eq!(slot(&engine, 0, 1), Some(0));
        assert_eq!(usages(&engine, 0), 1);
        assert_eq!(usages(&engine, 1), 1);
    }

    // Tests a candidate cannot evict an occupant holding fewer cells
    // Verified by dropping the usage comparison from improvability
    #[test]
    fn test_fairness_blocks_heavier_candidates() {
        let mut engine = AssignmentEngine::new(1, 3, 3);
        engine.insert(candidate("a", vec![1, 1, 1]));
        engine.insert(candidate("b", vec![0, 0, 0]));

        // b evicts a twice, but by its third claim it holds two cells to
        // a's one, so the last eviction is refused despite the better score
        assert_eq!(slot(&engine, 0, 0), Some(1));
        assert_eq!(slot(&engine, 0, 1), Some(1));
        assert_eq!(slot(&engine, 0, 2), Some(0));
        assert_eq!(usages(&engine, 0), 1);
        assert_eq!(usages(&engine, 1), 2);
    }

    // Tests finish groups cells by candidate, ordered by first claimed cell
    // Verified by ordering groups by insertion index instead
    #[test]
    fn test_finish_groups_by_first_claimed_cell() {
        let mut engine = AssignmentEngine::new(2, 2, 2);
        engine.insert(candidate("early", vec![10, 1, 1, 10]));
        engine.insert(candidate("late", vec![1, 50, 50, 2]));

        let table = engine.finish();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.columns(), 2);
        assert_eq!(table.scored_candidates(), 2);
        assert_eq!(table.assigned_cells(), 4);
        assert!(!table.is_empty());

        // "late" owns cell (0, 0), so it leads the table despite inserting last
        let summary: Vec<(String, Vec<[usize; 2]>)> = table
            .assignments()
            .iter()
            .map(|assignment| {
                (
                    assignment.source().display().to_string(),
                    assignment.cells().to_vec(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("late".to_string(), vec![[0, 0], [1, 1]]),
                ("early".to_string(), vec![[0, 1], [1, 0]]),
            ]
        );
    }

    // Tests an engine with no insertions freezes into an empty table
    #[test]
    fn test_finish_without_candidates_is_empty() {
        let engine: AssignmentEngine<FixedScores> = AssignmentEngine::new(2, 2, 1);

        let table = engine.finish();
        assert!(table.is_empty());
        assert_eq!(table.assigned_cells(), 0);
        assert_eq!(table.scored_candidates(), 0);
    }

    // Tests a candidate that claims nothing still competes later
    // Verified by discarding candidates that settle without a claim
    #[test]
    fn test_unplaced_candidate_competes_after_eviction() {
        let mut engine = AssignmentEngine::new(1, 1, 1);
        engine.insert(candidate("sitting", vec![5]));
        engine.insert(candidate("waiting", vec![7]));

        assert_eq!(slot(&engine, 0, 0), Some(0));

        // A stronger rival displaces the occupant; the grid has one cell, so
        // the loser stays out, but the engine retained all three candidates
        engine.insert(candidate("rival", vec![3]));
        assert_eq!(slot(&engine, 0, 0), Some(2));
        assert_eq!(engine.candidates().len(), 3);
        assert_eq!(usages(&engine, 0), 0);
        assert_eq!(usages(&engine, 1), 0);
        assert_eq!(usages(&engine, 2), 1);
    }
}
