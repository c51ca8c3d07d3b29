//! Search driver: chooses a branching clue, recurses on each of its
//! candidates, unions solutions, and memoizes sub-results by the set of
//! unassigned active cells.

use std::collections::{BTreeSet, HashMap};

use shikaku_core::{Board, Coordinate, Rect, Size};

use crate::SolverError;
use crate::canonical::canonicalize;
use crate::memo::memo_key;
use crate::propagate::{PropagateOutcome, Remaining, propagate};

/// One full partition of a sub-problem's unassigned region into disjoint
/// rectangles, as found during a `search` call. Cached and replayed under
/// fresh rectangle IDs so it can be grafted onto any board that reaches the
/// same unassigned-cell set through a different placement history.
type CachedCompletion = Vec<Rect>;

/// Owns the rectangle-ID counter and memoization cache for a single `solve`
/// invocation. Scoped to one call (never process-global) so concurrent
/// `solve` calls stay independent.
pub struct SearchContext {
    next_id: u32,
    cache: HashMap<String, Vec<CachedCompletion>>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            cache: HashMap::new(),
        }
    }

    /// Runs the search driver on `board` with the given starting candidate
    /// lists, returning the set of canonical solution strings.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] if an internal consistency check fails (a
    /// clue reaches branch selection with no viable candidate, which a
    /// correctly implemented propagator never allows through).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use shikaku_core::{Board, Coordinate, Grid, Size};
    /// use shikaku_solver::{SearchContext, generate_candidates};
    ///
    /// let size = Size::new(1, 1);
    /// let active = Grid::filled(size, true);
    /// let mut clues = BTreeMap::new();
    /// clues.insert(Coordinate::new(0, 0), 1);
    /// let board = Board::try_new(size, active, clues)?;
    /// let remaining = generate_candidates(&board);
    ///
    /// let solutions = SearchContext::new().search(board, remaining)?;
    /// assert_eq!(solutions, std::collections::BTreeSet::from(["00".to_string()]));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn search(
        &mut self,
        mut board: Board,
        mut remaining: Remaining,
    ) -> Result<BTreeSet<String>, SolverError> {
        match propagate(&mut board, &mut remaining, &mut self.next_id) {
            PropagateOutcome::Infeasible => return Ok(BTreeSet::new()),
            PropagateOutcome::FixedPoint => {}
        }
        if remaining.is_empty() {
            let mut solutions = BTreeSet::new();
            solutions.insert(canonicalize(&board));
            return Ok(solutions);
        }

        let key = memo_key(&board);
        if let Some(completions) = self.cache.get(&key).cloned() {
            log::trace!("cache hit: {} cached completions", completions.len());
            let replayed: BTreeSet<String> = completions
                .iter()
                .map(|completion| self.replay(&board, completion))
                .collect();
            return Ok(replayed);
        }

        let branch_clue = choose_branch_clue(&remaining)?;
        let candidates = remaining[&branch_clue].clone();
        let mut solutions = BTreeSet::new();
        for candidate in &candidates {
            log::trace!(
                "branching on clue {branch_clue} with candidate size {:?}",
                candidate.size()
            );
            let mut branch_remaining = remaining.clone();
            branch_remaining.insert(branch_clue, vec![*candidate]);
            let branch_solutions = self.search(board.copy(), branch_remaining)?;
            solutions.extend(branch_solutions);
        }

        let unassigned: Vec<Coordinate> = board.unassigned_active_cells().collect();
        let completions: Vec<CachedCompletion> = solutions
            .iter()
            .map(|solution| extract_completion(&unassigned, board.size(), solution))
            .collect();
        self.cache.insert(key, completions);

        Ok(solutions)
    }

    /// Reconstructs the canonical string for `board` merged with a cached
    /// completion pattern, under fresh rectangle IDs disjoint from any IDs
    /// already present on `board`.
    fn replay(&mut self, board: &Board, completion: &[Rect]) -> String {
        let mut merged = board.copy();
        for &rect in completion {
            let id = self.next_id;
            self.next_id += 1;
            merged.place_rectangle(rect, id);
        }
        canonicalize(&merged)
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the branching clue: minimum remaining candidates first, ties
/// broken by largest clue value, ties thereafter broken lexicographically
/// by coordinate.
fn choose_branch_clue(remaining: &Remaining) -> Result<Coordinate, SolverError> {
    remaining
        .iter()
        .map(|(&clue, candidates)| {
            #[expect(clippy::cast_possible_truncation)]
            let value = candidates.first().map_or(0, |rect| rect.area() as u32);
            (candidates.len(), std::cmp::Reverse(value), clue)
        })
        .min()
        .map(|(_, _, clue)| clue)
        .ok_or(SolverError::Inconsistent(
            "choose_branch_clue called with empty remaining",
        ))
}

/// Extracts, from a solution's canonical string, the rectangles that cover
/// exactly the cells in `unassigned` — the portion of the solution this
/// search frame is actually responsible for. Every rectangle placed after
/// this frame lies entirely within `unassigned` (search never re-touches an
/// already-assigned cell), so grouping by label within that coordinate set
/// recovers each rectangle's exact bounding box.
fn extract_completion(unassigned: &[Coordinate], size: Size, canonical: &str) -> CachedCompletion {
    let mut bounds: HashMap<&str, (Coordinate, Coordinate)> = HashMap::new();
    for &coord in unassigned {
        let index = row_major_index(coord, size);
        let token = &canonical[index * 2..index * 2 + 2];
        bounds
            .entry(token)
            .and_modify(|(min, max)| {
                *min = Coordinate::new(min.y().min(coord.y()), min.x().min(coord.x()));
                *max = Coordinate::new(max.y().max(coord.y()), max.x().max(coord.x()));
            })
            .or_insert((coord, coord));
    }
    bounds
        .into_values()
        .map(|(min, max)| {
            Rect::new(min, Size::new(max.y() - min.y() + 1, max.x() - min.x() + 1))
        })
        .collect()
}

#[expect(clippy::cast_possible_truncation)]
fn row_major_index(coord: Coordinate, size: Size) -> usize {
    (coord.y() as usize) * (size.width() as usize) + coord.x() as usize
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use shikaku_core::Grid;

    use super::*;
    use crate::candidates::generate_candidates;

    fn board(size: Size, clues: &[(Coordinate, u32)]) -> Board {
        let active = Grid::filled(size, true);
        let clues: BTreeMap<_, _> = clues.iter().copied().collect();
        Board::try_new(size, active, clues).unwrap()
    }

    #[test]
    fn test_single_clue_board_has_one_solution() {
        let b = board(Size::new(1, 1), &[(Coordinate::new(0, 0), 1)]);
        let remaining = generate_candidates(&b);
        let solutions = SearchContext::new().search(b, remaining).unwrap();
        assert_eq!(solutions, BTreeSet::from(["00".to_string()]));
    }

    #[test]
    fn test_two_by_two_single_clue_solution() {
        let b = board(Size::new(2, 2), &[(Coordinate::new(0, 0), 4)]);
        let remaining = generate_candidates(&b);
        let solutions = SearchContext::new().search(b, remaining).unwrap();
        assert_eq!(solutions, BTreeSet::from(["00000000".to_string()]));
    }

    #[test]
    fn test_four_quadrants_has_unique_solution() {
        // Branching and cache-hit tracing only run here (a board small
        // enough for R1/R2 alone produces no log lines at all); install a
        // logger so `RUST_LOG=trace cargo test -- --nocapture` shows them.
        let _ = env_logger::try_init();
        let b = board(
            Size::new(4, 4),
            &[
                (Coordinate::new(0, 0), 4),
                (Coordinate::new(0, 3), 4),
                (Coordinate::new(3, 0), 4),
                (Coordinate::new(3, 3), 4),
            ],
        );
        let remaining = generate_candidates(&b);
        let solutions = SearchContext::new().search(b, remaining).unwrap();
        assert_eq!(solutions.len(), 1);
        let solution = solutions.iter().next().unwrap();
        assert_eq!(solution.len(), 32);
        assert!(!solution.contains("--"));
    }

    #[test]
    fn test_extract_completion_recovers_rectangle_bounds() {
        let size = Size::new(1, 4);
        let canonical = "00000101";
        let unassigned = vec![
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(0, 2),
            Coordinate::new(0, 3),
        ];
        let mut rects = extract_completion(&unassigned, size, canonical);
        rects.sort_by_key(|r| r.start());
        assert_eq!(
            rects,
            vec![
                Rect::new(Coordinate::new(0, 0), Size::new(1, 2)),
                Rect::new(Coordinate::new(0, 2), Size::new(1, 2)),
            ]
        );
    }
}
