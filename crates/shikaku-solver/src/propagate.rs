//! Propagator: fixed-point filtering by rectangle-uniqueness and
//! cell-uniqueness, placing forced rectangles as it goes.

use std::collections::BTreeMap;

use shikaku_core::{Board, Coordinate, Rect};

/// Per-clue candidate lists still viable at a given point in the search.
pub type Remaining = BTreeMap<Coordinate, Vec<Rect>>;

/// The outcome of running the propagator to a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagateOutcome {
    /// No completion is possible from the current state.
    Infeasible,
    /// A fixed point was reached without contradiction. `remaining` may or
    /// may not be empty; the caller decides what to do next.
    FixedPoint,
}

/// Runs the propagator to a fixed point, mutating `board` in place and
/// shrinking `remaining` as clues get forced. `next_id` is the caller's
/// rectangle-ID counter; every placement consumes the next value from it.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use shikaku_core::{Board, Coordinate, Grid, Size};
/// use shikaku_solver::{PropagateOutcome, generate_candidates, propagate};
///
/// // A single clue spanning the whole board is forced on the first pass.
/// let size = Size::new(2, 2);
/// let active = Grid::filled(size, true);
/// let mut clues = BTreeMap::new();
/// clues.insert(Coordinate::new(0, 0), 4);
/// let mut board = Board::try_new(size, active, clues)?;
/// let mut remaining = generate_candidates(&board);
/// let mut next_id = 1;
///
/// let outcome = propagate(&mut board, &mut remaining, &mut next_id);
/// assert_eq!(outcome, PropagateOutcome::FixedPoint);
/// assert!(remaining.is_empty());
/// assert!(board.is_fully_assigned());
/// # Ok::<(), shikaku_core::BoardError>(())
/// ```
#[must_use]
pub fn propagate(
    board: &mut Board,
    remaining: &mut Remaining,
    next_id: &mut u32,
) -> PropagateOutcome {
    loop {
        if remaining.is_empty() {
            return PropagateOutcome::FixedPoint;
        }
        let before = signature(remaining);
        if apply_rule_r1(board, remaining, next_id).is_err() {
            return PropagateOutcome::Infeasible;
        }
        if apply_rule_r2(board, remaining, next_id).is_err() {
            return PropagateOutcome::Infeasible;
        }
        if remaining.is_empty() || signature(remaining) == before {
            return PropagateOutcome::FixedPoint;
        }
    }
}

/// A per-clue candidate-count vector (clue-set identity plus per-clue
/// count), compared before and after a pass to detect the fixed point.
fn signature(remaining: &Remaining) -> Vec<(Coordinate, usize)> {
    remaining
        .iter()
        .map(|(&clue, candidates)| (clue, candidates.len()))
        .collect()
}

struct Infeasible;

fn is_rect_free(board: &Board, rect: Rect) -> bool {
    rect.cells()
        .all(|cell| board.is_active(cell) && board.assignment_at(cell) == 0)
}

fn place(board: &mut Board, next_id: &mut u32, rect: Rect) {
    let id = *next_id;
    *next_id += 1;
    board.place_rectangle(rect, id);
}

/// Rule R1 — rectangle-unique placement: a clue whose only remaining
/// candidate with all-free cells is a single rectangle must place it.
fn apply_rule_r1(
    board: &mut Board,
    remaining: &mut Remaining,
    next_id: &mut u32,
) -> Result<(), Infeasible> {
    let clues: Vec<Coordinate> = remaining.keys().copied().collect();
    for clue in clues {
        // A prior placement in this same pass may have already resolved
        // (and removed) this clue.
        let Some(candidates) = remaining.get(&clue) else {
            continue;
        };
        let free: Vec<Rect> = candidates
            .iter()
            .copied()
            .filter(|&rect| is_rect_free(board, rect))
            .collect();
        if free.is_empty() {
            return Err(Infeasible);
        }
        if free.len() == 1 {
            place(board, next_id, free[0]);
            remaining.remove(&clue);
        } else {
            remaining.insert(clue, free);
        }
    }
    Ok(())
}

/// Rule R2 — cell-forced reasoning: an unassigned cell that only one clue's
/// candidates can possibly cover forces that clue's candidate set to
/// shrink, or to place outright when only one candidate remains.
fn apply_rule_r2(
    board: &mut Board,
    remaining: &mut Remaining,
    next_id: &mut u32,
) -> Result<(), Infeasible> {
    let cells: Vec<Coordinate> = board.unassigned_active_cells().collect();
    for cell in cells {
        if board.assignment_at(cell) != 0 {
            // Resolved earlier in this same pass.
            continue;
        }
        let mut covering_clues = remaining
            .iter()
            .filter_map(|(&clue, candidates)| {
                let covering: Vec<Rect> =
                    candidates.iter().copied().filter(|r| r.contains(cell)).collect();
                (!covering.is_empty()).then_some((clue, covering))
            });
        let Some((clue, covering)) = covering_clues.next() else {
            return Err(Infeasible);
        };
        if covering_clues.next().is_some() {
            // More than one clue could cover this cell; nothing is forced.
            continue;
        }
        if covering.len() == 1 {
            let k = covering[0];
            if !is_rect_free(board, k) {
                return Err(Infeasible);
            }
            place(board, next_id, k);
            remaining.remove(&clue);
        } else {
            remaining.insert(clue, covering);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap as Map;

    use shikaku_core::{Coordinate, Grid, Size};

    use super::*;
    use crate::candidates::generate_candidates;

    fn board(size: Size, clues: &[(Coordinate, u32)]) -> Board {
        let active = Grid::filled(size, true);
        let clues: Map<_, _> = clues.iter().copied().collect();
        Board::try_new(size, active, clues).unwrap()
    }

    #[test]
    fn test_single_clue_filling_whole_board_is_forced() {
        let mut b = board(Size::new(2, 2), &[(Coordinate::new(0, 0), 4)]);
        let mut remaining = generate_candidates(&b);
        let mut next_id = 1;
        let outcome = propagate(&mut b, &mut remaining, &mut next_id);
        assert_eq!(outcome, PropagateOutcome::FixedPoint);
        assert!(remaining.is_empty());
        assert!(b.is_fully_assigned());
    }

    #[test]
    fn test_four_corner_clues_force_quadrants() {
        let mut b = board(
            Size::new(4, 4),
            &[
                (Coordinate::new(0, 0), 4),
                (Coordinate::new(0, 3), 4),
                (Coordinate::new(3, 0), 4),
                (Coordinate::new(3, 3), 4),
            ],
        );
        let mut remaining = generate_candidates(&b);
        let mut next_id = 1;
        let outcome = propagate(&mut b, &mut remaining, &mut next_id);
        assert_eq!(outcome, PropagateOutcome::FixedPoint);
        assert!(remaining.is_empty());
        assert!(b.is_fully_assigned());
    }

    #[test]
    fn test_unsatisfiable_clue_sum_is_infeasible() {
        // A clue demanding more area than the board has admits no candidate.
        let mut b = board(Size::new(1, 1), &[(Coordinate::new(0, 0), 4)]);
        let mut remaining = generate_candidates(&b);
        let mut next_id = 1;
        let outcome = propagate(&mut b, &mut remaining, &mut next_id);
        assert_eq!(outcome, PropagateOutcome::Infeasible);
    }

    #[test]
    fn test_propagate_on_empty_remaining_is_immediate_fixed_point() {
        let mut b = board(Size::new(1, 1), &[]);
        let mut remaining = Remaining::new();
        let mut next_id = 1;
        assert_eq!(
            propagate(&mut b, &mut remaining, &mut next_id),
            PropagateOutcome::FixedPoint
        );
    }
}
