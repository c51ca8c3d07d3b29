//! Candidate generator: for each clue, enumerate every geometrically
//! admissible rectangle.

use std::collections::BTreeMap;

use shikaku_core::{Board, Coordinate, Rect, Size};

/// Enumerates every candidate rectangle for every clue on `board`.
///
/// A rectangle is a candidate for clue `(c, value)` if it lies within
/// bounds, covers only active cells, contains `c`, contains no other clue,
/// and has area equal to `value`. Candidates for a given clue are returned
/// in deterministic order (lexicographic by `start.y, start.x, height,
/// width`), which is what makes search order, and therefore branch order,
/// deterministic.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use shikaku_core::{Board, Coordinate, Grid, Size};
/// use shikaku_solver::generate_candidates;
///
/// let size = Size::new(1, 4);
/// let active = Grid::filled(size, true);
/// let mut clues = BTreeMap::new();
/// clues.insert(Coordinate::new(0, 0), 2);
/// let board = Board::try_new(size, active, clues)?;
///
/// let candidates = generate_candidates(&board);
/// // A 1x2 area on a 1-row board only fits in one place: starting at the clue.
/// assert_eq!(candidates[&Coordinate::new(0, 0)].len(), 1);
/// # Ok::<(), shikaku_core::BoardError>(())
/// ```
#[must_use]
pub fn generate_candidates(board: &Board) -> BTreeMap<Coordinate, Vec<Rect>> {
    board
        .clues()
        .map(|(clue, value)| (clue, candidates_for_clue(board, clue, value)))
        .collect()
}

fn candidates_for_clue(board: &Board, clue: Coordinate, value: u32) -> Vec<Rect> {
    let mut candidates: Vec<Rect> = divisor_pairs(value)
        .flat_map(orientations)
        .flat_map(|(h, w)| rectangles_covering(clue, h, w))
        .filter(|&rect| is_admissible(board, clue, rect))
        .collect();
    candidates.sort_by_key(|rect| {
        (
            rect.start().y(),
            rect.start().x(),
            rect.size().height(),
            rect.size().width(),
        )
    });
    candidates.dedup();
    candidates
}

/// Unordered divisor pairs `(p, q)` of `value` with `p <= q`, including
/// `p = q` for perfect squares.
fn divisor_pairs(value: u32) -> impl Iterator<Item = (u32, u32)> {
    (1..=value)
        .filter(move |&p| p != 0 && value % p == 0 && p.saturating_mul(p) <= value)
        .map(move |p| (p, value / p))
}

/// Both orientations `(h, w) = (p, q)` and `(q, p)` of a divisor pair,
/// skipping the duplicate when the rectangle is square.
fn orientations((p, q): (u32, u32)) -> impl Iterator<Item = (u32, u32)> {
    let swapped = (p != q).then_some((q, p));
    std::iter::once((p, q)).chain(swapped)
}

/// Every placement of an `h x w` rectangle that covers `clue`.
fn rectangles_covering(clue: Coordinate, h: u32, w: u32) -> impl Iterator<Item = Rect> {
    (0..h).flat_map(move |dh| {
        (0..w).filter_map(move |dw| {
            let start_y = u32::try_from(i64::from(clue.y()) - i64::from(dh)).ok()?;
            let start_x = u32::try_from(i64::from(clue.x()) - i64::from(dw)).ok()?;
            Some(Rect::new(
                Coordinate::new(start_y, start_x),
                Size::new(h, w),
            ))
        })
    })
}

fn is_admissible(board: &Board, clue: Coordinate, rect: Rect) -> bool {
    if !rect.within_bounds(board.size()) || !rect.contains(clue) {
        return false;
    }
    rect.cells()
        .all(|cell| board.is_active(cell) && (cell == clue || board.clue_at(cell).is_none()))
}
