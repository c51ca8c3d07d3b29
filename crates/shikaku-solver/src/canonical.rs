//! Canonicalizer: produces a stable textual encoding of a board's
//! assignment, used both as solution identity and as the memoization key's
//! payload.

use std::collections::HashMap;

use shikaku_core::Board;

/// Produces the canonical string for a fully- or partially-assigned board.
///
/// Walks cells in row-major order, emitting `"--"` for a void cell and, for
/// an active cell, a 2-digit zero-padded label assigned by first-seen order
/// of rectangle IDs during the walk (the first distinct ID seen becomes
/// `"00"`, the next new one `"01"`, and so on). Labels wrap modulo 100 if a
/// board has more than 100 rectangles.
///
/// An unassigned active cell (ID `0`) is itself treated as a distinct
/// "rectangle" for labeling purposes, which is what lets this function also
/// serve the cache-hit relabeling path: re-running it over a board
/// that mixes already-placed cells with a cached sub-solution's labels
/// still produces a single consistent first-seen numbering.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use shikaku_core::{Board, Coordinate, Grid, Rect, Size};
/// use shikaku_solver::canonicalize;
///
/// let size = Size::new(2, 2);
/// let active = Grid::filled(size, true);
/// let mut clues = BTreeMap::new();
/// clues.insert(Coordinate::new(0, 0), 4);
/// let mut board = Board::try_new(size, active, clues)?;
/// board.place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(2, 2)), 7);
///
/// // The raw rectangle ID (7) is renamed to its first-seen label ("00").
/// assert_eq!(canonicalize(&board), "00000000");
/// # Ok::<(), shikaku_core::BoardError>(())
/// ```
#[must_use]
pub fn canonicalize(board: &Board) -> String {
    let mut next_label = 0u32;
    let mut seen: HashMap<u32, u32> = HashMap::new();
    let mut out = String::with_capacity(2 * board.coordinates().len());
    for coord in board.coordinates() {
        if !board.is_active(coord) {
            out.push_str("--");
            continue;
        }
        let id = board.assignment_at(coord);
        let label = *seen.entry(id).or_insert_with(|| {
            let label = next_label % 100;
            next_label += 1;
            label
        });
        out.push_str(&format!("{label:02}"));
    }
    out
}
