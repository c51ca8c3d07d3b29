//! Memoization key construction:
//! two recursion states with identical sets of unassigned active cells are
//! equivalent sub-problems, regardless of which rectangles happen to be
//! placed already or what IDs they carry.

use shikaku_core::Board;

/// The memoization key for `board`: the row-major concatenation of its
/// unassigned active cell coordinates, separated by `|`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use shikaku_core::{Board, Coordinate, Grid, Rect, Size};
/// use shikaku_solver::memo_key;
///
/// let size = Size::new(1, 2);
/// let active = Grid::filled(size, true);
/// let mut board = Board::try_new(size, active, BTreeMap::new())?;
/// assert_eq!(memo_key(&board), "0,0|0,1");
///
/// board.place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(1, 1)), 1);
/// assert_eq!(memo_key(&board), "0,1");
/// # Ok::<(), shikaku_core::BoardError>(())
/// ```
#[must_use]
pub fn memo_key(board: &Board) -> String {
    let mut key = String::new();
    for (i, coord) in board.unassigned_active_cells().enumerate() {
        if i > 0 {
            key.push('|');
        }
        key.push_str(&coord.to_string());
    }
    key
}
