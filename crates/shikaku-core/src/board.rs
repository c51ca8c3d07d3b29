//! The board model: an immutable-by-convention snapshot of dimensions,
//! clue map, active-cell mask, and assignment array.

use std::collections::BTreeMap;

use crate::{BoardError, Coordinate, Grid, Rect, Size};

/// A Shikaku board: its shape, which cells are active, where the clues are,
/// and which cells have already been assigned to a placed rectangle.
///
/// Equality is structural, used by the canonicalizer (not derived here since
/// comparing boards directly is never needed outside of tests; the
/// canonical string is the comparison key everywhere else).
#[derive(Debug, Clone)]
pub struct Board {
    size: Size,
    active: Grid<bool>,
    clues: BTreeMap<Coordinate, u32>,
    assignment: Grid<u32>,
}

impl Board {
    /// Builds a board from an active-cell mask and a clue map, validating
    /// every invariant in the data model. Returns [`BoardError`] if the
    /// input is malformed; use this constructor whenever the board
    /// originates from untrusted or external input (e.g. a parser).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] if either dimension is zero,
    /// [`BoardError::ClueOnVoidCell`] if a clue sits on an inactive cell, or
    /// [`BoardError::InvalidClueValue`] if a clue's value is zero.
    pub fn try_new(
        size: Size,
        active: Grid<bool>,
        clues: BTreeMap<Coordinate, u32>,
    ) -> Result<Self, BoardError> {
        if size.height() == 0 || size.width() == 0 {
            return Err(BoardError::InvalidSize(size.height(), size.width()));
        }
        for (&coord, &value) in &clues {
            if value == 0 {
                return Err(BoardError::InvalidClueValue(coord, value));
            }
            if !active[coord] {
                return Err(BoardError::ClueOnVoidCell(coord));
            }
        }
        let assignment = Grid::filled(size, 0u32);
        Ok(Self {
            size,
            active,
            clues,
            assignment,
        })
    }

    /// Returns the board's dimensions.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns `true` if `coord` is part of the puzzle (not void).
    #[must_use]
    pub fn is_active(&self, coord: Coordinate) -> bool {
        self.active[coord]
    }

    /// Returns the clue value at `coord`, if any.
    #[must_use]
    pub fn clue_at(&self, coord: Coordinate) -> Option<u32> {
        self.clues.get(&coord).copied()
    }

    /// Returns every clue in row-major coordinate order.
    pub fn clues(&self) -> impl Iterator<Item = (Coordinate, u32)> + '_ {
        self.clues.iter().map(|(&coord, &value)| (coord, value))
    }

    /// Returns how many clues this board has.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    /// Returns the rectangle ID assigned to `coord`, or `0` if unassigned
    /// (void cells always read `0`).
    #[must_use]
    pub fn assignment_at(&self, coord: Coordinate) -> u32 {
        self.assignment[coord]
    }

    /// Returns the number of active cells.
    #[must_use]
    pub fn active_cell_count(&self) -> usize {
        self.coordinates()
            .filter(|&coord| self.is_active(coord))
            .count()
    }

    /// Returns an iterator over every coordinate of the board, active or
    /// void, in row-major order.
    pub fn coordinates(&self) -> crate::grid::Coordinates {
        crate::grid::Coordinates::new(self.size)
    }

    /// Returns `true` once every active cell carries a positive assignment.
    #[must_use]
    pub fn is_fully_assigned(&self) -> bool {
        self.coordinates()
            .all(|coord| !self.is_active(coord) || self.assignment_at(coord) != 0)
    }

    /// Returns an iterator over the active cells that are still unassigned,
    /// in row-major order. This is the basis of the solver's memoization key.
    pub fn unassigned_active_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.coordinates()
            .filter(|&coord| self.is_active(coord) && self.assignment_at(coord) == 0)
    }

    /// Deep-copies this board. Named to match the vocabulary used throughout
    /// the search driver, which takes a distinct copy per recursion branch.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Writes `id` into every cell of `rect`.
    ///
    /// # Panics
    ///
    /// Panics if any cell of `rect` is out of bounds, void, or already
    /// assigned, or if `id` is zero. These conditions can only arise from a
    /// bug in the caller (the propagator and search driver always verify
    /// candidates before placing them), so this is a contract violation
    /// rather than recoverable input, matching [`Board::try_place_rectangle`]'s
    /// role as the fallible counterpart for untrusted callers.
    pub fn place_rectangle(&mut self, rect: Rect, id: u32) {
        self.try_place_rectangle(rect, id)
            .unwrap_or_else(|err| panic!("place_rectangle precondition violated: {err}"));
    }

    /// Fallible counterpart to [`Board::place_rectangle`], for hosts that
    /// cannot guarantee the precondition ahead of time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPlacement`] if `rect` falls outside the
    /// board, covers a void cell, or overlaps an already-assigned cell.
    pub fn try_place_rectangle(&mut self, rect: Rect, id: u32) -> Result<(), BoardError> {
        if id == 0 || !rect.within_bounds(self.size) {
            return Err(BoardError::InvalidPlacement(rect));
        }
        for coord in rect.cells() {
            if !self.is_active(coord) || self.assignment_at(coord) != 0 {
                return Err(BoardError::InvalidPlacement(rect));
            }
        }
        for coord in rect.cells() {
            self.assignment[coord] = id;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_2x2_all_active() -> Board {
        let size = Size::new(2, 2);
        let active = Grid::filled(size, true);
        let mut clues = BTreeMap::new();
        clues.insert(Coordinate::new(0, 0), 4);
        Board::try_new(size, active, clues).expect("valid board")
    }

    #[test]
    fn test_try_new_rejects_zero_dimension() {
        let size = Size::new(0, 3);
        let active = Grid::filled(size, true);
        let err = Board::try_new(size, active, BTreeMap::new()).unwrap_err();
        assert!(matches!(err, BoardError::InvalidSize(0, 3)));
    }

    #[test]
    fn test_try_new_rejects_clue_on_void_cell() {
        let size = Size::new(2, 2);
        let mut active = Grid::filled(size, true);
        active[Coordinate::new(0, 0)] = false;
        let mut clues = BTreeMap::new();
        clues.insert(Coordinate::new(0, 0), 4);
        let err = Board::try_new(size, active, clues).unwrap_err();
        assert!(matches!(err, BoardError::ClueOnVoidCell(_)));
    }

    #[test]
    fn test_try_new_rejects_zero_clue_value() {
        let size = Size::new(2, 2);
        let active = Grid::filled(size, true);
        let mut clues = BTreeMap::new();
        clues.insert(Coordinate::new(0, 0), 0);
        let err = Board::try_new(size, active, clues).unwrap_err();
        assert!(matches!(err, BoardError::InvalidClueValue(_, 0)));
    }

    #[test]
    fn test_place_rectangle_fills_cells() {
        let mut board = board_2x2_all_active();
        board.place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(2, 2)), 1);
        assert!(board.is_fully_assigned());
        assert_eq!(board.assignment_at(Coordinate::new(1, 1)), 1);
    }

    #[test]
    #[should_panic(expected = "precondition violated")]
    fn test_place_rectangle_panics_on_overlap() {
        let mut board = board_2x2_all_active();
        board.place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(1, 1)), 1);
        board.place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(1, 1)), 2);
    }

    #[test]
    fn test_try_place_rectangle_rejects_void_cell() {
        let size = Size::new(2, 2);
        let mut active = Grid::filled(size, true);
        active[Coordinate::new(1, 1)] = false;
        let mut board = Board::try_new(size, active, BTreeMap::new()).unwrap();
        let err = board
            .try_place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(2, 2)), 1)
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidPlacement(_)));
    }

    #[test]
    fn test_unassigned_active_cells_excludes_void_and_placed() {
        let mut board = board_2x2_all_active();
        board.place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(1, 1)), 1);
        let remaining: Vec<_> = board.unassigned_active_cells().collect();
        assert_eq!(
            remaining,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_copy_is_independent() {
        let board = board_2x2_all_active();
        let mut copy = board.copy();
        copy.place_rectangle(Rect::new(Coordinate::new(0, 0), Size::new(2, 2)), 1);
        assert_eq!(board.assignment_at(Coordinate::new(0, 0)), 0);
        assert_eq!(copy.assignment_at(Coordinate::new(0, 0)), 1);
    }
}
