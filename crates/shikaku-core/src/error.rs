//! Errors produced by fallible [`Board`](crate::Board) constructors.

use derive_more::{Display, Error};

use crate::{Coordinate, Rect};

/// Errors returned by the `try_*` constructors on [`Board`](crate::Board).
///
/// These represent malformed *input* — a puzzle description that violates
/// the data model — as distinct from a contract violation by the solver
/// itself, which panics instead (see the non-`try_` counterparts).
#[derive(Debug, Display, Error)]
pub enum BoardError {
    /// Either dimension of the board was zero.
    #[display("board size {_0}x{_1} has a zero dimension")]
    InvalidSize(#[error(not(source))] u32, #[error(not(source))] u32),

    /// A clue was placed on a cell the caller already marked void.
    #[display("clue placed on void cell {_0}")]
    ClueOnVoidCell(#[error(not(source))] Coordinate),

    /// A clue's value was zero, which cannot label any rectangle.
    #[display("clue at {_0} has invalid value {_1}")]
    InvalidClueValue(#[error(not(source))] Coordinate, #[error(not(source))] u32),

    /// A rectangle placement fell outside the board, overlapped an already
    /// assigned cell, or covered a void cell.
    #[display("rectangle {_0:?} cannot be placed")]
    InvalidPlacement(#[error(not(source))] Rect),
}
