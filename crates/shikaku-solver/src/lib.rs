//! Shikaku solver: candidate generation, constraint propagation, recursive
//! search with memoization, and canonical-form solution enumeration.
//!
//! The entry point is [`solve`]. Everything else in this crate is an
//! implementation detail of that one operation, exposed publicly only where
//! a host embedding the solver might reasonably want to drive a stage on
//! its own (e.g. for diagnostics or benchmarking).
//!
//! # Architecture
//!
//! Solving a board runs four stages in sequence:
//!
//! 1. [`generate_candidates`]: for every clue, enumerate every geometrically
//!    admissible rectangle.
//! 2. [`propagate`]: alternate rectangle-unique and cell-forced filtering
//!    until a fixed point is reached, placing forced rectangles as it goes.
//! 3. [`SearchContext::search`]: once propagation alone cannot finish the
//!    board, pick a branching clue and recurse on each of its remaining
//!    candidates, memoizing sub-results by the set of still-unassigned cells.
//! 4. [`canonicalize`]: encode each leaf board as a stable string, which also
//!    serves as the de-duplication key across branches.
//!
//! A `SearchContext` owns the rectangle-ID counter and the memoization cache
//! for exactly one [`solve`] call; nothing is shared across invocations.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use shikaku_core::{Board, Coordinate, Grid, Size};
//! use shikaku_solver::solve;
//!
//! // A 2x2 board with a single clue worth the whole board.
//! let size = Size::new(2, 2);
//! let active = Grid::filled(size, true);
//! let mut clues = BTreeMap::new();
//! clues.insert(Coordinate::new(0, 0), 4);
//! let board = Board::try_new(size, active, clues)?;
//!
//! let solutions = solve(&board);
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions.iter().next().unwrap(), "00000000");
//! # Ok::<(), shikaku_core::BoardError>(())
//! ```
//!
//! ## Checking for a unique solution
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use shikaku_core::{Board, Coordinate, Grid, Size};
//! use shikaku_solver::solve;
//!
//! let size = Size::new(4, 4);
//! let active = Grid::filled(size, true);
//! let mut clues = BTreeMap::new();
//! for coord in [
//!     Coordinate::new(0, 0),
//!     Coordinate::new(0, 3),
//!     Coordinate::new(3, 0),
//!     Coordinate::new(3, 3),
//! ] {
//!     clues.insert(coord, 4);
//! }
//! let board = Board::try_new(size, active, clues)?;
//!
//! match solve(&board).len() {
//!     0 => println!("no solution"),
//!     1 => println!("unique solution - valid puzzle"),
//!     _ => println!("multiple solutions - ambiguous puzzle"),
//! }
//! # Ok::<(), shikaku_core::BoardError>(())
//! ```

mod candidates;
mod canonical;
mod error;
mod memo;
mod propagate;
mod search;

use std::collections::BTreeSet;

use shikaku_core::Board;

pub use candidates::generate_candidates;
pub use canonical::canonicalize;
pub use error::SolverError;
pub use memo::memo_key;
pub use propagate::{PropagateOutcome, Remaining, propagate};
pub use search::SearchContext;

/// Tunable knobs for [`solve`]. Currently empty: the solver's only input is
/// the board itself. This exists as a seam so a future host-tunable
/// knob (e.g. a branch cap) can be added without changing `solve`'s
/// signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct SolveOptions {}

impl SolveOptions {
    /// Returns the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Solves a Shikaku board, returning every valid solution as a canonical
/// string, or an empty set if the board admits none.
///
/// The board must satisfy the necessary precondition that the sum of its
/// clue values equals its active-cell count; when it doesn't, `solve`
/// returns an empty set rather than treating the mismatch as an error,
/// since a puzzle failing this check is indistinguishable from one that is
/// simply unsolvable.
///
/// # Panics
///
/// Panics if an internal consistency check fails — a bug in the solver
/// itself, never a property of the input board. Hosts that must not panic
/// on such bugs should use [`try_solve`] instead.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use shikaku_core::{Board, Coordinate, Grid, Size};
/// use shikaku_solver::solve;
///
/// let size = Size::new(1, 1);
/// let active = Grid::filled(size, true);
/// let mut clues = BTreeMap::new();
/// clues.insert(Coordinate::new(0, 0), 1);
/// let board = Board::try_new(size, active, clues)?;
///
/// assert_eq!(solve(&board), std::collections::BTreeSet::from(["00".to_string()]));
/// # Ok::<(), shikaku_core::BoardError>(())
/// ```
#[must_use]
pub fn solve(board: &Board) -> BTreeSet<String> {
    try_solve(board).unwrap_or_else(|err| panic!("solver consistency check failed: {err}"))
}

/// Fallible counterpart to [`solve`], for hosts that cannot tolerate a
/// panic on an internal consistency failure.
///
/// # Errors
///
/// Returns [`SolverError`] if an internal consistency check fails. This
/// never happens for a board on which `solve`'s precondition holds and the
/// propagator/search driver are implemented correctly; it exists to give
/// embedding hosts a recoverable path rather than an unconditional panic.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use shikaku_core::{Board, Coordinate, Grid, Size};
/// use shikaku_solver::try_solve;
///
/// let size = Size::new(2, 2);
/// let active = Grid::filled(size, true);
/// let mut clues = BTreeMap::new();
/// clues.insert(Coordinate::new(0, 0), 4);
/// let board = Board::try_new(size, active, clues)?;
///
/// let solutions = try_solve(&board)?;
/// assert_eq!(solutions.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn try_solve(board: &Board) -> Result<BTreeSet<String>, SolverError> {
    try_solve_with_options(board, SolveOptions::new())
}

/// [`try_solve`] with explicit [`SolveOptions`].
///
/// # Errors
///
/// See [`try_solve`].
pub fn try_solve_with_options(
    board: &Board,
    _options: SolveOptions,
) -> Result<BTreeSet<String>, SolverError> {
    if board.active_cell_count() == 0 {
        // Boundary case: an all-void board trivially satisfies every
        // invariant and the sum-of-clues precondition (0 == 0); its unique
        // "solution" is the empty canonical string.
        return Ok(BTreeSet::from([String::new()]));
    }

    let clue_sum: u64 = board.clues().map(|(_, value)| u64::from(value)).sum();
    #[expect(clippy::cast_possible_truncation)]
    if clue_sum != board.active_cell_count() as u64 {
        return Ok(BTreeSet::new());
    }

    let remaining = generate_candidates(board);
    SearchContext::new().search(board.copy(), remaining)
}
