/// Errors that can occur during solving.
///
/// Ordinary puzzle infeasibility is not represented here — it is an
/// expected outcome, carried in-band as an empty result set. This type is
/// reserved for the one case a correctly implemented solver should never
/// hit: an internal consistency check failing.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    /// The propagator reached a state that violates an invariant the search
    /// driver is responsible for upholding (e.g. a candidate list went
    /// missing for a clue still present in `remaining`).
    ///
    /// This indicates a bug in the solver itself, not an unsolvable puzzle.
    #[display("internal consistency check failed: {_0}")]
    Inconsistent(#[error(not(source))] &'static str),
}
