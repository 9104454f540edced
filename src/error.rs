//! Error taxonomy for the solver.
//!
//! `InvalidInput` and `Internal` are the only two constructible
//! variants. `Timeout` is not an error: it surfaces as the `timeout`
//! field of a [`crate::solver::SolveResult`], always alongside a valid
//! incumbent coloring. `Infeasible` does not exist as a variant either
//! — every simple undirected graph is `n`-colorable, so a B&B run that
//! fails to find *any* proper coloring is a bug, not a legitimate
//! outcome; such a bug shows up as `Internal`.

use thiserror::Error;

/// Errors raised while constructing a [`crate::graph::Graph`] or
/// parsing a DIMACS file, or detected as invariant breaches during a
/// solve.
#[derive(Debug, Error)]
pub enum ColoringError {
    /// The CSR descriptor or DIMACS file violates the integrity rules
    /// of spec §6.1/§6.2 (out-of-range vertex id, asymmetric adjacency,
    /// self-loop, missing `p` line, `n == 0`, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An internal invariant was violated (popcount mismatch, negative
    /// saturation, unassigned color after completion, ...). The engine
    /// fails fast rather than return a coloring it cannot vouch for.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColoringError>;
