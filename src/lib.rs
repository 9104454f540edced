//! Exact branch-and-bound chromatic number solver (Sewell 1996, Furini 2017).

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]

/// fixed-width bitset packed into `u64` words
pub mod bitset;

/// error taxonomy shared by graph construction, parsing, and solving
pub mod error;

/// read-only CSR graph view
pub mod graph;

/// DIMACS `.col` parser
pub mod dimacs;

/// initial greedy clique lower bound and DSATUR upper bound
pub mod heuristics;

/// progress snapshots and the wall-clock deadline budget
pub mod progress;

/// the Sewell and Furini B&B engines
pub mod engine;

/// the solver façade: dispatch and racing of the two engines
pub mod solver;
