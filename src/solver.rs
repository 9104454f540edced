//! The solver façade (spec §4.7/§6.3): picks an engine, runs it, and
//! (optionally) races both engines over a shared immutable graph.

use std::thread;

use serde::Serialize;

use crate::error::ColoringError;
use crate::graph::Graph;
use crate::progress::{Deadline, ProgressSink};

/// Which exact engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variant {
    Sewell,
    Furini,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Sewell => "sewell",
            Variant::Furini => "furini",
        }
    }
}

/// The fixed-shape outcome of one `solve()` call (spec §6.3).
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    pub algo: &'static str,
    /// Chromatic number if `optimal`, otherwise the best upper bound found.
    #[serde(rename = "K")]
    pub k: usize,
    pub coloring: Vec<usize>,
    #[serde(rename = "LB")]
    pub lb: usize,
    #[serde(rename = "UB_init")]
    pub ub_init: usize,
    pub optimal: bool,
    pub nodes: u64,
    pub cuts: u64,
    pub elapsed: f64,
    pub timeout: bool,
    pub history: Vec<crate::progress::Snapshot>,
}

/// Runs a single engine to completion or timeout.
pub fn solve(
    variant: Variant,
    graph: &Graph,
    time_limit_seconds: f64,
    sink: &dyn ProgressSink,
) -> Result<SolveResult, ColoringError> {
    if graph.n() == 0 {
        return Err(ColoringError::InvalidInput("graph has no vertices".into()));
    }
    let deadline = Deadline::from_secs(time_limit_seconds);
    match variant {
        Variant::Sewell => Ok(crate::engine::sewell::sewell_solve(graph, &deadline, sink)),
        Variant::Furini => Ok(crate::engine::furini::furini_solve(graph, &deadline, sink)),
    }
}

/// Races both engines on the same graph from separate OS threads,
/// returning whichever finishes with the better proof (or, if both
/// time out, the one with the tighter incumbent). Neither engine
/// mutates `graph`; `std::thread::scope` lets both borrow it directly
/// without `Arc` (spec §5: "racing two solves on separate threads over
/// a shared immutable graph").
pub fn solve_race(
    graph: &Graph,
    time_limit_seconds: f64,
    sewell_sink: &(dyn ProgressSink),
    furini_sink: &(dyn ProgressSink),
) -> (SolveResult, SolveResult) {
    let deadline = Deadline::from_secs(time_limit_seconds);
    thread::scope(|scope| {
        let sewell_handle = scope.spawn(|| {
            crate::engine::sewell::sewell_solve(graph, &deadline, sewell_sink)
        });
        let furini_handle = scope.spawn(|| {
            crate::engine::furini::furini_solve(graph, &deadline, furini_sink)
        });
        (
            sewell_handle.join().expect("sewell engine thread panicked"),
            furini_handle.join().expect("furini engine thread panicked"),
        )
    })
}
