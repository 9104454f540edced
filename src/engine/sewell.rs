//! Sewell's (1996) exact branch-and-bound engine (spec §4.5).
//!
//! DSATUR branching with a third tie-break (shared available colors
//! with uncolored neighbors), a feasibility-only color-candidate cut,
//! and no per-node bound recomputation — the cheaper of the two
//! engines per node, trading that for more nodes explored than Furini
//! on instances with large cliques.

use crate::engine::common::{candidate_colors, dsatur_candidates, SearchState};
use crate::graph::{Graph, VertexId};
use crate::heuristics::{dsatur_ub, greedy_clique_lb};
use crate::progress::{Deadline, ProgressSink, Snapshot};
use crate::solver::SolveResult;

const SNAPSHOT_INTERVAL: u64 = 500;

pub fn sewell_solve(graph: &Graph, deadline: &Deadline, sink: &dyn ProgressSink) -> SolveResult {
    let lb = greedy_clique_lb(graph);
    let (mut ub, mut best_color) = dsatur_ub(graph);
    let ub_init = ub;
    let mut nodes = 0u64;
    let mut cuts = 0u64;
    let mut history = Vec::new();

    let timed_out = if lb == ub {
        // Solved by the initial clique/DSATUR bounds alone: spec §8's
        // boundary table counts this as node 1, not 0.
        nodes = 1;
        false
    } else {
        let mut state = SearchState::new(graph);
        recurse(
            &mut state, graph, &mut ub, &mut best_color, lb, &mut nodes, &mut cuts, deadline,
            sink, &mut history,
        )
    };

    let elapsed = deadline.elapsed_secs();
    let optimal = !timed_out;
    let final_lb = if optimal { ub } else { lb };
    let snap = Snapshot { nodes, ub, lb: final_lb, elapsed, cuts, done: true };
    sink.post(snap);
    history.push(snap);

    SolveResult {
        algo: "sewell",
        k: ub,
        coloring: best_color,
        lb: final_lb,
        ub_init,
        optimal,
        nodes,
        cuts,
        elapsed,
        timeout: timed_out,
        history,
    }
}

/// Returns `true` if the deadline expired mid-search (the caller must
/// unwind without trusting any partial improvement found after that
/// point — the incumbent up to the last completed node is still
/// valid).
#[allow(clippy::too_many_arguments)]
fn recurse(
    state: &mut SearchState,
    graph: &Graph,
    ub: &mut usize,
    best_color: &mut Vec<usize>,
    lb: usize,
    nodes: &mut u64,
    cuts: &mut u64,
    deadline: &Deadline,
    sink: &dyn ProgressSink,
    history: &mut Vec<Snapshot>,
) -> bool {
    if deadline.expired() {
        return true;
    }
    *nodes += 1;
    if *nodes % SNAPSHOT_INTERVAL == 0 {
        let snap = Snapshot {
            nodes: *nodes,
            ub: *ub,
            lb,
            elapsed: deadline.elapsed_secs(),
            cuts: *cuts,
            done: false,
        };
        sink.post(snap);
        history.push(snap);
    }

    if state.is_complete() {
        let k = state.used_colors();
        if k < *ub {
            *ub = k;
            *best_color = state.extract_coloring();
            let snap = Snapshot {
                nodes: *nodes,
                ub: *ub,
                lb,
                elapsed: deadline.elapsed_secs(),
                cuts: *cuts,
                done: false,
            };
            sink.post(snap);
            history.push(snap);
        }
        return false;
    }

    let candidates = dsatur_candidates(state);
    let v = if candidates.len() == 1 {
        candidates[0]
    } else {
        branching_vertex(state, graph, &candidates)
    };

    let (colors, skipped) = candidate_colors(state, v, *ub);
    *cuts += skipped;
    for c in colors {
        let undo = state.color_vertex(v, c);
        let timed_out = recurse(state, graph, ub, best_color, lb, nodes, cuts, deadline, sink, history);
        state.uncolor_vertex(undo);
        if timed_out {
            return true;
        }
    }
    false
}

/// Among a DSATUR tie class, picks the vertex that shares the most
/// available colors with its uncolored neighbors (summed), breaking
/// further ties by lowest id (spec §4.5 step 2, third criterion).
fn branching_vertex(state: &SearchState, graph: &Graph, candidates: &[VertexId]) -> VertexId {
    let mut best_v = candidates[0];
    let mut best_score: i64 = -1;
    for &v in candidates {
        let mut score = 0usize;
        for u in graph.neighbors_bits(v).iter() {
            if state.uncolored.contains(u) {
                score += state.available[v].intersection(&state.available[u]).count_ones();
            }
        }
        if score as i64 > best_score {
            best_score = score as i64;
            best_v = v;
        }
    }
    best_v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::progress::NullSink;

    fn cycle(n: usize) -> Graph {
        let adj: Vec<Vec<usize>> = (0..n).map(|v| vec![(v + n - 1) % n, (v + 1) % n]).collect();
        Graph::from_adjacency_lists(adj).unwrap()
    }

    fn complete(n: usize) -> Graph {
        let adj = (0..n).map(|v| (0..n).filter(|&u| u != v).collect()).collect();
        Graph::from_adjacency_lists(adj).unwrap()
    }

    fn assert_proper(g: &Graph, coloring: &[usize]) {
        for u in 0..g.n() {
            for v in g.neighbors_bits(u).iter() {
                assert_ne!(coloring[u], coloring[v], "vertices {u} and {v} share a color");
            }
        }
    }

    #[test]
    fn solves_odd_cycle_optimally() {
        let g = cycle(5);
        let result = sewell_solve(&g, &Deadline::from_secs(5.0), &NullSink);
        assert!(result.optimal);
        assert_eq!(result.k, 3);
        assert_proper(&g, &result.coloring);
    }

    #[test]
    fn solves_complete_graph_optimally() {
        let g = complete(6);
        let result = sewell_solve(&g, &Deadline::from_secs(5.0), &NullSink);
        assert!(result.optimal);
        assert_eq!(result.k, 6);
        assert_eq!(result.nodes, 1); // LB == UB from the initial bounds alone
    }

    #[test]
    fn expired_deadline_still_returns_a_proper_incumbent() {
        let g = cycle(9);
        let result = sewell_solve(&g, &Deadline::expired_now(), &NullSink);
        assert!(!result.optimal);
        assert!(result.timeout);
        assert_proper(&g, &result.coloring);
    }
}
