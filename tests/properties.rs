//! Property tests over random graphs (spec.md §8 "Universal
//! invariants"), n <= 16 so a generous deadline reliably proves
//! optimality and the determinism/optimality-agreement checks are not
//! vacuous.

use proptest::prelude::*;

use chromatic_bnb::graph::Graph;
use chromatic_bnb::progress::NullSink;
use chromatic_bnb::solver::{solve, Variant};

const BUDGET_SECS: f64 = 3.0;

fn build_graph(n: usize, present: &[bool]) -> Graph {
    let mut adj = vec![Vec::new(); n];
    let mut idx = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if present[idx] {
                adj[i].push(j);
                adj[j].push(i);
            }
            idx += 1;
        }
    }
    Graph::from_adjacency_lists(adj).unwrap()
}

prop_compose! {
    fn arb_graph()(n in 2usize..16)
        (n in Just(n), present in prop::collection::vec(any::<bool>(), n * (n.saturating_sub(1)) / 2))
        -> Graph
    {
        build_graph(n, &present)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Properness, color range, and the LB <= K <= UB_init sandwich
    /// hold for every returned result, regardless of timeout.
    #[test]
    fn returned_colorings_are_always_proper_and_in_range(g in arb_graph()) {
        for variant in [Variant::Sewell, Variant::Furini] {
            let result = solve(variant, &g, BUDGET_SECS, &NullSink).unwrap();
            prop_assert_eq!(result.coloring.len(), g.n());
            prop_assert!(result.lb <= result.k);
            prop_assert!(result.k <= result.ub_init);
            for u in 0..g.n() {
                prop_assert!(result.coloring[u] < result.k);
                for v in g.neighbors_bits(u).iter() {
                    prop_assert_ne!(result.coloring[u], result.coloring[v]);
                }
            }
        }
    }

    /// When both engines prove optimality, they must agree on K.
    #[test]
    fn sewell_and_furini_agree_when_both_finish(g in arb_graph()) {
        let sewell = solve(Variant::Sewell, &g, BUDGET_SECS, &NullSink).unwrap();
        let furini = solve(Variant::Furini, &g, BUDGET_SECS, &NullSink).unwrap();
        if sewell.optimal && furini.optimal {
            prop_assert_eq!(sewell.k, furini.k);
        }
    }

    /// Snapshot sequences are monotone within a single run: `nodes`
    /// and `cuts` non-decreasing, `UB` non-increasing, `elapsed`
    /// non-decreasing.
    #[test]
    fn snapshot_history_is_monotone(g in arb_graph()) {
        for variant in [Variant::Sewell, Variant::Furini] {
            let result = solve(variant, &g, BUDGET_SECS, &NullSink).unwrap();
            let mut prev = (0u64, 0u64, 0.0f64, usize::MAX);
            for snap in &result.history {
                let (nodes, cuts, elapsed, ub) = prev;
                prop_assert!(snap.nodes >= nodes);
                prop_assert!(snap.cuts >= cuts);
                prop_assert!(snap.elapsed >= elapsed);
                prop_assert!(snap.ub <= ub);
                prev = (snap.nodes, snap.cuts, snap.elapsed, snap.ub);
            }
            if let Some(last) = result.history.last() {
                prop_assert!(last.done);
            }
        }
    }

    /// Running the same engine twice on the same graph to completion
    /// (not timed out) yields a bit-identical coloring and identical
    /// terminal counters — every tie-break is deterministic.
    #[test]
    fn determinism_when_not_timed_out(g in arb_graph()) {
        for variant in [Variant::Sewell, Variant::Furini] {
            let first = solve(variant, &g, BUDGET_SECS, &NullSink).unwrap();
            let second = solve(variant, &g, BUDGET_SECS, &NullSink).unwrap();
            if !first.timeout && !second.timeout {
                prop_assert_eq!(first.k, second.k);
                prop_assert_eq!(first.coloring, second.coloring);
                prop_assert_eq!(first.nodes, second.nodes);
                prop_assert_eq!(first.cuts, second.cuts);
            }
        }
    }
}
