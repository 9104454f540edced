//! Initial bounds: greedy clique (lower bound) and DSATUR (upper bound).

use std::cmp::Ordering;

use priority_queue::PriorityQueue;

use crate::bitset::Bitset;
use crate::graph::{Graph, VertexId};

/// Repeatedly picks the maximum-degree vertex within the current
/// candidate set, adds it to the clique, and intersects the candidate
/// set with its neighbors. Ties are broken by lowest vertex id (the
/// candidate set is scanned in ascending order, and `max_by_key` keeps
/// the first maximum it sees, i.e. the lowest id among equals).
///
/// Mirrors the teacher's `adhoc_greedy_clique`, but returns only the
/// size — the `lb` is all the B&B loop needs.
pub fn greedy_clique_lb(g: &Graph) -> usize {
    let n = g.n();
    let mut candidates = Bitset::full(n);
    let mut clique_size = 0;
    while let Some(v) = candidates
        .iter()
        .max_by_key(|&v| (g.degree(v), std::cmp::Reverse(v)))
    {
        clique_size += 1;
        candidates.intersect_with(g.neighbors_bits(v));
    }
    clique_size
}

/// A `(saturation, uncolored_degree)` key, compared so that a
/// `PriorityQueue` pop yields the vertex DSATUR would pick next:
/// maximum saturation, ties broken by maximum degree.
#[derive(PartialEq, Eq)]
struct DsaturKey {
    saturation: usize,
    degree: usize,
}

impl Ord for DsaturKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.saturation.cmp(&other.saturation).then_with(|| self.degree.cmp(&other.degree))
    }
}

impl PartialOrd for DsaturKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Assigns every vertex the smallest color index not used by its
/// already-colored neighbors, picking the next vertex by maximum
/// saturation degree (ties: maximum degree, then lowest id — the
/// `PriorityQueue` breaks ties between equal keys by insertion order,
/// which is ascending id since vertices are pushed `0..n`).
///
/// Returns `(k, coloring)` with `k = 1 + max(coloring)` and
/// `coloring[v]` the 0-indexed color of `v`.
///
/// Mirrors the teacher's `search::greedy_dsatur::greedy_dsatur`.
pub fn dsatur_ub(g: &Graph) -> (usize, Vec<usize>) {
    let n = g.n();
    let mut queue: PriorityQueue<VertexId, DsaturKey> = PriorityQueue::new();
    for v in 0..n {
        queue.push(v, DsaturKey { saturation: 0, degree: g.degree(v) });
    }
    let mut color: Vec<Option<usize>> = vec![None; n];
    let mut neighbor_colors: Vec<Bitset> = vec![Bitset::new(n); n];
    let mut max_color = 0usize;

    while let Some((v, _)) = queue.pop() {
        let mut c = 0usize;
        while neighbor_colors[v].contains(c) {
            c += 1;
        }
        color[v] = Some(c);
        max_color = max_color.max(c);
        for u in g.neighbors_bits(v).iter() {
            if color[u].is_none() && !neighbor_colors[u].contains(c) {
                neighbor_colors[u].insert(c);
                let new_sat = neighbor_colors[u].count_ones();
                queue.change_priority(&u, DsaturKey { saturation: new_sat, degree: g.degree(u) });
            }
        }
    }
    let k = max_color + 1;
    let coloring: Vec<usize> = color
        .into_iter()
        .map(|c| c.expect("dsatur_ub: every vertex must receive a color"))
        .collect();
    (k, coloring)
}
