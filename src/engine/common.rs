//! Shared B&B state and incremental update/revert machinery used by
//! both the Sewell and Furini engines (spec §3 "Search state (per
//! engine)", §4.5/§4.6).

use crate::bitset::Bitset;
use crate::graph::{Graph, VertexId};

/// Mutable per-solve search state. Constructed once per call to
/// [`crate::engine::sewell::sewell_solve`] /
/// [`crate::engine::furini::furini_solve`], destroyed when it returns
/// — there is no state shared across solves (spec §3 "Lifecycle").
#[derive(Debug)]
pub struct SearchState<'g> {
    pub graph: &'g Graph,
    /// `color[v]`: current color of `v`, or `None` if uncolored.
    pub color: Vec<Option<usize>>,
    /// `color_class_mask[c]`: bitset of vertices currently assigned color `c`.
    pub color_class_mask: Vec<Bitset>,
    /// `available[v]`: colors not yet excluded by a colored neighbor of `v`.
    pub available: Vec<Bitset>,
    /// `sat_degree[v]`: number of distinct colors among colored neighbors of `v`.
    pub sat_degree: Vec<usize>,
    /// `uncolored_deg[v]`: degree of `v` in the subgraph induced by uncolored vertices.
    pub uncolored_deg: Vec<usize>,
    /// Bitset of vertices not yet colored.
    pub uncolored: Bitset,
}

/// Exact delta recorded by [`SearchState::color_vertex`], undone by
/// [`SearchState::uncolor_vertex`] — this is the "frame... delta
/// record enabling precise revert" of spec §9.
#[derive(Debug)]
pub struct Undo {
    v: VertexId,
    c: usize,
    pushed_new_class: bool,
    degree_changed: Vec<VertexId>,
    color_changed: Vec<VertexId>,
}

impl<'g> SearchState<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.n();
        Self {
            graph,
            color: vec![None; n],
            color_class_mask: Vec::new(),
            available: vec![Bitset::full(n); n],
            sat_degree: vec![0; n],
            uncolored_deg: (0..n).map(|v| graph.degree(v)).collect(),
            uncolored: Bitset::full(n),
        }
    }

    /// Number of colors currently in use (the highest opened class
    /// index + 1).
    pub fn used_colors(&self) -> usize {
        self.color_class_mask.len()
    }

    /// Assigns `v` the color `c` (opening class `c` if it does not
    /// exist yet) and incrementally updates the saturation/available
    /// bookkeeping of `v`'s still-uncolored neighbors.
    pub fn color_vertex(&mut self, v: VertexId, c: usize) -> Undo {
        debug_assert!(self.uncolored.contains(v), "vertex {v} is already colored");
        let pushed_new_class = c == self.color_class_mask.len();
        if pushed_new_class {
            self.color_class_mask.push(Bitset::new(self.graph.n()));
        }
        self.color_class_mask[c].insert(v);
        self.color[v] = Some(c);
        self.uncolored.remove(v);

        let mut degree_changed = Vec::new();
        let mut color_changed = Vec::new();
        for u in self.graph.neighbors_bits(v).iter() {
            if self.uncolored.contains(u) {
                self.uncolored_deg[u] -= 1;
                degree_changed.push(u);
                if self.available[u].contains(c) {
                    self.available[u].remove(c);
                    self.sat_degree[u] += 1;
                    color_changed.push(u);
                }
            }
        }
        Undo { v, c, pushed_new_class, degree_changed, color_changed }
    }

    /// Undoes exactly the mutations recorded by the matching
    /// [`SearchState::color_vertex`] call.
    pub fn uncolor_vertex(&mut self, undo: Undo) {
        let Undo { v, c, pushed_new_class, degree_changed, color_changed } = undo;
        for u in degree_changed {
            self.uncolored_deg[u] += 1;
        }
        for u in color_changed {
            self.available[u].insert(c);
            self.sat_degree[u] -= 1;
        }
        self.color_class_mask[c].remove(v);
        if pushed_new_class {
            self.color_class_mask.pop();
        }
        self.color[v] = None;
        self.uncolored.insert(v);
    }

    /// True once every vertex has been assigned a color.
    pub fn is_complete(&self) -> bool {
        self.uncolored.is_empty()
    }

    /// Builds the witness coloring once [`SearchState::is_complete`] holds.
    pub fn extract_coloring(&self) -> Vec<usize> {
        self.color
            .iter()
            .map(|c| c.expect("extract_coloring called on a partial assignment"))
            .collect()
    }
}

/// Among the currently uncolored vertices, the ones of maximum
/// saturation degree, then maximum uncolored-subgraph degree — the
/// DSATUR tie class both engines branch from. Returned in ascending
/// vertex-id order, so `candidates[0]` is the plain-DSATUR pick
/// (lowest id final tie-break).
pub fn dsatur_candidates(state: &SearchState) -> Vec<VertexId> {
    let mut best_key: Option<(usize, usize)> = None;
    let mut best = Vec::new();
    for v in state.uncolored.iter() {
        let key = (state.sat_degree[v], state.uncolored_deg[v]);
        match best_key {
            Some(bk) if key < bk => {}
            Some(bk) if key == bk => best.push(v),
            _ => {
                best_key = Some(key);
                best.clear();
                best.push(v);
            }
        }
    }
    best
}

/// Candidate colors for `v`, in ascending order, plus the number of
/// branches this call prunes (spec §4.5 step 4).
///
/// A color is a candidate iff it is both already open (`< used_colors`)
/// and still available to `v`, or it is the single next-fresh color
/// index — and in both cases only if using it could still yield a
/// coloring strictly smaller than `ub` (the feasibility cut: a
/// coloring of size `>= ub` can never improve the incumbent).
pub fn candidate_colors(state: &SearchState, v: VertexId, ub: usize) -> (Vec<usize>, u64) {
    let threshold = ub.saturating_sub(1); // total colors used must stay < threshold + 1 == ub... i.e. < ub
    let used = state.used_colors();
    let open_limit = threshold.min(used);
    let mut colors: Vec<usize> =
        state.available[v].iter().filter(|&c| c < open_limit).collect();
    let mut cuts = 0;
    if used < threshold {
        colors.push(used);
    } else {
        cuts += 1;
    }
    colors.sort_unstable();
    (colors, cuts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn color_then_uncolor_is_identity() {
        let g = Graph::from_adjacency_lists(vec![vec![1, 2], vec![0, 2], vec![0, 1]]).unwrap();
        let mut state = SearchState::new(&g);
        let before_available: Vec<Bitset> = state.available.clone();
        let before_sat = state.sat_degree.clone();
        let before_deg = state.uncolored_deg.clone();

        let undo0 = state.color_vertex(0, 0);
        assert_eq!(state.sat_degree[1], 1);
        assert_eq!(state.sat_degree[2], 1);
        assert!(!state.available[1].contains(0));

        state.uncolor_vertex(undo0);
        assert_eq!(state.available, before_available);
        assert_eq!(state.sat_degree, before_sat);
        assert_eq!(state.uncolored_deg, before_deg);
        assert!(state.uncolored.contains(0));
    }

    #[test]
    fn candidate_colors_respects_feasibility_cut() {
        let g = Graph::from_adjacency_lists(vec![vec![1], vec![0]]).unwrap();
        let state = SearchState::new(&g);
        // ub = 2: only color 0 may be opened (opening color 1 would reach 2 == ub).
        let (colors, cuts) = candidate_colors(&state, 0, 2);
        assert_eq!(colors, vec![0]);
        assert_eq!(cuts, 1);
    }

    #[test]
    fn dsatur_candidates_breaks_ties_by_uncolored_degree() {
        // star: vertex 0 has degree 3, leaves have degree 1.
        let g = Graph::from_adjacency_lists(vec![
            vec![1, 2, 3],
            vec![0],
            vec![0],
            vec![0],
        ])
        .unwrap();
        let state = SearchState::new(&g);
        let candidates = dsatur_candidates(&state);
        // all uncolored, sat 0 for everyone; tie-break is degree: {0} wins alone.
        assert_eq!(candidates, vec![0]);
    }
}
