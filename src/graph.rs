//! Read-only graph view: CSR adjacency plus a bitset per vertex.

use crate::bitset::Bitset;
use crate::error::ColoringError;

/// Vertex identifier, `0..n`.
pub type VertexId = usize;

/// An undirected simple graph, immutable after construction.
///
/// Internally keeps both the CSR form it was built from and a
/// per-vertex [`Bitset`] (`adj[v]`), built once and never mutated —
/// the search engines only ever read `neighbors_bits`.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    m: usize,
    adj_flat: Vec<VertexId>,
    row_start: Vec<usize>,
    degree: Vec<usize>,
    adj: Vec<Bitset>,
}

impl Graph {
    /// Builds a graph from an adjacency list (one `Vec<VertexId>` per
    /// vertex, not required to be sorted or deduplicated by the
    /// caller — this is the constructor the DIMACS parser uses).
    pub fn from_adjacency_lists(
        adj_list: Vec<Vec<VertexId>>,
    ) -> Result<Self, ColoringError> {
        let n = adj_list.len();
        if n == 0 {
            return Err(ColoringError::InvalidInput(
                "graph must have at least one vertex (n = 0 is rejected)".into(),
            ));
        }
        let mut adj = vec![Bitset::new(n); n];
        for (u, neighbors) in adj_list.iter().enumerate() {
            for &v in neighbors {
                if v >= n {
                    return Err(ColoringError::InvalidInput(format!(
                        "edge ({u}, {v}) references vertex {v} >= n = {n}"
                    )));
                }
                if v == u {
                    return Err(ColoringError::InvalidInput(format!(
                        "self-loop at vertex {u}"
                    )));
                }
                adj[u].insert(v);
                adj[v].insert(u);
            }
        }
        Self::from_adjacency_bitsets(adj)
    }

    /// Builds a graph from a CSR descriptor, validating every
    /// integrity rule from spec §6.1: vertex ids in range, no
    /// self-loops, symmetric adjacency, `row_start` consistent with
    /// `deg`.
    pub fn from_csr(
        n: usize,
        adj_flat: &[VertexId],
        row_start: &[usize],
        deg: &[usize],
    ) -> Result<Self, ColoringError> {
        if n == 0 {
            return Err(ColoringError::InvalidInput(
                "graph must have at least one vertex (n = 0 is rejected)".into(),
            ));
        }
        if row_start.len() != n || deg.len() != n {
            return Err(ColoringError::InvalidInput(format!(
                "row_start/deg must have length n = {n} (got {} / {})",
                row_start.len(),
                deg.len()
            )));
        }
        let mut adj = vec![Bitset::new(n); n];
        for v in 0..n {
            let start = row_start[v];
            let end = start
                .checked_add(deg[v])
                .ok_or_else(|| ColoringError::InvalidInput("row offset overflow".into()))?;
            if end > adj_flat.len() {
                return Err(ColoringError::InvalidInput(format!(
                    "row for vertex {v} runs past the end of adj_flat"
                )));
            }
            if v + 1 < n && row_start[v + 1] < start {
                return Err(ColoringError::InvalidInput(
                    "row_start must be non-decreasing".into(),
                ));
            }
            for &u in &adj_flat[start..end] {
                if u >= n {
                    return Err(ColoringError::InvalidInput(format!(
                        "adj_flat entry {u} >= n = {n}"
                    )));
                }
                if u == v {
                    return Err(ColoringError::InvalidInput(format!(
                        "self-loop at vertex {v}"
                    )));
                }
                adj[v].insert(u);
            }
        }
        Self::from_adjacency_bitsets(adj)
    }

    /// Shared tail of both constructors: checks symmetry, derives
    /// `degree`/`m`/flat CSR fields from the populated bitsets.
    fn from_adjacency_bitsets(adj: Vec<Bitset>) -> Result<Self, ColoringError> {
        let n = adj.len();
        for u in 0..n {
            for v in adj[u].iter() {
                if !adj[v].contains(u) {
                    return Err(ColoringError::InvalidInput(format!(
                        "adjacency is not symmetric: {u} -> {v} but not {v} -> {u}"
                    )));
                }
            }
        }
        let degree: Vec<usize> = adj.iter().map(Bitset::count_ones).collect();
        let sum_degrees: usize = degree.iter().sum();
        if sum_degrees % 2 != 0 {
            return Err(ColoringError::Internal(
                "sum of degrees is odd; adjacency cannot be symmetric".into(),
            ));
        }
        let m = sum_degrees / 2;
        let mut row_start = Vec::with_capacity(n);
        let mut adj_flat = Vec::with_capacity(sum_degrees);
        for u in 0..n {
            row_start.push(adj_flat.len());
            adj_flat.extend(adj[u].iter());
        }
        Ok(Self { n, m, adj_flat, row_start, degree, adj })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of edges.
    pub fn m(&self) -> usize {
        self.m
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.degree[v]
    }

    /// Bitset of vertices adjacent to `v` (bit `v` itself is unset).
    pub fn neighbors_bits(&self, v: VertexId) -> &Bitset {
        &self.adj[v]
    }

    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.adj[u].contains(v)
    }

    /// Flat CSR adjacency, exposed for external interop (spec §6.1).
    pub fn adj_flat(&self) -> &[VertexId] {
        &self.adj_flat
    }

    pub fn row_start(&self) -> &[usize] {
        &self.row_start
    }

    pub fn degrees(&self) -> &[usize] {
        &self.degree
    }
}
