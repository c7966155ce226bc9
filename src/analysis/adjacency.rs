//! Spatial contact graph between strands.

use std::collections::BTreeSet;

use super::geometry::distance;
use crate::model::segment::Strand;
use crate::model::structure::Structure;

/// Undirected strand contact graph.
///
/// Neighbor sets are ordered, so iteration is always by ascending strand
/// index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: Vec<BTreeSet<usize>>,
}

impl AdjacencyGraph {
    /// Creates a graph with `n` nodes and no edges.
    pub fn with_nodes(n: usize) -> Self {
        Self {
            neighbors: vec![BTreeSet::new(); n],
        }
    }

    /// Builds the contact graph over `strands`.
    ///
    /// An edge joins `i` and `j` when the minimum Cα distance between the two
    /// strands is strictly below `contact_distance`.
    pub fn build<'a, I>(structure: &Structure, strands: I, contact_distance: f64) -> Self
    where
        I: IntoIterator<Item = &'a Strand>,
    {
        let strands: Vec<&Strand> = strands.into_iter().collect();
        let mut graph = Self::with_nodes(strands.len());

        for i in 0..strands.len() {
            for j in (i + 1)..strands.len() {
                if min_distance(structure, strands[i], strands[j]) < contact_distance {
                    graph.add_edge(i, j);
                }
            }
        }

        tracing::debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            contact_distance,
            "strand adjacency graph built"
        );

        graph
    }

    /// Adds the symmetric edge `i`–`j`. Self-loops are ignored.
    ///
    /// # Panics
    ///
    /// Panics if either index is not a node of the graph.
    pub fn add_edge(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.neighbors[i].insert(j);
        self.neighbors[j].insert(i);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbors of `i` in ascending index order; empty for unknown nodes.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.get(i).into_iter().flatten().copied()
    }

    pub fn degree(&self, i: usize) -> usize {
        self.neighbors.get(i).map_or(0, BTreeSet::len)
    }

    pub fn contains_edge(&self, i: usize, j: usize) -> bool {
        self.neighbors.get(i).is_some_and(|n| n.contains(&j))
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(BTreeSet::len).sum::<usize>() / 2
    }
}

/// Minimum Cα–Cα distance between two strands.
pub fn min_distance(structure: &Structure, a: &Strand, b: &Strand) -> f64 {
    let mut best = f64::INFINITY;
    for p in a.positions(structure) {
        for q in b.positions(structure) {
            best = best.min(distance(p, q));
        }
    }
    best
}
