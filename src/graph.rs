//! Undirected weighted graph with insertion-ordered, named nodes.
//!
//! Node `i` is the `i`-th distinct name seen. That index fixes the row order of every
//! matrix computed downstream.

use std::collections::HashMap;

use crate::{Error, Result};

/// Undirected graph with non-negative edge weights.
///
/// An edge `(u, v, w)` is stored in both `u`'s and `v`'s adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<String>,
    indices: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(source, target, weight)` triples.
    pub fn from_edges<I, S>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for (u, v, w) in edges {
            graph.add_edge(u.as_ref(), v.as_ref(), w)?;
        }
        Ok(graph)
    }

    /// Insert `name` if unseen; return its index either way.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(name.to_owned());
        self.indices.insert(name.to_owned(), idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add an undirected edge, creating missing endpoints.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                edge: format!("{source}-{target}"),
                weight,
            });
        }
        let u = self.add_node(source);
        let v = self.add_node(target);
        self.adjacency[u].push((v, weight));
        self.adjacency[v].push((u, weight));
        self.edge_count += 1;
        Ok(())
    }

    /// Node names in index order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Index of a node by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Per-node `(neighbor, weight)` lists.
    pub fn adjacency(&self) -> &[Vec<(usize, f64)>] {
        &self.adjacency
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges added.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
