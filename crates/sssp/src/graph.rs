use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Error;
use crate::error::Result;
use crate::error::render;

/// Dense index assigned to a vertex in insertion order.
pub type VertexId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: VertexId,
    pub weight: f64,
}

/// Adjacency-list graph keyed by arbitrary hashable vertex labels.
///
/// Weights are finite and non-negative; parallel edges are kept as separate
/// adjacency entries. For undirected graphs every insertion lands on both
/// endpoints' lists with the same weight.
#[derive(Clone, Debug)]
pub struct WeightedGraph<V> {
    undirected: bool,
    vertices: Vec<V>,
    index: HashMap<V, VertexId>,
    adjacency: Vec<Vec<Edge>>,
}

impl<V> WeightedGraph<V> {
    #[inline]
    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of adjacency entries; an undirected edge counts twice.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Vertex labels in insertion order.
    pub fn vertices(&self) -> std::slice::Iter<'_, V> {
        self.vertices.iter()
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &V {
        &self.vertices[id]
    }

    #[inline]
    pub fn out_edges(&self, id: VertexId) -> &[Edge] {
        &self.adjacency[id]
    }
}

impl<V: Clone + Eq + Hash + Debug> WeightedGraph<V> {
    pub fn new_directed() -> Self {
        Self::with_direction(false)
    }

    pub fn new_undirected() -> Self {
        Self::with_direction(true)
    }

    fn with_direction(undirected: bool) -> Self {
        Self {
            undirected,
            vertices: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    pub fn from_edges(undirected: bool, edges: &[(V, V, f64)]) -> Result<Self> {
        let mut graph = Self::with_direction(undirected);
        for (from, to, weight) in edges {
            graph.add_edge(from.clone(), to.clone(), *weight)?;
        }
        Ok(graph)
    }

    #[inline]
    pub fn id_of(&self, vertex: &V) -> Option<VertexId> {
        self.index.get(vertex).copied()
    }

    pub(crate) fn require(&self, vertex: &V) -> Result<VertexId> {
        self.id_of(vertex).ok_or_else(|| Error::VertexNotFound {
            vertex: render(vertex),
        })
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Adds `vertex` if absent and returns its id either way.
    pub fn add_vertex(&mut self, vertex: V) -> VertexId {
        if let Some(id) = self.id_of(&vertex) {
            return id;
        }
        let id = self.vertices.len();
        self.index.insert(vertex.clone(), id);
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        id
    }

    /// Inserts `from -> to` (and `to -> from` when undirected), adding
    /// missing endpoints. The graph is left untouched on error.
    pub fn add_edge(&mut self, from: V, to: V, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(Error::NonFiniteWeight {
                from: render(&from),
                to: render(&to),
                weight,
            });
        }
        if weight < 0.0 {
            return Err(Error::NegativeWeight {
                from: render(&from),
                to: render(&to),
                weight,
            });
        }

        let u = self.add_vertex(from);
        let v = self.add_vertex(to);
        self.adjacency[u].push(Edge { to: v, weight });
        if self.undirected {
            self.adjacency[v].push(Edge { to: u, weight });
        }
        Ok(())
    }

    pub fn neighbors_of(&self, vertex: &V) -> Result<Neighbors<'_, V>> {
        let id = self.require(vertex)?;
        Ok(Neighbors {
            vertices: &self.vertices,
            edges: self.adjacency[id].iter(),
        })
    }

    pub fn out_degree(&self, vertex: &V) -> Result<usize> {
        Ok(self.adjacency[self.require(vertex)?].len())
    }
}

/// Adjacency list of one vertex, yielding `(neighbor, weight)` in insertion
/// order.
pub struct Neighbors<'a, V> {
    vertices: &'a [V],
    edges: std::slice::Iter<'a, Edge>,
}

impl<'a, V> Iterator for Neighbors<'a, V> {
    type Item = (&'a V, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.edges.next()?;
        Some((&self.vertices[edge.to], edge.weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

impl<V> ExactSizeIterator for Neighbors<'_, V> {}
