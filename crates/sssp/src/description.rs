use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::graph::WeightedGraph;

/// Structured graph input, independent of any file format.
///
/// ```json
/// { "undirected": true, "vertices": ["A", "B"], "edges": [["A", "B", 1.5]] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub undirected: bool,
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<(String, String, f64)>,
}

impl GraphDescription {
    /// Listed vertices are added first, in order, then every edge.
    pub fn build(&self) -> Result<WeightedGraph<String>> {
        let mut graph = if self.undirected {
            WeightedGraph::new_undirected()
        } else {
            WeightedGraph::new_directed()
        };
        for v in &self.vertices {
            graph.add_vertex(v.clone());
        }
        for (from, to, weight) in &self.edges {
            graph.add_edge(from.clone(), to.clone(), *weight)?;
        }
        Ok(graph)
    }
}
