use crate::heap::EmptyHeap;

/// Failures surfaced by graph construction, shortest-path computation and
/// path reconstruction. Vertices are rendered with their `Debug` form.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("negative edge weight {weight} on edge {from} -> {to}")]
    NegativeWeight { from: String, to: String, weight: f64 },

    #[error("edge weight {weight} on edge {from} -> {to} is not a finite number")]
    NonFiniteWeight { from: String, to: String, weight: f64 },

    #[error("vertex {vertex} not found in graph")]
    VertexNotFound { vertex: String },

    #[error(transparent)]
    EmptyHeap(#[from] EmptyHeap),

    #[error("distance to vertex {vertex} exceeds the representable range")]
    DistanceOverflow { vertex: String },

    #[error("vertex {vertex} is unreachable from the source")]
    UnreachableVertex { vertex: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn render<V: std::fmt::Debug>(vertex: &V) -> String {
    format!("{vertex:?}")
}
