mod description;
mod dijkstra;
mod error;
pub mod generator;
pub mod graph;
pub mod heap;

pub use description::GraphDescription;
pub use dijkstra::Distance;
pub use dijkstra::DistanceTable;
pub use dijkstra::PredecessorMap;
pub use dijkstra::ShortestPaths;
pub use dijkstra::dijkstra;
pub use dijkstra::reconstruct_path;
pub use error::Error;
pub use error::Result;
pub use graph::Edge;
pub use graph::VertexId;
pub use graph::WeightedGraph;
pub use heap::BinaryMinHeap;
pub use heap::HeapEntry;
