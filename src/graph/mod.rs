//! Graph model
//!
//! The directed graph handed to the engine (nodes with optional labels and
//! positions, edges as identifier pairs), the adjacency facts derived from it,
//! and a handful of preset graphs.

pub mod adjacency;
pub mod edge;
pub mod model;
pub mod node;
pub mod preset;
pub mod types;

// Re-export main types
pub use adjacency::{dangling_nodes, in_links, out_degree, Adjacency};
pub use edge::Edge;
pub use model::{Graph, GraphStructure};
pub use node::Node;
pub use preset::Preset;
pub use types::{NodeId, Position};
