//! Grafo del workflow: tipos de nodo/arista, índice de adyacencia y grafo
//! editable con su snapshot inmutable.

pub mod adjacency;
pub mod types;
pub mod workflow;

pub use adjacency::{build_adjacency, connected_nodes, AdjacencyIndex};
pub use types::{ActionConfig, Edge, EquipmentConfig, Node, NodeConfig};
pub use workflow::{WorkflowDocument, WorkflowGraph, WorkflowSnapshot};
