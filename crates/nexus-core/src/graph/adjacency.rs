//! Índice de adyacencia `source -> [targets]`.
//!
//! Se reconstruye desde cero en cada tick (O(E)); no hay mantenimiento
//! incremental. El orden de inserción se conserva, así que las acciones de un
//! nodo se disparan en el orden en que se conectaron.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::types::{Edge, Node};
use crate::errors::GraphError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdjacencyIndex {
    inner: IndexMap<String, Vec<String>>,
}

impl AdjacencyIndex {
    /// Destinos de `source`, vacío si no tiene aristas salientes.
    pub fn targets(&self, source: &str) -> &[String] {
        self.inner.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_outgoing(&self, source: &str) -> bool {
        !self.targets(source).is_empty()
    }

    /// Número de nodos fuente.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.inner.iter()
    }
}

/// Construye el índice; una arista con extremo vacío invalida la entrada.
pub fn build_adjacency(edges: &[Edge]) -> Result<AdjacencyIndex, GraphError> {
    let mut inner: IndexMap<String, Vec<String>> = IndexMap::with_capacity(edges.len());
    for edge in edges {
        edge.validate()?;
        inner.entry(edge.source.clone()).or_default().push(edge.target.clone());
    }
    Ok(AdjacencyIndex { inner })
}

/// Nodos conectados a `node_id`, en orden de arista. Los destinos que no
/// existen en `nodes` se omiten.
pub fn connected_nodes<'a>(node_id: &str, adjacency: &AdjacencyIndex, nodes: &'a [Node]) -> Vec<&'a Node> {
    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    adjacency.targets(node_id)
             .iter()
             .filter_map(|id| by_id.get(id.as_str()).copied())
             .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(s: &str, t: &str) -> Edge {
        Edge { id: format!("edge_{s}_{t}"), source: s.into(), target: t.into() }
    }

    #[test]
    fn groups_targets_by_source_in_order() {
        let idx = build_adjacency(&[edge("a", "b"), edge("a", "c")]).unwrap();
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.targets("a"), ["b".to_string(), "c".to_string()]);
        assert!(idx.targets("b").is_empty());
    }

    #[test]
    fn empty_endpoint_is_rejected_not_indexed() {
        let err = build_adjacency(&[edge("a", "b"), edge("", "c")]).unwrap_err();
        assert_eq!(err, GraphError::EmptyEndpoint { edge_id: "edge__c".into() });
    }

    #[test]
    fn connected_nodes_skips_dangling_targets() {
        let nodes = vec![Node::new("a", "A", "analyzer", false), Node::new("c", "C", "alert", true)];
        let idx = build_adjacency(&[edge("a", "ghost"), edge("a", "c")]).unwrap();
        let connected = connected_nodes("a", &idx, &nodes);
        assert_eq!(connected.len(), 1);
        assert_eq!(connected[0].id, "c");
    }
}
