//! Grafo editable del workflow y snapshot inmutable para una ejecución.
//!
//! `WorkflowGraph` refleja las operaciones del builder (soltar nodo,
//! conectar, configurar, borrar). `WorkflowSnapshot` es la copia validada
//! que recibe `SimulationEngine::start`; cambios posteriores al grafo no
//! afectan a una simulación en curso.
use std::collections::HashSet;

use nexus_domain::category_definition;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::types::{Edge, Node, NodeConfig};
use crate::constants::ENGINE_VERSION;
use crate::errors::GraphError;
use crate::hashing::hash_value;

#[derive(Debug, Clone, Default)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_counter: u32,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restaura un grafo guardado. El contador continúa desde el mayor
    /// sufijo numérico `node_<n>`.
    pub fn load(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        validate_parts(&nodes, &edges)?;
        let node_counter = nodes.iter()
                                .filter_map(|n| n.id.strip_prefix("node_").and_then(|s| s.parse::<u32>().ok()))
                                .max()
                                .unwrap_or(0);
        Ok(Self { nodes, edges, node_counter })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Añade un nodo sin configurar y devuelve su id (`node_<n>`).
    pub fn add_node(&mut self, category: &str, is_action: bool) -> String {
        self.node_counter += 1;
        let id = format!("node_{}", self.node_counter);
        let label = match category_definition(category) {
            Some(def) => format!("{}-{}", def.name, self.node_counter),
            None => category.to_string(),
        };
        self.nodes.push(Node::new(id.clone(), label, category, is_action));
        id
    }

    /// Conecta dos nodos existentes. Extremos vacíos y pares repetidos se
    /// rechazan.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String, GraphError> {
        let edge = Edge::new(source, target)?;
        for id in [source, target] {
            if self.node(id).is_none() {
                return Err(GraphError::UnknownNode(id.to_string()));
            }
        }
        if self.edges.iter().any(|e| e.source == source && e.target == target) {
            return Err(GraphError::DuplicateEdge { from: source.to_string(),
                                                   to: target.to_string() });
        }
        let id = edge.id.clone();
        self.edges.push(edge);
        Ok(id)
    }

    /// Guarda la configuración de un nodo. `Unconfigured` lo devuelve al
    /// estado sin configurar.
    pub fn configure_node(&mut self, id: &str, config: NodeConfig) -> Result<(), GraphError> {
        let node = self.nodes
                       .iter_mut()
                       .find(|n| n.id == id)
                       .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        let mut candidate = node.clone();
        candidate.configured = !matches!(config, NodeConfig::Unconfigured);
        candidate.config = config;
        candidate.validate()?;
        *node = candidate;
        Ok(())
    }

    /// Cambia el label mostrado del nodo.
    pub fn rename_node(&mut self, id: &str, label: impl Into<String>) -> Result<(), GraphError> {
        let node = self.nodes
                       .iter_mut()
                       .find(|n| n.id == id)
                       .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        node.label = label.into();
        Ok(())
    }

    /// Elimina el nodo y todas las aristas que lo tocan.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        true
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        self.edges.len() != before
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_counter = 0;
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot::from_validated(self.nodes.clone(), self.edges.clone())
    }
}

fn validate_parts(nodes: &[Node], edges: &[Edge]) -> Result<(), GraphError> {
    let mut seen = HashSet::new();
    for node in nodes {
        node.validate()?;
        if !seen.insert(node.id.as_str()) {
            return Err(GraphError::DuplicateNode(node.id.clone()));
        }
    }
    let mut pairs = HashSet::new();
    for edge in edges {
        edge.validate()?;
        if !pairs.insert((edge.source.as_str(), edge.target.as_str())) {
            return Err(GraphError::DuplicateEdge { from: edge.source.clone(),
                                                   to: edge.target.clone() });
        }
    }
    Ok(())
}

/// Copia inmutable y validada de un workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSnapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    definition_hash: String,
}

impl WorkflowSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        validate_parts(&nodes, &edges)?;
        Ok(Self::from_validated(nodes, edges))
    }

    fn from_validated(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let definition_hash = hash_value(&json!({
            "engine_version": ENGINE_VERSION,
            "nodes": nodes,
            "edges": edges,
        }));
        Self { nodes, edges, definition_hash }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// SHA-256 del JSON canónico de nodos y aristas.
    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Documento de workflow tal como se guarda/carga en JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default = "default_workflow_name")]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn default_workflow_name() -> String {
    "New Workflow".to_string()
}

impl WorkflowDocument {
    pub fn from_json(raw: &str) -> Result<Self, GraphError> {
        serde_json::from_str(raw).map_err(|e| GraphError::Document(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::Document(e.to_string()))
    }

    pub fn from_graph(id: Option<String>, name: impl Into<String>, graph: &WorkflowGraph) -> Self {
        Self { id,
               name: name.into(),
               nodes: graph.nodes().to_vec(),
               edges: graph.edges().to_vec() }
    }

    pub fn to_graph(&self) -> Result<WorkflowGraph, GraphError> {
        WorkflowGraph::load(self.nodes.clone(), self.edges.clone())
    }

    pub fn snapshot(&self) -> Result<WorkflowSnapshot, GraphError> {
        WorkflowSnapshot::new(self.nodes.clone(), self.edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Operator;
    use crate::graph::types::{ActionConfig, EquipmentConfig};

    #[test]
    fn add_node_uses_category_name_and_counter() {
        let mut g = WorkflowGraph::new();
        let a = g.add_node("analyzer", false);
        let b = g.add_node("email", true);
        assert_eq!(a, "node_1");
        assert_eq!(g.node(&a).unwrap().label, "Analyzers-1");
        assert_eq!(g.node(&b).unwrap().label, "Email-2");
        assert!(!g.node(&b).unwrap().configured);
    }

    #[test]
    fn connect_rejects_duplicates_and_unknown_nodes() {
        let mut g = WorkflowGraph::new();
        let a = g.add_node("analyzer", false);
        let b = g.add_node("alert", true);
        assert_eq!(g.connect(&a, &b).unwrap(), "edge_node_1_node_2");
        let dup = g.connect(&a, &b).unwrap_err();
        assert_eq!(dup, GraphError::DuplicateEdge { from: a.clone(), to: b.clone() });
        assert_eq!(dup.to_string(), "edge node_1 -> node_2 already exists");
        assert!(matches!(g.connect(&a, "node_99"), Err(GraphError::UnknownNode(_))));
        assert!(matches!(g.connect("", &b), Err(GraphError::EmptyEndpoint { .. })));
        assert_eq!(g.edges().len(), 1);
    }

    #[test]
    fn configure_node_validates_kind() {
        let mut g = WorkflowGraph::new();
        let a = g.add_node("analyzer", false);
        let err = g.configure_node(&a, NodeConfig::Action(ActionConfig::default()));
        assert!(matches!(err, Err(GraphError::ConfigKindMismatch { .. })));
        assert!(!g.node(&a).unwrap().configured);

        let cfg = EquipmentConfig::new("temp", Operator::GreaterThan, 30.0);
        g.configure_node(&a, NodeConfig::Equipment(cfg)).unwrap();
        assert!(g.node(&a).unwrap().configured);
    }

    #[test]
    fn remove_node_drops_its_edges() {
        let mut g = WorkflowGraph::new();
        let a = g.add_node("analyzer", false);
        let b = g.add_node("alert", true);
        let c = g.add_node("email", true);
        g.connect(&a, &b).unwrap();
        g.connect(&a, &c).unwrap();
        assert!(g.remove_node(&b));
        assert_eq!(g.edges().len(), 1);
        assert_eq!(g.edges()[0].target, c);
        assert!(!g.remove_node(&b));
    }

    #[test]
    fn load_resumes_counter() {
        let nodes = vec![Node::new("node_7", "Robots-7", "robot", false), Node::new("node_3", "Email-3", "email", true)];
        let mut g = WorkflowGraph::load(nodes, vec![]).unwrap();
        assert_eq!(g.add_node("alert", true), "node_8");
        g.clear();
        assert_eq!(g.add_node("alert", true), "node_1");
    }

    #[test]
    fn snapshot_hash_tracks_graph_content() {
        let mut g = WorkflowGraph::new();
        let a = g.add_node("analyzer", false);
        let b = g.add_node("alert", true);
        let before = g.snapshot();
        assert_eq!(before.definition_hash(), g.snapshot().definition_hash());
        g.connect(&a, &b).unwrap();
        assert_ne!(before.definition_hash(), g.snapshot().definition_hash());
    }

    #[test]
    fn snapshot_rejects_empty_edge_endpoints() {
        let edges = vec![Edge { id: "e".into(), source: "node_1".into(), target: String::new() }];
        let nodes = vec![Node::new("node_1", "A", "analyzer", false)];
        assert!(matches!(WorkflowSnapshot::new(nodes, edges), Err(GraphError::EmptyEndpoint { .. })));
    }

    #[test]
    fn document_json_restores_graph() {
        let raw = r#"{
            "name": "Line 2",
            "nodes": [
                {"id": "node_1", "label": "Centrifuge_01", "category": "centrifuge", "is_action": false,
                 "configured": true,
                 "config": {"kind": "equipment", "sensor_type": "rpm", "operator": ">", "threshold": 5000}},
                {"id": "node_2", "label": "Ops mail", "category": "email", "is_action": true,
                 "configured": true, "config": {"kind": "action", "email": "ops@example.com"}}
            ],
            "edges": [{"id": "edge_node_1_node_2", "source": "node_1", "target": "node_2"}]
        }"#;
        let doc = WorkflowDocument::from_json(raw).unwrap();
        assert_eq!(doc.name, "Line 2");
        let graph = doc.to_graph().unwrap();
        assert_eq!(graph.nodes().len(), 2);
        let snap = doc.snapshot().unwrap();
        assert_eq!(snap.node("node_2").and_then(|n| n.action_config()).and_then(|c| c.email()),
                   Some("ops@example.com"));
    }
}
