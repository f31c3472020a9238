//! Errores del evaluador.
//!
//! Ninguno de estos errores detiene el loop de ticks: los de validación se
//! devuelven en `start()`, el resto se registra y se convierte en "no
//! disparo" o en un resultado fallido.

use thiserror::Error;

/// Fallos de validación al arrancar una simulación.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SimulationError {
    #[error("simulation already running")] AlreadyRunning,
    #[error("configure at least one equipment node first")] NoConfiguredEquipment,
    #[error("connect equipment to an action node first")] NoConnectedAction,
}

/// Fallos al evaluar una condición. Se tratan como "condición no cumplida".
#[derive(Debug, Error, PartialEq, Clone)]
pub enum EvaluationError {
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    #[error("non-finite operand (value={value}, threshold={threshold}, threshold_max={threshold_max:?})")]
    NonFinite { value: f64, threshold: f64, threshold_max: Option<f64> },
}

/// Errores de construcción/edición del grafo del workflow.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GraphError {
    #[error("edge {edge_id:?} has an empty endpoint")]
    EmptyEndpoint { edge_id: String },
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },
    #[error("unknown node: {0}")]
    UnknownNode(String),
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("config kind does not match node {node_id}")]
    ConfigKindMismatch { node_id: String },
    #[error("node {node_id}: {reason}")]
    InvalidConfig { node_id: String, reason: String },
    #[error("invalid workflow document: {0}")]
    Document(String),
}

/// Fallo de entrega en un canal de notificación.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DispatchError {
    #[error("{0} credentials missing")]
    MissingCredentials(String),
    #[error("no recipient configured for {0}")]
    MissingRecipient(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("api error {status}: {details}")]
    Api { status: u16, details: String },
    #[error("rejected: {0}")]
    Rejected(String),
}
