//! nexus-core: evaluador de workflows por umbral.
//!
//! Condiciones, índice de adyacencia, generador de lecturas sintéticas,
//! motor de ticks y despacho de notificaciones.
pub mod alert;
pub mod condition;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod hashing;
pub mod sensor;

pub use alert::{AlertEntry, AlertFeed, AlertLog, AlertLogRecord, AlertStatus, InMemoryAlertLog};
pub use condition::{evaluate, evaluate_raw, try_evaluate, Operator};
pub use dispatch::{dispatch, AlertContext, Channel, ChannelResult, DeliveryReceipt, DispatchOutcome, MockNotificationClient,
                   NotificationClient};
pub use engine::{EngineBuilder, EngineSettings, SimulationEngine, SimulationState, TickReport, TriggerMode, TriggerRecord};
pub use errors::{DispatchError, EvaluationError, GraphError, SimulationError};
pub use graph::{build_adjacency, connected_nodes, ActionConfig, AdjacencyIndex, Edge, EquipmentConfig, Node, NodeConfig,
                WorkflowDocument, WorkflowGraph, WorkflowSnapshot};
pub use sensor::{SensorDisplay, SensorFrame, SensorReading, SensorStatus};

pub use nexus_domain::{ActionKind, Severity};
