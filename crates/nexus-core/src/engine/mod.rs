//! Motor de simulación por ticks.
//!
//! `SimulationEngine` valida el grafo en `start`, genera lecturas en cada
//! `tick`, evalúa las condiciones y despacha a las acciones conectadas.

pub mod builder;
pub mod core;
pub mod state;

pub use builder::EngineBuilder;
pub use self::core::SimulationEngine;
pub use state::{EngineSettings, SimulationState, TickReport, TriggerMode, TriggerRecord};
