//! Estado, ajustes y reporte de tick del motor de simulación.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alert::AlertEntry;
use crate::condition::Operator;
use crate::constants::DEFAULT_ALERT_FEED_CAP;
use crate::sensor::SensorReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationState {
    #[default]
    Idle,
    Running,
}

/// Cuándo se despachan las acciones de una condición que se cumple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Cada tick en el que la condición se cumple.
    #[default]
    Level,
    /// Sólo en la transición "sin alerta" -> "en alerta" de cada nodo.
    Edge,
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        TriggerMode::Level => "level",
                        TriggerMode::Edge => "edge",
                    })
    }
}

impl FromStr for TriggerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "level" => Ok(TriggerMode::Level),
            "edge" => Ok(TriggerMode::Edge),
            other => Err(format!("unknown trigger mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub alert_feed_cap: usize,
    pub trigger_mode: TriggerMode,
    /// Id con el que se registran las alertas; si falta se usa el hash de
    /// definición del snapshot.
    pub workflow_id: Option<String>,
    /// Semilla del generador; `None` usa entropía del sistema.
    pub rng_seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings { alert_feed_cap: DEFAULT_ALERT_FEED_CAP,
                         trigger_mode: TriggerMode::Level,
                         workflow_id: None,
                         rng_seed: None }
    }
}

/// Una condición cumplida en un tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub node_id: String,
    pub equipment: String,
    pub sensor_key: String,
    pub value: f64,
    pub operator: Operator,
    pub threshold: f64,
    pub threshold_max: Option<f64>,
    /// `false` cuando el modo `Edge` suprime el despacho.
    pub dispatched: bool,
}

/// Agregado explícito de lo ocurrido en un tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub readings: Vec<SensorReading>,
    pub triggers: Vec<TriggerRecord>,
    pub alerts: Vec<AlertEntry>,
}

impl TickReport {
    pub fn failed_alerts(&self) -> usize {
        self.alerts.iter().filter(|a| !a.success).count()
    }
}
