//! Lecturas sueltas con inyección de anomalías y datos de prueba que
//! disparan (o no) las condiciones configuradas.
use std::str::FromStr;

use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generator::{round2, SensorStatus};
use crate::condition::Operator;
use crate::constants::WARNING_RATIO;
use crate::graph::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anomaly {
    /// Picos aleatorios por encima del máximo.
    Spike,
    /// Deriva gradual hacia arriba.
    Drift,
    /// Oscilación rápida.
    Oscillation,
    /// Valor atascado en el punto medio.
    Flatline,
}

impl FromStr for Anomaly {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spike" => Ok(Anomaly::Spike),
            "drift" => Ok(Anomaly::Drift),
            "oscillation" => Ok(Anomaly::Oscillation),
            "flatline" => Ok(Anomaly::Flatline),
            other => Err(format!("unknown anomaly: {other}")),
        }
    }
}

/// Lectura dentro de un rango normal `(min, max)`, opcionalmente con anomalía.
pub fn generate_reading<R: Rng + ?Sized>(range: (f64, f64), anomaly: Option<Anomaly>, tick: u64, rng: &mut R) -> f64 {
    let (min, max) = range;
    let mid = (min + max) / 2.0;
    let span = max - min;
    let value = match anomaly {
        Some(Anomaly::Spike) => max + rng.gen::<f64>() * span * 0.5,
        Some(Anomaly::Drift) if span > 0.0 => mid + (tick as f64 * 0.1) % span,
        Some(Anomaly::Drift) | Some(Anomaly::Flatline) => mid,
        Some(Anomaly::Oscillation) => mid + (tick as f64).sin() * span * 0.8,
        None => mid + (rng.gen::<f64>() - 0.5) * span * 0.6,
    };
    round2(value)
}

/// Estado de un valor respecto a su umbral con ratio de warning configurable.
pub fn value_status(value: f64, threshold: f64, warning_ratio: Option<f64>) -> SensorStatus {
    let ratio = warning_ratio.unwrap_or(WARNING_RATIO);
    if value >= threshold {
        SensorStatus::Alert
    } else if value >= threshold * ratio {
        SensorStatus::Warning
    } else {
        SensorStatus::Normal
    }
}

/// Datos de "modo prueba": cada nodo de equipo recibe con ~50% de
/// probabilidad un valor que cumple su condición.
pub fn generate_mock_sensor_data<R: Rng + ?Sized>(nodes: &[Node], rng: &mut R) -> IndexMap<String, f64> {
    let mut data = IndexMap::new();
    for node in nodes {
        let Some(cfg) = node.equipment_config() else { continue };
        let t = cfg.threshold;
        let triggering = rng.gen::<f64>() > 0.5;
        let offset = rng.gen::<f64>() * 20.0 + 5.0;
        let value = match (triggering, cfg.operator) {
            (true, Operator::GreaterThan | Operator::GreaterOrEqual) => t + offset,
            (true, Operator::LessThan | Operator::LessOrEqual) => t - offset,
            (true, _) => t,
            (false, Operator::GreaterThan | Operator::GreaterOrEqual) => t - offset,
            (false, _) => t + offset,
        };
        data.insert(cfg.sensor_key(&node.id), round2(value));
    }
    data
}
