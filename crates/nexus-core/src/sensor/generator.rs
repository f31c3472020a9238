//! Generador de lecturas sintéticas por tick.
//!
//! Para cada nodo de equipo configurado produce un valor que oscila alrededor
//! del 80% del umbral. Cada `SPIKE_PERIOD` ticks fuerza un pico por encima
//! del umbral para que las demos siempre muestren alertas.
use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{SPIKE_PERIOD, WARNING_RATIO};
use crate::graph::Node;

/// Lectura efímera `<equipmentId>.<sensorType> = value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Normal,
    Warning,
    Alert,
}

/// Valor pre-calculado para mostrar en el panel de sensores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDisplay {
    /// Tipo de sensor (`temp`, `rpm`, ...).
    pub key: String,
    pub value: f64,
    pub threshold: f64,
    pub equipment: String,
    pub is_alert: bool,
    pub progress_pct: u8,
    pub status: SensorStatus,
}

/// Resultado de un tick del generador.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorFrame {
    pub values: IndexMap<String, f64>,
    pub display: Vec<SensorDisplay>,
}

impl SensorFrame {
    pub fn readings(&self) -> Vec<SensorReading> {
        self.values
            .iter()
            .map(|(key, value)| SensorReading { key: key.clone(), value: *value })
            .collect()
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// Redondeo a 2 decimales; valores cuyo escalado desborda se devuelven tal cual.
pub(crate) fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Escala de ruido/oscilación; un umbral 0 usaría escala nula.
fn scale_of(threshold: f64) -> f64 {
    if threshold == 0.0 { 1.0 } else { threshold.abs() }
}

/// `true` si el tick inyecta un pico.
pub fn is_spike_tick(tick: u64) -> bool {
    tick % SPIKE_PERIOD == 0
}

/// Valor sintético para un umbral en un tick dado.
///
/// Con `threshold > 0` equivale a `t*0.8 + U(-0.1,0.1)*t + sin(tick*0.3)*0.15*t`
/// y, en ticks de pico, `t*(1.1 + U[0,0.2))`. El pico redondeado siempre
/// queda estrictamente por encima del umbral.
pub fn synthesize_value<R: Rng + ?Sized>(threshold: f64, tick: u64, rng: &mut R) -> f64 {
    let scale = scale_of(threshold);
    if is_spike_tick(tick) {
        let raw = threshold + scale * (0.1 + rng.gen::<f64>() * 0.2);
        let rounded = round2(raw);
        return if rounded > threshold { rounded } else { round2(round2(threshold) + 0.01) };
    }
    let noise = (rng.gen::<f64>() - 0.5) * scale * 0.2;
    let oscillation = (tick as f64 * 0.3).sin() * scale * 0.15;
    round2(threshold - scale * 0.2 + noise + oscillation)
}

/// Porcentaje del umbral alcanzado, recortado a `[0, 100]`; 0 si `t <= 0`.
pub fn progress_pct(value: f64, threshold: f64) -> u8 {
    if threshold <= 0.0 || !value.is_finite() {
        return 0;
    }
    (value / threshold * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Estado tri-valuado del panel: `alert` si supera el umbral, `warning` si el
/// progreso pasa del 80%.
pub fn display_status(value: f64, threshold: f64) -> SensorStatus {
    if value > threshold {
        SensorStatus::Alert
    } else if f64::from(progress_pct(value, threshold)) > WARNING_RATIO * 100.0 {
        SensorStatus::Warning
    } else {
        SensorStatus::Normal
    }
}

/// Genera las lecturas de todos los nodos de equipo configurados.
pub fn generate<R: Rng + ?Sized>(nodes: &[Node], tick: u64, rng: &mut R) -> SensorFrame {
    let mut frame = SensorFrame::default();
    for node in nodes {
        let Some(cfg) = node.equipment_config() else { continue };
        let value = synthesize_value(cfg.threshold, tick, rng);
        frame.values.insert(cfg.sensor_key(&node.id), value);
        let status = display_status(value, cfg.threshold);
        frame.display.push(SensorDisplay { key: cfg.sensor_type.clone(),
                                           value,
                                           threshold: cfg.threshold,
                                           equipment: node.display_name().to_string(),
                                           is_alert: status == SensorStatus::Alert,
                                           progress_pct: progress_pct(value, cfg.threshold),
                                           status });
    }
    log::debug!("tick {tick}: generated {} sensor values", frame.values.len());
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Operator;
    use crate::graph::{ActionConfig, EquipmentConfig};
    use nexus_domain::ActionKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spike_ticks_always_exceed_threshold() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for threshold in [0.0, 0.01, 0.014, 3.0, 50.0, 5000.0, -20.0] {
                for tick in [0, 8, 16, 800] {
                    let v = synthesize_value(threshold, tick, &mut rng);
                    assert!(v > threshold, "seed={seed} t={threshold} tick={tick} v={v}");
                }
            }
        }
    }

    #[test]
    fn normal_ticks_stay_within_expected_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for tick in 1..200u64 {
            if is_spike_tick(tick) {
                continue;
            }
            let v = synthesize_value(100.0, tick, &mut rng);
            // 80 ± 10 (ruido) ± 15 (oscilación), más redondeo
            assert!((54.99..=105.01).contains(&v), "tick={tick} v={v}");
        }
    }

    #[test]
    fn spikes_on_huge_thresholds_stay_finite() {
        let mut rng = StdRng::seed_from_u64(11);
        for t in [1e300, 1e307, -1e307] {
            let v = synthesize_value(t, 8, &mut rng);
            assert!(v.is_finite() && v > t, "t={t} v={v}");
        }
    }

    #[test]
    fn negative_threshold_centres_below_it() {
        // Con t < 0 el centro es t - 0.2|t| (= 1.2t), no t*0.8.
        let t = -100.0;
        let osc = (0.3f64).sin() * 15.0;
        let mut sum = 0.0;
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let v = synthesize_value(t, 1, &mut rng);
            assert!((-130.0 + osc - 0.01..=-110.0 + osc + 0.01).contains(&v), "seed={seed} v={v}");
            sum += v;
        }
        let mean = sum / 200.0;
        assert!((mean - (-120.0 + osc)).abs() < 2.0, "mean={mean}");
        assert!(mean < -100.0);
    }

    #[test]
    fn values_are_rounded_to_two_decimals() {
        let mut rng = StdRng::seed_from_u64(3);
        for tick in 1..40 {
            let v = synthesize_value(37.3, tick, &mut rng);
            assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn progress_and_status() {
        assert_eq!(progress_pct(45.0, 50.0), 90);
        assert_eq!(progress_pct(80.0, 50.0), 100);
        assert_eq!(progress_pct(-5.0, 50.0), 0);
        assert_eq!(progress_pct(5.0, 0.0), 0);
        assert_eq!(display_status(51.0, 50.0), SensorStatus::Alert);
        assert_eq!(display_status(45.0, 50.0), SensorStatus::Warning);
        assert_eq!(display_status(40.0, 50.0), SensorStatus::Normal);
    }

    #[test]
    fn only_configured_equipment_nodes_produce_values() {
        let nodes = vec![Node::equipment("node_1", "Analyzer_10", "analyzer", EquipmentConfig::new("temp", Operator::GreaterThan, 30.0)),
                         Node::new("node_2", "Robots-2", "robot", false),
                         Node::action("node_3", "Alert", ActionKind::Alert, ActionConfig::default())];
        let mut rng = StdRng::seed_from_u64(1);
        let frame = generate(&nodes, 8, &mut rng);
        assert_eq!(frame.values.len(), 1);
        let v = frame.value("node_1.temp").unwrap();
        assert!(v > 30.0);
        assert_eq!(frame.display[0].equipment, "Analyzer_10");
        assert!(frame.display[0].is_alert);
        assert_eq!(frame.readings()[0].key, "node_1.temp");
    }
}
