//! Constantes del evaluador.
//!
//! `ENGINE_VERSION` forma parte del input del hash de definición de un
//! workflow: cambiarla invalida los ids derivados aunque el grafo no cambie.

/// Versión lógica del evaluador.
pub const ENGINE_VERSION: &str = "NF1.0";

/// Tolerancia absoluta de los operadores `==` y `!=`.
pub const EQUALITY_TOLERANCE: f64 = 1e-4;

/// Cada `SPIKE_PERIOD` ticks el generador inyecta un pico sobre el umbral.
pub const SPIKE_PERIOD: u64 = 8;

/// Fracción del umbral a partir de la cual una lectura pasa a `warning`.
pub const WARNING_RATIO: f64 = 0.8;

/// Magnitud máxima aceptada para `threshold` / `threshold_max`.
pub const MAX_THRESHOLD_MAGNITUDE: f64 = 1e300;

pub const DEFAULT_ALERT_FEED_CAP: usize = 20;
pub const DEFAULT_ALERT_LOG_CAP: usize = 1000;
