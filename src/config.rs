//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use std::env;

use nexus_core::constants::{DEFAULT_ALERT_FEED_CAP, DEFAULT_ALERT_LOG_CAP};
use nexus_core::{EngineSettings, TriggerMode};
use once_cell::sync::Lazy;

use crate::errors::CoreError;

/// Intervalos de tick admitidos (segundos).
pub const ALLOWED_TICK_INTERVALS: [u64; 3] = [1, 2, 5];
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 2;

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
}

/// Parámetros del bucle de simulación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Segundos entre ticks (1, 2 o 5).
    pub tick_interval_secs: u64,
    pub alert_feed_cap: usize,
    pub alert_log_cap: usize,
    pub trigger_mode: TriggerMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig { tick_interval_secs: DEFAULT_TICK_INTERVAL_SECS,
                           alert_feed_cap: DEFAULT_ALERT_FEED_CAP,
                           alert_log_cap: DEFAULT_ALERT_LOG_CAP,
                           trigger_mode: TriggerMode::Level }
    }
}

impl SimulationConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings { alert_feed_cap: self.alert_feed_cap,
                         trigger_mode: self.trigger_mode,
                         ..EngineSettings::default() }
    }
}

/// Valida que el intervalo sea uno de los admitidos.
pub fn check_tick_interval(secs: u64) -> Result<u64, CoreError> {
    if ALLOWED_TICK_INTERVALS.contains(&secs) {
        Ok(secs)
    } else {
        Err(CoreError::Config(format!("tick interval must be one of {ALLOWED_TICK_INTERVALS:?}, got {secs}")))
    }
}

impl AppConfig {
    /// Lee el entorno del proceso (tras cargar `.env`).
    pub fn from_env() -> Result<Self, CoreError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str, default: u64| -> Result<u64, CoreError> {
            match get(key) {
                None => Ok(default),
                Some(v) => v.parse().map_err(|_| CoreError::Config(format!("{key} must be a positive integer, got {v:?}"))),
            }
        };

        let tick_interval_secs = check_tick_interval(number("NEXUS_TICK_INTERVAL_SECS", DEFAULT_TICK_INTERVAL_SECS)?)?;
        let alert_feed_cap = number("NEXUS_ALERT_FEED_CAP", DEFAULT_ALERT_FEED_CAP as u64)? as usize;
        let alert_log_cap = number("NEXUS_ALERT_LOG_CAP", DEFAULT_ALERT_LOG_CAP as u64)? as usize;
        if alert_feed_cap == 0 || alert_log_cap == 0 {
            return Err(CoreError::Config("alert caps must be greater than zero".into()));
        }
        let trigger_mode = match get("NEXUS_TRIGGER_MODE") {
            None => TriggerMode::Level,
            Some(v) => v.parse().map_err(CoreError::Config)?,
        };
        Ok(AppConfig { simulation: SimulationConfig { tick_interval_secs,
                                                      alert_feed_cap,
                                                      alert_log_cap,
                                                      trigger_mode } })
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
/// Si el entorno es inválido se registra el error y se usan los valores por
/// defecto.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             log::warn!("invalid configuration, using defaults: {e}");
                             AppConfig { simulation: SimulationConfig::default() }
                         })
});
