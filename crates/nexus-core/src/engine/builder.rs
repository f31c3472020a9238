//! Builder de `SimulationEngine`.
//!
//! ```ignore
//! let engine = SimulationEngine::builder(MockNotificationClient::new(), InMemoryAlertLog::default())
//!     .trigger_mode(TriggerMode::Edge)
//!     .seed(42)
//!     .build();
//! ```
use super::core::SimulationEngine;
use super::state::{EngineSettings, TriggerMode};
use crate::alert::AlertLog;
use crate::dispatch::NotificationClient;

#[derive(Debug)]
pub struct EngineBuilder<C: NotificationClient, L: AlertLog> {
    client: C,
    alert_log: L,
    settings: EngineSettings,
}

impl<C: NotificationClient, L: AlertLog> EngineBuilder<C, L> {
    pub(crate) fn new(client: C, alert_log: L) -> Self {
        EngineBuilder { client, alert_log, settings: EngineSettings::default() }
    }

    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn alert_feed_cap(mut self, cap: usize) -> Self {
        self.settings.alert_feed_cap = cap;
        self
    }

    pub fn trigger_mode(mut self, mode: TriggerMode) -> Self {
        self.settings.trigger_mode = mode;
        self
    }

    pub fn workflow_id(mut self, id: impl Into<String>) -> Self {
        self.settings.workflow_id = Some(id.into());
        self
    }

    /// Fija la semilla del generador de lecturas (reproducible en tests).
    pub fn seed(mut self, seed: u64) -> Self {
        self.settings.rng_seed = Some(seed);
        self
    }

    #[inline]
    pub fn build(self) -> SimulationEngine<C, L> {
        SimulationEngine::with_settings(self.client, self.alert_log, self.settings)
    }
}
