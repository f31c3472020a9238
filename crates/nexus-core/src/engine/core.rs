//! Motor de simulación: arranque validado, ticks y disparo de acciones.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::builder::EngineBuilder;
use super::state::{EngineSettings, SimulationState, TickReport, TriggerMode, TriggerRecord};
use crate::alert::{AlertEntry, AlertFeed, AlertLog, AlertStatus};
use crate::condition::evaluate;
use crate::dispatch::{create_threshold_alert, dispatch, AlertContext, NotificationClient};
use crate::errors::SimulationError;
use crate::graph::{build_adjacency, connected_nodes, ActionConfig, AdjacencyIndex, Node, WorkflowSnapshot};
use crate::sensor::{self, SensorDisplay};

/// Motor de evaluación por ticks.
///
/// Es dueño de todo su estado; el cliente de notificaciones y el log de
/// alertas se inyectan al construirlo. `tick` toma `&mut self`, así que los
/// ticks de una misma instancia quedan serializados.
#[derive(Debug)]
pub struct SimulationEngine<C, L>
    where C: NotificationClient,
          L: AlertLog
{
    client: C,
    alert_log: L,
    settings: EngineSettings,
    state: SimulationState,
    snapshot: Option<Arc<WorkflowSnapshot>>,
    tick_count: u64,
    alert_feed: AlertFeed,
    current_sensor_values: Vec<SensorDisplay>,
    latest_alert_equipment: Option<String>,
    /// Nodos que estaban en alerta en el tick anterior (modo `Edge`).
    alerting: HashSet<String>,
    rng: StdRng,
}

impl<C, L> SimulationEngine<C, L>
    where C: NotificationClient,
          L: AlertLog
{
    #[inline]
    pub fn builder(client: C, alert_log: L) -> EngineBuilder<C, L> {
        EngineBuilder::new(client, alert_log)
    }

    pub fn new(client: C, alert_log: L) -> Self {
        Self::with_settings(client, alert_log, EngineSettings::default())
    }

    pub fn with_settings(client: C, alert_log: L, settings: EngineSettings) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { client,
               alert_log,
               alert_feed: AlertFeed::with_cap(settings.alert_feed_cap),
               settings,
               state: SimulationState::Idle,
               snapshot: None,
               tick_count: 0,
               current_sensor_values: Vec::new(),
               latest_alert_equipment: None,
               alerting: HashSet::new(),
               rng }
    }

    /// Valida el snapshot y pasa a `Running`.
    ///
    /// Requiere al menos un nodo de equipo configurado y que alguno de ellos
    /// tenga una arista saliente. Si falla, el motor sigue en `Idle`.
    pub fn start(&mut self, snapshot: WorkflowSnapshot) -> Result<(), SimulationError> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }
        let equipment: Vec<&Node> = snapshot.nodes().iter().filter(|n| n.equipment_config().is_some()).collect();
        if equipment.is_empty() {
            log::warn!("simulation not started: no configured equipment node");
            return Err(SimulationError::NoConfiguredEquipment);
        }
        let connected = equipment.iter().any(|n| snapshot.edges().iter().any(|e| e.source == n.id));
        if !connected {
            log::warn!("simulation not started: no equipment node connected to an action");
            return Err(SimulationError::NoConnectedAction);
        }

        log::info!("simulation started ({} nodes, {} edges, mode={}, definition={})",
                   snapshot.nodes().len(),
                   snapshot.edges().len(),
                   self.settings.trigger_mode,
                   snapshot.definition_hash());
        self.snapshot = Some(Arc::new(snapshot));
        self.tick_count = 0;
        self.alerting.clear();
        self.state = SimulationState::Running;
        Ok(())
    }

    /// Pasa a `Idle` sin condiciones. No cancela despachos en curso.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("simulation stopped after {} ticks", self.tick_count);
        }
        self.state = SimulationState::Idle;
        self.current_sensor_values.clear();
        self.latest_alert_equipment = None;
        self.alerting.clear();
    }

    /// Ejecuta un ciclo de evaluación. `None` si el motor está en `Idle`.
    ///
    /// Ningún error de evaluación o despacho corta el tick: quedan
    /// registrados como no-disparo o como alertas fallidas.
    pub async fn tick(&mut self) -> Option<TickReport> {
        if !self.is_running() {
            return None;
        }
        let snapshot = Arc::clone(self.snapshot.as_ref()?);
        self.tick_count += 1;
        let tick = self.tick_count;

        let frame = sensor::generate(snapshot.nodes(), tick, &mut self.rng);
        let mut report = TickReport { tick, readings: frame.readings(), ..TickReport::default() };
        self.current_sensor_values = frame.display.clone();
        log::info!("tick {tick}: {} sensors", frame.values.len());

        let adjacency = match build_adjacency(snapshot.edges()) {
            Ok(index) => index,
            Err(e) => {
                log::warn!("tick {tick}: adjacency rebuild failed: {e}");
                AdjacencyIndex::default()
            }
        };

        for node in snapshot.nodes() {
            let Some(cfg) = node.equipment_config() else { continue };
            let key = cfg.sensor_key(&node.id);
            let Some(value) = frame.value(&key) else { continue };

            if !evaluate(value, cfg.operator, cfg.threshold, cfg.threshold_max) {
                self.alerting.remove(&node.id);
                continue;
            }

            if let Some(specific) = cfg.specific_equipment_id.as_deref().filter(|s| !s.is_empty()) {
                self.latest_alert_equipment = Some(specific.to_string());
            }
            let newly_alerting = self.alerting.insert(node.id.clone());
            let fire = self.settings.trigger_mode == TriggerMode::Level || newly_alerting;
            report.triggers.push(TriggerRecord { node_id: node.id.clone(),
                                                 equipment: node.display_name().to_string(),
                                                 sensor_key: key.clone(),
                                                 value,
                                                 operator: cfg.operator,
                                                 threshold: cfg.threshold,
                                                 threshold_max: cfg.threshold_max,
                                                 dispatched: fire });
            if !fire {
                log::debug!("tick {tick}: {} still alerting, dispatch suppressed", node.id);
                continue;
            }

            for action in connected_nodes(&node.id, &adjacency, snapshot.nodes()) {
                if let Some(entry) = self.execute_action(node, action, &cfg.sensor_type, value, cfg.threshold).await {
                    report.alerts.push(entry);
                }
            }
        }

        if !report.triggers.is_empty() {
            log::info!("tick {tick}: {} triggers, {} alerts ({} failed)",
                       report.triggers.len(),
                       report.alerts.len(),
                       report.failed_alerts());
        }
        Some(report)
    }

    /// Despacha a un nodo de acción y registra el resultado en el feed y en
    /// el log. Una acción sin configurar se despacha con config vacía y queda
    /// registrada como fallida. `None` si el destino no es una acción.
    async fn execute_action(&mut self,
                            trigger: &Node,
                            action: &Node,
                            sensor_type: &str,
                            value: f64,
                            threshold: f64)
                            -> Option<AlertEntry> {
        let Some(kind) = action.action_kind() else {
            log::debug!("edge target {} is not an action node", action.id);
            return None;
        };
        let empty = ActionConfig::default();
        let config = action.action_config().unwrap_or(&empty);
        let at = Utc::now();
        let ctx = AlertContext { equipment: trigger.display_name().to_string(),
                                 sensor: sensor_type.to_string(),
                                 value,
                                 threshold,
                                 severity: config.severity };
        let outcome = dispatch(&self.client, kind, config, &ctx, at).await;

        let entry = AlertEntry { id: AlertEntry::new_id(),
                                 timestamp: at,
                                 equipment: ctx.equipment.clone(),
                                 sensor: ctx.sensor.clone(),
                                 value,
                                 threshold,
                                 action_type: kind,
                                 recipient: outcome.recipient.clone(),
                                 severity: ctx.severity,
                                 success: outcome.success };
        self.alert_feed.push(entry.clone());

        let text = create_threshold_alert(&ctx, config.unit(), at).text;
        let workflow_id = self.workflow_id();
        self.alert_log.log(&workflow_id,
                           kind.as_str(),
                           &outcome.recipient,
                           &text,
                           AlertStatus::from_success(outcome.success),
                           outcome.first_error());
        Some(entry)
    }

    fn workflow_id(&self) -> String {
        self.settings
            .workflow_id
            .clone()
            .or_else(|| self.snapshot.as_ref().map(|s| s.definition_hash().to_string()))
            .unwrap_or_default()
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Alertas de la más reciente a la más antigua.
    pub fn alert_feed(&self) -> &AlertFeed {
        &self.alert_feed
    }

    /// Vacía el feed y el puntero de equipo en alerta.
    pub fn clear_alert_feed(&mut self) {
        self.alert_feed.clear();
        self.latest_alert_equipment = None;
    }

    pub fn current_sensor_values(&self) -> &[SensorDisplay] {
        &self.current_sensor_values
    }

    pub fn latest_alert_equipment(&self) -> Option<&str> {
        self.latest_alert_equipment.as_deref()
    }

    pub fn snapshot(&self) -> Option<&WorkflowSnapshot> {
        self.snapshot.as_deref()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn alert_log(&self) -> &L {
        &self.alert_log
    }
}
