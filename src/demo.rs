//! Workflow de ejemplo y helpers para construir el motor desde la
//! configuración.
use std::fs;
use std::path::Path;

use nexus_core::{ActionConfig, EquipmentConfig, InMemoryAlertLog, NodeConfig, NotificationClient, Operator, Severity,
                 SimulationEngine, WorkflowDocument, WorkflowGraph};

use crate::config::SimulationConfig;
use crate::errors::CoreError;

/// Centrífuga (rpm > 4500) conectada a una alerta de sistema y a un correo;
/// analizador (temp entre 20 y 25) conectado a un webhook.
pub fn sample_workflow() -> Result<WorkflowGraph, CoreError> {
    let mut g = WorkflowGraph::new();
    let centrifuge = g.add_node("centrifuge", false);
    let analyzer = g.add_node("analyzer", false);
    let system = g.add_node("alert", true);
    let email = g.add_node("email", true);
    let webhook = g.add_node("webhook", true);

    g.rename_node(&centrifuge, "Centrifuge_3")?;
    g.configure_node(&centrifuge,
                     NodeConfig::Equipment(EquipmentConfig::new("rpm", Operator::GreaterThan, 4500.0).with_severity(Severity::Critical)
                                                                                                     .with_specific_equipment("Centrifuge_3")))?;
    g.rename_node(&analyzer, "Analyzer_10")?;
    g.configure_node(&analyzer,
                     NodeConfig::Equipment(EquipmentConfig::new("temp", Operator::Between, 20.0).with_threshold_max(25.0)))?;
    g.configure_node(&system, NodeConfig::Action(ActionConfig { severity: Severity::Critical, ..ActionConfig::default() }))?;
    g.configure_node(&email,
                     NodeConfig::Action(ActionConfig { email: Some("floor-ops@example.com".into()),
                                                       unit: Some("RPM".into()),
                                                       ..ActionConfig::default() }))?;
    g.configure_node(&webhook,
                     NodeConfig::Action(ActionConfig { webhook_url: Some("https://hooks.example.com/nexus".into()),
                                                       ..ActionConfig::default() }))?;

    g.connect(&centrifuge, &system)?;
    g.connect(&centrifuge, &email)?;
    g.connect(&analyzer, &webhook)?;
    Ok(g)
}

/// Lee un documento de workflow JSON del disco.
pub fn load_workflow(path: impl AsRef<Path>) -> Result<WorkflowDocument, CoreError> {
    let raw = fs::read_to_string(path)?;
    Ok(WorkflowDocument::from_json(&raw)?)
}

/// Motor con log en memoria acotado según la configuración.
pub fn build_engine<C: NotificationClient>(client: C, config: &SimulationConfig, seed: Option<u64>) -> SimulationEngine<C, InMemoryAlertLog> {
    let mut settings = config.engine_settings();
    settings.rng_seed = seed;
    SimulationEngine::with_settings(client, InMemoryAlertLog::with_cap(config.alert_log_cap), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::MockNotificationClient;

    #[test]
    fn test_sample_workflow_is_startable() {
        let graph = sample_workflow().unwrap();
        assert_eq!(graph.nodes().len(), 5);
        assert_eq!(graph.edges().len(), 3);
        let mut engine = build_engine(MockNotificationClient::new(), &SimulationConfig::default(), Some(1));
        engine.start(graph.snapshot()).unwrap();
        assert!(engine.is_running());
    }

    #[test]
    fn test_load_workflow_reports_io_errors() {
        let err = load_workflow("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
