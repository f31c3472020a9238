use nexus_core::{AlertLog, AlertStatus, Channel, InMemoryAlertLog, MockNotificationClient, SimulationEngine, SimulationError,
                 TriggerMode, WorkflowDocument};

const LINE_MONITOR: &str = include_str!("fixtures/line_monitor.json");

fn engine(client: MockNotificationClient) -> SimulationEngine<MockNotificationClient, InMemoryAlertLog> {
    SimulationEngine::builder(client, InMemoryAlertLog::default()).seed(2024).build()
}

#[tokio::test]
async fn test_spike_tick_produces_one_alert_per_connected_action() {
    let doc = WorkflowDocument::from_json(LINE_MONITOR).expect("fixture parses");
    let mut engine = engine(MockNotificationClient::new().failing_on(Channel::Whatsapp));
    engine.start(doc.snapshot().unwrap()).expect("graph is valid");

    let mut spike = None;
    for _ in 0..8 {
        spike = engine.tick().await;
    }
    let report = spike.expect("engine is running");
    assert_eq!(report.tick, 8);

    // node_6 sin configurar no genera lecturas
    assert_eq!(report.readings.len(), 2);

    let centrifuge: Vec<_> = report.alerts.iter().filter(|a| a.equipment == "Centrifuge_3").collect();
    assert_eq!(centrifuge.len(), 3, "one entry per connected action");
    let kinds: Vec<&str> = centrifuge.iter().map(|a| a.action_type.as_str()).collect();
    assert_eq!(kinds, ["alert", "email", "webhook"]);
    // email ok + whatsapp fallido => éxito; webhook sin url => fallo
    assert_eq!(centrifuge.iter().map(|a| a.success).collect::<Vec<_>>(), [true, true, false]);
    assert_eq!(centrifuge[0].recipient, "system");
    assert_eq!(centrifuge[1].recipient, "floor-ops@example.com");
    assert_eq!(engine.latest_alert_equipment(), Some("Centrifuge_3"));
}

#[tokio::test]
async fn test_alert_feed_never_exceeds_cap() {
    let doc = WorkflowDocument::from_json(LINE_MONITOR).unwrap();
    let mut engine = SimulationEngine::builder(MockNotificationClient::new(), InMemoryAlertLog::default()).alert_feed_cap(4)
                                                                                                         .seed(9)
                                                                                                         .build();
    engine.start(doc.snapshot().unwrap()).unwrap();
    for _ in 0..24 {
        engine.tick().await;
        assert!(engine.alert_feed().len() <= 4);
    }
    // al menos los tres picos (ticks 8, 16, 24) disparan
    assert_eq!(engine.alert_feed().len(), 4);
    assert!(engine.alert_log().len() >= 9);
    let newest = engine.alert_feed().latest().unwrap();
    assert_eq!(newest.id, engine.alert_feed().entries().next().unwrap().id);
}

#[tokio::test]
async fn test_alert_log_uses_document_id_and_status() {
    let doc = WorkflowDocument::from_json(LINE_MONITOR).unwrap();
    let mut engine = SimulationEngine::builder(MockNotificationClient::new(), InMemoryAlertLog::default())
        .workflow_id(doc.id.clone().unwrap())
        .trigger_mode(TriggerMode::Level)
        .seed(3)
        .build();
    engine.start(doc.snapshot().unwrap()).unwrap();
    for _ in 0..8 {
        engine.tick().await;
    }
    let webhook = engine.alert_log().recent(100, Some("webhook"));
    assert!(!webhook.is_empty());
    assert!(webhook.iter().all(|r| r.workflow_id == "wf-line-monitor" && r.status == AlertStatus::Failed));
    let email = &engine.alert_log().recent(100, Some("email"))[0];
    assert_eq!(email.status, AlertStatus::Sent);
    assert!(email.message.contains("NEXUS ALERT - WARNING"));
    assert!(email.message.contains("RPM"));
    assert_eq!(engine.client().sent_on(Channel::Whatsapp)[0].recipient, "+34 600 111 222");
}

#[test]
fn test_start_requires_configured_and_connected_equipment() {
    let mut doc = WorkflowDocument::from_json(LINE_MONITOR).unwrap();
    doc.edges.clear();
    let mut engine = engine(MockNotificationClient::new());
    assert_eq!(engine.start(doc.snapshot().unwrap()), Err(SimulationError::NoConnectedAction));

    doc.nodes.retain(|n| n.is_action || !n.configured);
    assert_eq!(engine.start(doc.snapshot().unwrap()), Err(SimulationError::NoConfiguredEquipment));
    assert!(!engine.is_running());
}
