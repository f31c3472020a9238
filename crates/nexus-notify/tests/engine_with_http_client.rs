use nexus_core::{ActionConfig, ActionKind, AlertLog, AlertStatus, Edge, EquipmentConfig, InMemoryAlertLog, Node, Operator,
                 SimulationEngine, WorkflowSnapshot};
use nexus_notify::{HttpNotificationClient, NotifyConfig};

fn snapshot() -> WorkflowSnapshot {
    let eq = Node::equipment("node_1", "Storage_1", "storage", EquipmentConfig::new("level", Operator::GreaterThan, 90.0));
    let wa = Node::action("node_2",
                          "WhatsApp-2",
                          ActionKind::Whatsapp,
                          ActionConfig { phone_number: Some("+34 600 111 222".into()), ..ActionConfig::default() });
    WorkflowSnapshot::new(vec![eq, wa], vec![Edge::new("node_1", "node_2").unwrap()]).unwrap()
}

#[tokio::test]
async fn test_mock_mode_client_drives_engine() {
    let client = HttpNotificationClient::new(NotifyConfig::mock()).unwrap();
    let mut engine = SimulationEngine::builder(client, InMemoryAlertLog::default()).seed(11).build();
    engine.start(snapshot()).unwrap();
    for _ in 0..8 {
        engine.tick().await;
    }
    let sent = engine.alert_log().recent(10, Some("whatsapp"));
    assert!(!sent.is_empty());
    assert!(sent.iter().all(|r| r.status == AlertStatus::Sent));
}

#[tokio::test]
async fn test_missing_credentials_become_failed_alerts() {
    let client = HttpNotificationClient::new(NotifyConfig::default()).unwrap();
    let mut engine = SimulationEngine::builder(client, InMemoryAlertLog::default()).seed(11).build();
    engine.start(snapshot()).unwrap();
    for _ in 0..8 {
        engine.tick().await;
    }
    let entry = engine.alert_feed().latest().expect("spike tick fires");
    assert!(!entry.success);
    let rec = &engine.alert_log().recent(1, None)[0];
    assert_eq!(rec.status, AlertStatus::Failed);
    assert_eq!(rec.error_message.as_deref(), Some("WhatsApp API credentials missing"));
    assert!(engine.is_running());
}
