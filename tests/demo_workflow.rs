use nexus_core::{ActionKind, MockNotificationClient, WorkflowDocument};
use nexusflow_rust::config::SimulationConfig;
use nexusflow_rust::demo::{build_engine, sample_workflow};

#[test]
fn test_sample_workflow_survives_json_export() {
    let graph = sample_workflow().unwrap();
    let doc = WorkflowDocument::from_graph(Some("wf-demo".into()), "Demo", &graph);
    let raw = doc.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["nodes"][0]["config"]["kind"], "equipment");
    assert_eq!(value["nodes"][0]["config"]["operator"], ">");

    let reloaded = WorkflowDocument::from_json(&raw).unwrap();
    assert_eq!(reloaded.snapshot().unwrap().definition_hash(), graph.snapshot().definition_hash());
}

#[test]
fn test_demo_engine_alerts_on_spike_ticks() {
    let graph = sample_workflow().unwrap();
    let config = SimulationConfig { alert_feed_cap: 100, ..SimulationConfig::default() };
    let mut engine = build_engine(MockNotificationClient::new(), &config, Some(42));
    engine.start(graph.snapshot()).unwrap();

    let reports = tokio_test::block_on(async {
        let mut out = Vec::new();
        for _ in 0..16 {
            out.extend(engine.tick().await);
        }
        out
    });
    assert_eq!(reports.len(), 16);
    for spike in [&reports[7], &reports[15]] {
        let kinds: Vec<ActionKind> = spike.alerts
                                          .iter()
                                          .filter(|a| a.equipment == "Centrifuge_3")
                                          .map(|a| a.action_type)
                                          .collect();
        assert_eq!(kinds, [ActionKind::Alert, ActionKind::Email]);
    }
    assert!(engine.client().sent().iter().any(|m| m.recipient == "floor-ops@example.com"));
}
