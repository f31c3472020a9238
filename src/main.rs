//! Demo: ejecuta el workflow de ejemplo con el cliente de notificaciones en
//! modo mock y muestra el feed de alertas.
use nexus_core::MockNotificationClient;
use nexusflow_rust::demo::{build_engine, sample_workflow};
use nexusflow_rust::{init_logging, CoreError, CONFIG};

const DEMO_TICKS: u64 = 16;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    init_logging();
    let graph = sample_workflow()?;
    let mut engine = build_engine(MockNotificationClient::new(), &CONFIG.simulation, None);
    engine.start(graph.snapshot())?;

    println!("== NexusFlow demo: {} nodes, {} edges, {DEMO_TICKS} ticks ==", graph.nodes().len(), graph.edges().len());
    for _ in 0..DEMO_TICKS {
        let Some(report) = engine.tick().await else { break };
        for s in engine.current_sensor_values() {
            println!("[tick {:>2}] {:<14} {:<5} {:>9.2} / {:<8} {:>3}% {:?}",
                     report.tick, s.equipment, s.key, s.value, s.threshold, s.progress_pct, s.status);
        }
    }
    engine.stop();

    println!("\n== Alert feed (newest first) ==");
    for a in engine.alert_feed().entries() {
        let mark = if a.success { "ok" } else { "FAILED" };
        println!("{} {} {} {}={} (threshold {}) -> {} [{mark}]",
                 a.timestamp.format("%H:%M:%S"),
                 a.severity.emoji(),
                 a.equipment,
                 a.sensor,
                 a.value,
                 a.threshold,
                 a.action_type);
    }
    println!("\nmessages delivered by mock client: {}", engine.client().sent().len());
    Ok(())
}
