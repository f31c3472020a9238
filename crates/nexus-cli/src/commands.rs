use std::path::{Path, PathBuf};
use std::time::Duration;

use nexus_core::sensor::{generate, generate_mock_sensor_data};
use nexus_core::{try_evaluate, InMemoryAlertLog, MockNotificationClient, NotificationClient, Operator, SimulationEngine,
                 TriggerMode, WorkflowSnapshot};
use nexus_domain::{classify_equipment, sensors_for_type};
use nexus_notify::{HttpNotificationClient, NotifyConfig};
use nexusflow_rust::config::{check_tick_interval, AppConfig};
use nexusflow_rust::demo::{build_engine, load_workflow, sample_workflow};
use nexusflow_rust::CoreError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Códigos de salida: 2 configuración, 3 workflow, 4 simulación, 5 IO/otros.
pub fn exit_code(e: &CoreError) -> u8 {
    match e {
        CoreError::Config(_) | CoreError::Notify(_) => 2,
        CoreError::Workflow(_) => 3,
        CoreError::Simulation(_) => 4,
        CoreError::Io(_) | CoreError::Internal(_) => 5,
    }
}

pub fn validate(file: &Path) -> Result<(), CoreError> {
    let doc = load_workflow(file)?;
    let snapshot = doc.snapshot()?;
    let configured = snapshot.nodes().iter().filter(|n| n.equipment_config().is_some()).count();
    let actions = snapshot.nodes().iter().filter(|n| n.action_config().is_some()).count();
    println!("workflow: {} ({})", doc.name, doc.id.as_deref().unwrap_or("unsaved"));
    println!("nodes: {}  edges: {}", snapshot.nodes().len(), snapshot.edges().len());
    println!("configured equipment: {configured}  configured actions: {actions}");
    println!("definition hash: {}", snapshot.definition_hash());

    // el arranque valida lo mismo que la simulación real
    let mut engine = SimulationEngine::new(MockNotificationClient::new(), InMemoryAlertLog::default());
    engine.start(snapshot)?;
    println!("ok: simulation can start");
    Ok(())
}

pub fn evaluate(value: f64, operator: &str, threshold: f64, max: Option<f64>) -> Result<(), CoreError> {
    let op: Operator = operator.parse().map_err(|e: nexus_core::EvaluationError| CoreError::Config(e.to_string()))?;
    let met = try_evaluate(value, op, threshold, max).map_err(|e| CoreError::Config(e.to_string()))?;
    match max {
        Some(m) if op.is_range() => println!("{value} {op} [{threshold}, {m}] => {met}"),
        _ => println!("{value} {op} {threshold} => {met}"),
    }
    Ok(())
}

pub fn sensors(file: &Path, tick: u64, seed: Option<u64>, mock_data: bool) -> Result<(), CoreError> {
    let snapshot = load_workflow(file)?.snapshot()?;
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    if mock_data {
        let data = generate_mock_sensor_data(snapshot.nodes(), &mut rng);
        let out = serde_json::to_string_pretty(&data).map_err(|e| CoreError::Internal(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }
    let frame = generate(snapshot.nodes(), tick, &mut rng);
    for s in &frame.display {
        println!("{:<16} {:<10} {:>10.2} / {:<10} {:>3}% {:?}",
                 s.equipment, s.key, s.value, s.threshold, s.progress_pct, s.status);
    }
    Ok(())
}

pub fn equipment(name: &str) {
    let kind = classify_equipment(name);
    println!("{name}: {kind}");
    for s in sensors_for_type(kind) {
        println!("  {:<12} {:<22} {:<6} [{}, {}]", s.id, s.name, s.unit, s.range.0, s.range.1);
    }
}

#[derive(Debug)]
pub struct RunOptions {
    pub file: Option<PathBuf>,
    pub interval: Option<u64>,
    pub ticks: Option<u64>,
    pub mock: bool,
    pub mode: Option<TriggerMode>,
    pub seed: Option<u64>,
}

pub async fn run(opts: RunOptions) -> Result<(), CoreError> {
    let mut app = AppConfig::from_env()?;
    if let Some(secs) = opts.interval {
        app.simulation.tick_interval_secs = check_tick_interval(secs)?;
    }
    if let Some(mode) = opts.mode {
        app.simulation.trigger_mode = mode;
    }
    let snapshot = match &opts.file {
        Some(path) => load_workflow(path)?.snapshot()?,
        None => sample_workflow()?.snapshot(),
    };

    let mut notify = NotifyConfig::from_env()?;
    notify.mock_mode |= opts.mock;
    if !notify.mock_mode && !notify.whatsapp_configured() {
        log::warn!("WhatsApp credentials not configured; whatsapp deliveries will fail");
    }
    let client = HttpNotificationClient::new(notify)?;
    let engine = build_engine(client, &app.simulation, opts.seed);
    drive(engine, snapshot, app.simulation.tick_interval_secs, opts.ticks).await
}

/// Bucle periódico: un único timer serializa los ticks. Ctrl-C detiene la
/// simulación sin cancelar entregas en curso.
async fn drive<C: NotificationClient>(mut engine: SimulationEngine<C, InMemoryAlertLog>,
                                      snapshot: WorkflowSnapshot,
                                      interval_secs: u64,
                                      max_ticks: Option<u64>)
                                      -> Result<(), CoreError> {
    engine.start(snapshot)?;
    println!("simulation started, updates every {interval_secs}s (Ctrl-C to stop)");
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = interval.tick() => {
                let Some(report) = engine.tick().await else { break };
                for alert in &report.alerts {
                    let mark = if alert.success { "sent" } else { "FAILED" };
                    println!("{} ALERT {} {}={} (threshold {}) -> {} {} [{mark}]",
                             alert.severity.emoji(),
                             alert.equipment,
                             alert.sensor,
                             alert.value,
                             alert.threshold,
                             alert.action_type,
                             alert.recipient);
                }
                if max_ticks.is_some_and(|max| report.tick >= max) {
                    break;
                }
            }
        }
    }
    let ticks = engine.tick_count();
    engine.stop();
    println!("simulation stopped after {ticks} ticks, {} alerts in feed", engine.alert_feed().len());
    Ok(())
}
