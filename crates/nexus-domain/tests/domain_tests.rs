use nexus_domain::{classify_equipment, sensors_for_type, Severity};

#[test]
fn test_classify_equipment_by_name_pattern() {
    assert_eq!(classify_equipment("Centrifuge_01"), "centrifuge");
    assert_eq!(classify_equipment("ANALYZER_10"), "analyzer");
    // "cartesian" es el nombre de los robots en la escena
    assert_eq!(classify_equipment("Cartesian_Arm"), "robot");
    assert_eq!(classify_equipment("Object_42"), "unknown");
}

#[test]
fn test_sensors_for_known_type() {
    let sensors = sensors_for_type("centrifuge");
    let ids: Vec<&str> = sensors.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["rpm", "vibration", "temp"]);
    assert_eq!(sensors[0].range, (3000.0, 5000.0));
}

#[test]
fn test_sensors_for_unknown_type_fall_back_to_temperature() {
    let sensors = sensors_for_type("mixer");
    assert_eq!(sensors.len(), 1);
    assert_eq!(sensors[0].id, "temp");
    assert_eq!(sensors[0].range, (0.0, 100.0));
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Critical > Severity::Warning);
    assert!(Severity::Warning > Severity::Info);
}
