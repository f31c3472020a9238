// sensor_catalog.rs
//! Sensores disponibles por tipo de equipo y clasificador de nombres.
//!
//! El clasificador decide el tipo de equipo a partir del nombre de un objeto
//! de la planta (p. ej. `Centrifuge_01` → `centrifuge`).
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sensor de un tipo de equipo con su rango operativo normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDefinition {
    pub id: String,
    pub name: String,
    pub unit: String,
    /// Rango normal `(min, max)`.
    pub range: (f64, f64),
}

impl SensorDefinition {
    fn new(id: &str, name: &str, unit: &str, min: f64, max: f64) -> Self {
        Self { id: id.to_string(),
               name: name.to_string(),
               unit: unit.to_string(),
               range: (min, max) }
    }
}

// Orden relevante: el primer patrón contenido en el nombre gana.
const PATTERNS: [(&str, &str); 7] = [("analyzer", "analyzer"),
                                     ("cartesian", "robot"),
                                     ("centrifuge", "centrifuge"),
                                     ("storage", "storage"),
                                     ("conveyor", "conveyor"),
                                     ("mixer", "mixer"),
                                     ("pump", "pump")];

static SENSOR_DB: Lazy<HashMap<&'static str, Vec<SensorDefinition>>> = Lazy::new(|| {
    let mut db = HashMap::new();
    db.insert("analyzer",
              vec![SensorDefinition::new("temp", "Temperature", "°C", 15.0, 30.0),
                   SensorDefinition::new("ph", "pH Level", "pH", 6.5, 7.5),
                   SensorDefinition::new("turbidity", "Turbidity", "NTU", 0.0, 5.0)]);
    db.insert("robot",
              vec![SensorDefinition::new("x_pos", "X Position", "mm", 0.0, 2000.0),
                   SensorDefinition::new("y_pos", "Y Position", "mm", 0.0, 1500.0),
                   SensorDefinition::new("vibration", "Vibration", "mm/s", 0.0, 5.0),
                   SensorDefinition::new("current", "Motor Current", "A", 0.5, 2.0)]);
    db.insert("centrifuge",
              vec![SensorDefinition::new("rpm", "RPM", "RPM", 3000.0, 5000.0),
                   SensorDefinition::new("vibration", "Vibration", "mm/s", 0.0, 3.0),
                   SensorDefinition::new("temp", "Temperature", "°C", 20.0, 35.0)]);
    db.insert("storage",
              vec![SensorDefinition::new("level", "Fill Level", "%", 20.0, 90.0),
                   SensorDefinition::new("temp", "Temperature", "°C", 15.0, 25.0),
                   SensorDefinition::new("humidity", "Humidity", "%RH", 30.0, 60.0)]);
    db.insert("conveyor",
              vec![SensorDefinition::new("speed", "Belt Speed", "m/min", 5.0, 30.0),
                   SensorDefinition::new("current", "Motor Current", "A", 1.0, 3.0),
                   SensorDefinition::new("vibration", "Vibration", "mm/s", 0.0, 2.0)]);
    db
});

/// Clasifica un equipo por su nombre; `"unknown"` si ningún patrón aplica.
pub fn classify_equipment(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    PATTERNS.iter()
            .find(|(pattern, _)| lower.contains(pattern))
            .map(|(_, kind)| *kind)
            .unwrap_or("unknown")
}

/// Sensores para un tipo de equipo. Tipos sin entrada en el catálogo reciben
/// un único sensor genérico de temperatura.
pub fn sensors_for_type(equipment_type: &str) -> Vec<SensorDefinition> {
    SENSOR_DB.get(equipment_type)
             .cloned()
             .unwrap_or_else(|| vec![SensorDefinition::new("temp", "Temperature", "°C", 0.0, 100.0)])
}
