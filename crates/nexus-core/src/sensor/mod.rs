//! Generación de datos de sensores.

pub mod generator;
pub mod reading;

pub use generator::{generate, is_spike_tick, synthesize_value, SensorDisplay, SensorFrame, SensorReading, SensorStatus};
pub use reading::{generate_mock_sensor_data, generate_reading, value_status, Anomaly};
