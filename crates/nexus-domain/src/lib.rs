// nexus-domain library entry point
pub mod category;
pub mod error;
pub mod sensor_catalog;
pub mod severity;
pub use category::{category_definition, ActionKind, CategoryDefinition, CategoryKind, CATEGORY_DEFINITIONS};
pub use error::DomainError;
pub use sensor_catalog::{classify_equipment, sensors_for_type, SensorDefinition};
pub use severity::Severity;
