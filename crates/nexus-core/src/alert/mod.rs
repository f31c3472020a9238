//! Feed de alertas en memoria y sink del log de alertas.

pub mod feed;
pub mod log;

pub use feed::{AlertEntry, AlertFeed};
pub use self::log::{AlertLog, AlertLogRecord, AlertStatus, InMemoryAlertLog};
