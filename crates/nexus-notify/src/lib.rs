//! nexus-notify: cliente HTTP real de los canales de notificación.
//!
//! Correo vía endpoint relay (`POST {to, subject, body}`), WhatsApp Business
//! Cloud API y webhooks genéricos. Con `NEXUS_NOTIFICATION_MOCK_MODE=true` no
//! se hace ninguna llamada de red.
pub mod config;
pub mod error;
pub mod http;

pub use config::NotifyConfig;
pub use error::NotifyError;
pub use http::{clean_phone, HttpNotificationClient};
