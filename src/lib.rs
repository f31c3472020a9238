//! NexusFlow Rust Library
//!
//! Este crate actúa como la capa de aplicación de NexusFlow:
//! - Expone `config` con la configuración cargada del entorno.
//! - Expone `errors` para los errores de aplicación.
//! - Expone `demo` con un workflow de ejemplo y helpers de arranque.
//!
//! Puede usarse desde `main.rs`, desde `nexus-cli` o por otros clientes.

pub mod config;
pub mod demo;
pub mod errors;

pub use config::{AppConfig, SimulationConfig, CONFIG};
pub use errors::CoreError;

/// Inicializa `env_logger` con nivel `info` por defecto (`RUST_LOG` manda).
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
