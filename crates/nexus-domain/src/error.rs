// error.rs
use thiserror::Error;

/// Error del dominio de monitoreo (vocabulario de nodos, severidades,
/// sensores).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Categoría desconocida: {0}")]
    UnknownCategory(String),

    #[error("Severidad desconocida: {0}")]
    UnknownSeverity(String),
}
