use nexus_core::{GraphError, SimulationError};
use nexus_notify::NotifyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Workflow inválido: {0}")]
    Workflow(#[from] GraphError),
    #[error("No se pudo iniciar la simulación: {0}")]
    Simulation(#[from] SimulationError),
    #[error("Error de notificaciones: {0}")]
    Notify(#[from] NotifyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: CoreError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
    }

    #[test]
    fn test_simulation_variant_from() {
        let err: CoreError = SimulationError::NoConnectedAction.into();
        assert_eq!(err.to_string(), "No se pudo iniciar la simulación: connect equipment to an action node first");
    }
}
