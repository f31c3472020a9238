use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build http client: {0}")]
    ClientBuild(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting { key: String, value: String },
}
