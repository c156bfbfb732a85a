use thiserror::Error;

/// Top-level error type for hubctl.
#[derive(Debug, Error)]
pub enum HubError {
    /// Error talking to the messaging transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A service script could not be launched or exited unsuccessfully.
    #[error("execution error: {0}")]
    Execution(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
