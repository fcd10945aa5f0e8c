use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("{name} must be set")]
    MissingVar { name: &'static str },

    #[error("MongoDB connection failed: {0}")]
    Connection(#[from] mongodb::error::Error),

    #[error("HTTP server error: {0}")]
    Server(#[from] std::io::Error),
}

impl BootstrapError {
    /// Process exit status for this failure. Only `main` acts on it.
    pub fn exit_code(&self) -> u8 {
        match self {
            BootstrapError::MissingVar { .. } => 1,
            BootstrapError::Connection(_) => 1,
            BootstrapError::Server(_) => 1,
        }
    }
}
