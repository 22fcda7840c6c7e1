use thiserror::Error;

/// Errors that can occur while loading or browsing recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The persistence collaborator rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Catalog data violates an invariant (duplicate or zero id, zero time)
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// An interactive command could not be understood
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
