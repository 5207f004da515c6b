use thiserror::Error;

/// Errors from configuration, file I/O and report output.
/// Parsing, aggregation, advice and simulation are total and never produce these.
#[derive(Error, Debug)]
pub enum LockTunerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
