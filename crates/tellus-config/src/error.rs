//! Configuration error types.

/// Errors from loading, saving, or parsing a planet configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// The config file could not be written.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// The RON content did not parse.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// The config could not be serialized to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
