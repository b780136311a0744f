//! Configuration error types.

/// Errors raised while loading, saving or checking the viewer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file is not valid RON for [`crate::Config`].
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A setting parsed fine but cannot be used.
    #[error("invalid setting `{section}.{field}`: {reason}")]
    InvalidValue {
        section: &'static str,
        field: &'static str,
        reason: &'static str,
    },
}
