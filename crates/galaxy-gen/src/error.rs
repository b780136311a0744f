//! Generation error types.

/// Errors raised before any point is generated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalaxyError {
    /// A required numeric field is zero, negative or not finite.
    #[error("invalid galaxy config: `{field}` {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
}
