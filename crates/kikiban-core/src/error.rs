//! Error types for the core services
//!
//! Lookups, probes and the mate query never fail; only configuration does.

/// Core configuration errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Hash size outside the accepted range
    #[error("Invalid hash size: {mb} MiB (expected 1..={max})")]
    InvalidHashSize { mb: usize, max: usize },

    /// Environment variable could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
