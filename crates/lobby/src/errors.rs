//! Shared error types for the lobby client and its binaries.
//!
//! Request failures live in [`crate::api::ApiError`]; this module covers
//! everything around them.
#[cfg(not(target_arch = "wasm32"))]
pub use color_eyre::Report;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingBackendUrl(&'static str),
    #[error("Backend URL {0:?} must start with http:// or https://")]
    InvalidBackendUrl(String),
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidPollInterval { name: &'static str, value: String },
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,
}
