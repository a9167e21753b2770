use super::ApiError;
use crate::log;

/// Observes every failed API call before the error reaches the caller.
///
/// Implementations must not alter the error; they exist for logging and
/// metrics only.
pub trait ErrorInterceptor: Send + Sync {
    fn on_error(&self, endpoint: &str, error: &ApiError);
}

/// Logs each failure once at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogInterceptor;

impl ErrorInterceptor for LogInterceptor {
    fn on_error(&self, endpoint: &str, error: &ApiError) {
        log::error!(endpoint = endpoint, "API Error: {error}");
    }
}
