//! One module per backend resource. Each function issues exactly one request
//! and returns the parsed body untouched; failures come back as
//! [`ApiError`](crate::api::ApiError) after passing the error interceptor.

pub mod analytics;
pub mod automations;
pub mod autonomous;
pub mod dashboard;
pub mod digital_manager;
pub mod optimization;
pub mod paypal;
pub mod saas;

pub use analytics::AnalyticsApi;
pub use automations::AutomationApi;
pub use autonomous::AutonomousApi;
pub use dashboard::DashboardApi;
pub use digital_manager::DigitalManagerApi;
pub use optimization::OptimizationApi;
pub use paypal::{Amount, PaypalApi};
pub use saas::SaasApi;
