//! Typed client for the ZZ-Lobby automation dashboard backend.
//!
//! [`api::Api`] wraps a configured transport; each backend resource is reached
//! through an accessor on it, e.g. `api.paypal().create_payment("25", None)`.
//! Native builds talk HTTP through `reqwest` and can poll with
//! [`poll::Poller`]; `wasm32` builds use `gloo-net`.

pub mod api;
pub mod config;
pub mod data;
pub mod errors;
pub mod id;
pub mod log;
pub mod overview;
#[cfg(not(target_arch = "wasm32"))]
pub mod poll;
pub mod resources;

pub use api::{Api, ApiClient, ApiError, ApiResult, HttpApiClient};
pub use config::ApiConfig;

pub use serde;
pub use serde_json;
pub use tracing;
