//! HTTP plumbing shared by every resource module.
//!
//! A transport implements [`ApiClient`] and only knows how to move an
//! [`ApiRequest`] over the wire. [`Api`] wraps a transport, turns status codes
//! into [`ApiError`]s, parses JSON bodies and runs the error interceptor.

mod interceptor;
#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::log;

pub use interceptor::{ErrorInterceptor, LogInterceptor};
#[cfg(not(target_arch = "wasm32"))]
pub use native::{HttpApiClient, TransportError};
#[cfg(target_arch = "wasm32")]
pub use web::{HttpApiClient, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unprocessable Entity: {0}")]
    Unprocessable(String),
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
    #[error("Unauthorized Access")]
    UnauthorizedAccess,
    #[error("Forbidden Access")]
    ForbiddenAccess,
    #[error("Network error: {0}")]
    NetworkError(TransportError),
    #[error("Parse error: {0}")]
    ParseError(serde_json::Error),
    #[error("Serialize error: {0}")]
    SerializeError(serde_json::Error),
    #[error("Unexpected response status code: {0}")]
    UnexpectedStatusCode(u16),
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Backend reported an error: {0}")]
    Backend(String),
}

impl ApiError {
    /// Network failures and 5xx responses; everything else will fail the same
    /// way if sent again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::NetworkError(_) | ApiError::InternalServerError(_)
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Default)]
pub struct ApiHeaders(HashMap<String, String>);

impl ApiHeaders {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Headers every request carries unless overridden.
    pub fn json() -> Self {
        let mut headers = Self::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    pub fn delete(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A single outgoing call, independent of the transport that carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path below the API root, always starting with `/`.
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_body<B>(mut self, body: &B) -> ApiResult<Self>
    where
        B: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::SerializeError)?);
        Ok(self)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// The body as JSON text, ready for the transport.
    pub fn encoded_body(&self) -> ApiResult<Option<String>> {
        self.body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(ApiError::SerializeError)
    }
}

/// The raw status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Moves one request over the wire. Status codes are not interpreted here.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait ApiClient {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

// FastAPI reports failures as {"detail": "..."}; fall back to the raw body.
fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(trimmed.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}

fn handle_response_status(response: ApiResponse, endpoint: &str) -> ApiResult<ApiResponse> {
    if (200..300).contains(&response.status) {
        return Ok(response);
    }

    let detail = error_detail(&response.body);
    match response.status {
        400 => Err(ApiError::BadRequest(
            detail.unwrap_or_else(|| format!("Bad request to {endpoint}")),
        )),
        401 => Err(ApiError::UnauthorizedAccess),
        403 => Err(ApiError::ForbiddenAccess),
        404 => Err(ApiError::NotFound(
            detail.unwrap_or_else(|| format!("{endpoint} not found")),
        )),
        422 => Err(ApiError::Unprocessable(
            detail.unwrap_or_else(|| format!("Rejected payload for {endpoint}")),
        )),
        status @ 500..=599 => Err(ApiError::InternalServerError(
            detail.unwrap_or_else(|| format!("{endpoint} failed with {status}")),
        )),
        status => Err(ApiError::UnexpectedStatusCode(status)),
    }
}

fn parse_json_response<T>(response: ApiResponse) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(&response.body).map_err(ApiError::ParseError)
}

fn handle_json_response<T>(response: ApiResponse, endpoint: &str) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let validated_response = handle_response_status(response, endpoint)?;
    parse_json_response(validated_response)
}

/// A configured backend connection. Resource modules hang off this type,
/// e.g. `api.paypal().get_payments()`.
pub struct Api<C = HttpApiClient> {
    client: C,
    interceptor: Arc<dyn ErrorInterceptor>,
}

impl Api<HttpApiClient> {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(HttpApiClient::new(config.api_base()))
    }
}

impl<C: ApiClient> Api<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            interceptor: Arc::new(LogInterceptor),
        }
    }

    /// Replace the interceptor that observes every failed call.
    pub fn with_interceptor<I>(mut self, interceptor: I) -> Self
    where
        I: ErrorInterceptor + 'static,
    {
        self.interceptor = Arc::new(interceptor);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub(crate) async fn get<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.execute(ApiRequest::new(HttpMethod::Get, endpoint)).await
    }

    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::new(HttpMethod::Post, endpoint).with_body(body);
        self.execute_built(endpoint, request).await
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.execute(ApiRequest::new(HttpMethod::Post, endpoint)).await
    }

    pub(crate) async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::new(HttpMethod::Put, endpoint).with_body(body);
        self.execute_built(endpoint, request).await
    }

    async fn execute_built<T>(&self, endpoint: &str, request: ApiResult<ApiRequest>) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        match request {
            Ok(request) => self.execute(request).await,
            Err(err) => Err(self.reject(endpoint, err)),
        }
    }

    /// Fail a call before anything is sent. The interceptor still sees it.
    pub(crate) fn reject(&self, endpoint: &str, err: ApiError) -> ApiError {
        self.interceptor.on_error(endpoint, &err);
        err
    }

    /// Send a prepared request and parse the JSON body. Every failure passes
    /// through the interceptor exactly once before being returned.
    pub async fn execute<T>(&self, request: ApiRequest) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let endpoint = request.endpoint.clone();
        log::debug!("{} {}", request.method.as_str(), endpoint);

        let result = match self.client.send(request).await {
            Ok(response) => handle_json_response(response, &endpoint),
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            self.interceptor.on_error(&endpoint, err);
        }
        result
    }
}
