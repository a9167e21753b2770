use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::{ApiClient, ApiError, ApiHeaders, ApiRequest, ApiResponse, ApiResult, HttpMethod};
use crate::log;

pub type TransportError = reqwest::Error;

impl From<&ApiHeaders> for HeaderMap {
    fn from(val: &ApiHeaders) -> Self {
        let mut headers = HeaderMap::new();
        for (key, value) in val.iter() {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => log::warn!("Skipping invalid header {key}"),
            }
        }
        headers
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(val: HttpMethod) -> Self {
        match val {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// The native transport, backed by a pooled [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpApiClient {
    root_url: String,
    headers: ApiHeaders,
    http: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            headers: ApiHeaders::json(),
            http: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured [`reqwest::Client`], e.g. with timeouts or proxy
    /// settings.
    pub fn with_client(root_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            root_url: root_url.into(),
            headers: ApiHeaders::json(),
            http,
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn set_header(&mut self, key: String, value: String) {
        self.headers.insert(key, value);
    }

    pub fn set_headers(&mut self, headers: Vec<(String, String)>) {
        for (key, value) in headers {
            self.headers.insert(key, value);
        }
    }
}

#[async_trait::async_trait]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = format!("{}{}", self.root_url, request.endpoint);

        let mut builder = self
            .http
            .request(request.method.into(), &url)
            .headers((&self.headers).into());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.encoded_body()? {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(ApiError::NetworkError)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::NetworkError)?;

        Ok(ApiResponse { status, body })
    }
}
