use gloo_net::http::{Request, RequestBuilder};

use super::{ApiClient, ApiError, ApiHeaders, ApiRequest, ApiResponse, ApiResult, HttpMethod};

pub type TransportError = gloo_net::Error;

impl From<&ApiHeaders> for gloo_net::http::Headers {
    fn from(val: &ApiHeaders) -> Self {
        let headers = gloo_net::http::Headers::new();
        for (key, value) in val.iter() {
            headers.set(key, value);
        }
        headers
    }
}

/// The browser transport, backed by `fetch` through `gloo-net`.
#[derive(Clone)]
pub struct HttpApiClient {
    root_url: String,
    headers: ApiHeaders,
}

impl HttpApiClient {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            headers: ApiHeaders::json(),
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

    fn builder(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = format!("{}{}", self.root_url, request.endpoint);

        let builder = self
            .builder(request.method, &url)
            .headers((&self.headers).into())
            .query(
                request
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );

        let response = match request.encoded_body()? {
            Some(body) => builder
                .body(body)
                .map_err(ApiError::NetworkError)?
                .send()
                .await
                .map_err(ApiError::NetworkError)?,
            None => builder.send().await.map_err(ApiError::NetworkError)?,
        };

        let status = response.status();
        let body = response.text().await.map_err(ApiError::NetworkError)?;

        Ok(ApiResponse { status, body })
    }
}
