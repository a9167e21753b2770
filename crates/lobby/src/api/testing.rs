use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{ApiClient, ApiError, ApiRequest, ApiResponse, ApiResult, ErrorInterceptor};

/// In-memory transport that records requests and replays canned responses.
#[derive(Default)]
pub(crate) struct RecordingClient {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(ApiResponse::new(status, body));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait::async_trait]
impl ApiClient for RecordingClient {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ApiError::UnexpectedStatusCode(599))
    }
}

#[derive(Clone, Default)]
pub(crate) struct CountingInterceptor {
    seen: Arc<Mutex<Vec<String>>>,
}

impl CountingInterceptor {
    pub(crate) fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn endpoints(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ErrorInterceptor for CountingInterceptor {
    fn on_error(&self, endpoint: &str, _error: &ApiError) {
        self.seen.lock().unwrap().push(endpoint.to_string());
    }
}
