// Scripted transport for controller tests
use crate::infrastructure::api_client::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, TransportError,
};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Scripted {
    Respond {
        status: u16,
        body: Bytes,
        delay: Option<Duration>,
    },
    NetworkDown,
}

/// Responses are queued per (method, path) and consumed in request order.
/// The last queued response for a route repeats.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub const BASE_URL: &'static str = "http://dashboard.test/api";

    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_json(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.push(method, path, Scripted::Respond {
            status,
            body: Bytes::from(body.to_string()),
            delay: None,
        });
    }

    pub fn respond_json_after(
        &self,
        delay: Duration,
        method: HttpMethod,
        path: &str,
        status: u16,
        body: Value,
    ) {
        self.push(method, path, Scripted::Respond {
            status,
            body: Bytes::from(body.to_string()),
            delay: Some(delay),
        });
    }

    pub fn respond_bytes(&self, method: HttpMethod, path: &str, status: u16, body: Vec<u8>) {
        self.push(method, path, Scripted::Respond {
            status,
            body: Bytes::from(body),
            delay: None,
        });
    }

    pub fn fail_network(&self, method: HttpMethod, path: &str) {
        self.push(method, path, Scripted::NetworkDown);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        let url = format!("{}{}", Self::BASE_URL, path);
        self.requests().iter().filter(|r| r.url == url).count()
    }

    fn push(&self, method: HttpMethod, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    fn next(&self, method: HttpMethod, path: &str) -> Option<Scripted> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let path = request
            .url
            .strip_prefix(Self::BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let method = request.method;
        self.requests.lock().unwrap().push(request);

        match self.next(method, &path) {
            Some(Scripted::Respond { status, body, delay }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(ApiResponse { status, body })
            }
            Some(Scripted::NetworkDown) => Err(TransportError("connection refused".to_string())),
            None => Err(TransportError(format!("no scripted response for {}", path))),
        }
    }
}
