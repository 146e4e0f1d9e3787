// API client - Transport for the dashboard HTTP API with a swappable auth header
use crate::domain::dataset::UploadFile;
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

const AUTH_SCHEME: &str = "Token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart { field: String, file: UploadFile },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

/// The request never produced an HTTP response (DNS, connect, reset...).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Non-2xx response, with the human-readable detail already extracted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct HttpError {
    pub status: u16,
    pub detail: String,
}

impl HttpError {
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = extract_detail(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        Self { status, detail }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("Network error: {0}")]
    Network(#[from] TransportError),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(err) => Some(err.status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Pull `detail` out of a JSON error body. Non-string details are rendered as JSON.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        Value::String(_) | Value::Null => None,
        other => Some(other.to_string()),
    }
}

pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// One instance per application. Status codes are classified into
/// `HttpError` but never interpreted here; callers decide what a 404 means.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    auth_header: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            auth_header: RwLock::new(None),
        }
    }

    /// `Some(token)` attaches `Authorization: Token <token>` to every
    /// subsequent request; `None` removes the header entirely.
    pub fn set_auth_header(&self, token: Option<&str>) {
        let mut header = self
            .auth_header
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *header = token.map(|t| format!("{} {}", AUTH_SCHEME, t));
    }

    pub fn auth_header(&self) -> Option<String> {
        self.auth_header
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self
            .execute(HttpMethod::Get, path, RequestBody::Empty, true)
            .await?;
        decode(&body)
    }

    pub async fn get_binary(&self, path: &str) -> Result<Bytes, ApiError> {
        self.execute(HttpMethod::Get, path, RequestBody::Empty, true)
            .await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(HttpMethod::Post, path, encode(body)?, true)
            .await?;
        decode(&body)
    }

    /// Like `post_json`, but never carries the `Authorization` header.
    pub async fn post_json_anonymous<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(HttpMethod::Post, path, encode(body)?, false)
            .await?;
        decode(&body)
    }

    /// POST without a body; the response body is ignored.
    pub async fn post(&self, path: &str) -> Result<(), ApiError> {
        self.execute(HttpMethod::Post, path, RequestBody::Empty, true)
            .await
            .map(|_| ())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file: &UploadFile,
    ) -> Result<T, ApiError> {
        let body = RequestBody::Multipart {
            field: field.to_string(),
            file: file.clone(),
        };
        let body = self.execute(HttpMethod::Post, path, body, true).await?;
        decode(&body)
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        with_auth: bool,
    ) -> Result<Bytes, ApiError> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(value) = self.auth_header().filter(|_| with_auth) {
            headers.push(("Authorization".to_string(), value));
        }

        let request = ApiRequest {
            method,
            url: join_url(&self.base_url, path),
            headers,
            body,
        };

        tracing::debug!("{:?} {}", request.method, request.url);
        let response = self.transport.send(request).await?;

        if !(200..300).contains(&response.status) {
            let err = HttpError::from_response(response.status, &response.body);
            tracing::debug!("{} failed with status {}: {}", path, err.status, err.detail);
            return Err(err.into());
        }

        Ok(response.body)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
