//! Transport
//!
//! The single chokepoint for outgoing HTTP calls:
//! - attaches `Authorization: Bearer <token>` when a token is stored
//! - unwraps 2xx bodies into the caller's type
//! - turns every other outcome into a [`TransportError`] with a
//!   display-ready message taken from the server's `detail` field
//! - purges the stored token when the server rejects it
//!
//! Transport never retries; retry policy belongs to the caller.

use std::sync::Arc;

use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FALLBACK_ERROR_MESSAGE, TransportError, TransportResult};
use crate::token::TokenVault;

/// Outgoing request body
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize `payload` as a JSON body
    pub fn json<T: Serialize>(payload: &T) -> TransportResult<Self> {
        serde_json::to_value(payload)
            .map(RequestBody::Json)
            .map_err(|e| TransportError::Request(e.to_string()))
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query string parameters, in order
    pub query: Vec<(String, String)>,
    /// A rejected login attempt is a plain failure, never a session invalidation
    pub login_attempt: bool,
}

impl RequestOptions {
    pub fn query(query: Vec<(String, String)>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn login() -> Self {
        Self {
            login_attempt: true,
            ..Self::default()
        }
    }
}

/// A request as handed to the network backend
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

/// A raw response from the network backend
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Raw network exchange
///
/// Implementations only move bytes; they never interpret status codes.
#[trait_variant::make(HttpBackend: Send)]
pub trait LocalHttpBackend {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse>;
}

/// Authorizing, unwrapping HTTP client shared by every store
pub struct Transport<B> {
    backend: B,
    vault: Arc<TokenVault>,
}

impl<B> Transport<B>
where
    B: HttpBackend + Sync,
{
    pub fn new(backend: B, vault: Arc<TokenVault>) -> Self {
        Self { backend, vault }
    }

    pub fn vault(&self) -> &Arc<TokenVault> {
        &self.vault
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Issue one request and decode the 2xx body as `T`
    #[tracing::instrument(name = "transport.request", skip_all, fields(%method, %path))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> TransportResult<T> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let token = self.vault.token();
        if let Some(token) = &token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| TransportError::Request(e.to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let request = HttpRequest {
            method,
            path: path.to_string(),
            query: options.query,
            headers,
            body,
        };

        tracing::debug!(authorized = token.is_some(), "Dispatching request");
        let response = HttpBackend::send(&self.backend, request)
            .await
            .inspect_err(|e| e.log())?;

        if response.status.is_success() {
            return decode_body(&response.body);
        }

        let message = error_message(&response.body);
        let err = if response.status == StatusCode::UNAUTHORIZED
            && !options.login_attempt
            && token.is_some()
        {
            if let Some(token) = &token {
                // Purges and signals at most once per rejected credential.
                self.vault.invalidate_if_current(token);
            }
            TransportError::SessionInvalidated { message }
        } else {
            TransportError::Status {
                status: response.status.as_u16(),
                message,
            }
        };
        err.log();
        Err(err)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> TransportResult<T> {
        self.request(Method::GET, path, RequestBody::Empty, RequestOptions::query(query))
            .await
    }

    pub async fn post<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        payload: &P,
    ) -> TransportResult<T> {
        let body = RequestBody::json(payload)?;
        self.request(Method::POST, path, body, RequestOptions::default())
            .await
    }

    pub async fn put<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        payload: &P,
    ) -> TransportResult<T> {
        let body = RequestBody::json(payload)?;
        self.request(Method::PUT, path, body, RequestOptions::default())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        self.request(Method::DELETE, path, RequestBody::Empty, RequestOptions::default())
            .await
    }
}

/// Decode a 2xx body; an empty body decodes as JSON `null`
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> TransportResult<T> {
    let result = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    result.map_err(|e| {
        let err = TransportError::Decode(e.to_string());
        err.log();
        err
    })
}

/// Human-readable message from a structured error payload
///
/// - `{"detail": "text"}` → `text`
/// - `{"detail": [{"msg": ...}, ...]}` → the `msg` fields joined with `"; "`
/// - anything else → [`FALLBACK_ERROR_MESSAGE`]
pub fn error_message(body: &[u8]) -> String {
    extract_detail(body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

fn extract_detail(body: &[u8]) -> Option<String> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    match payload.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
