//! Scripted HTTP backend for tests
//!
//! Responses are queued per `(method, path)` and consumed in order. A
//! response can be held behind a [`Gate`] so a test decides when (and in
//! which order) concurrent requests resolve.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use http::{Method, StatusCode};
use serde_json::Value;
use tokio::sync::oneshot;

use crate::error::{TransportError, TransportResult};
use crate::transport::{HttpBackend, HttpRequest, HttpResponse};

type Route = (Method, String);

enum Scripted {
    Ready(TransportResult<HttpResponse>),
    Gated(oneshot::Receiver<TransportResult<HttpResponse>>),
}

#[derive(Default)]
struct MockState {
    routes: HashMap<Route, VecDeque<Scripted>>,
    requests: Vec<HttpRequest>,
}

/// Recording, scripted [`HttpBackend`]; clones share the same script
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

/// Holds back one scripted response until opened
pub struct Gate {
    tx: oneshot::Sender<TransportResult<HttpResponse>>,
}

impl Gate {
    /// Release the held request with a JSON response
    pub fn open(self, status: u16, body: Value) {
        let _ = self.tx.send(Ok(json_response(status, &body)));
    }

    /// Release the held request with a network failure
    pub fn fail(self, message: &str) {
        let _ = self.tx.send(Err(TransportError::Network(message.to_string())));
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response
    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Scripted::Ready(Ok(json_response(status, &body))));
    }

    /// Queue a response with a raw body
    pub fn reply_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        let response = HttpResponse::new(status_code(status), body.as_bytes().to_vec());
        self.push(method, path, Scripted::Ready(Ok(response)));
    }

    /// Queue a network failure
    pub fn fail_network(&self, method: Method, path: &str, message: &str) {
        let err = TransportError::Network(message.to_string());
        self.push(method, path, Scripted::Ready(Err(err)));
    }

    /// Queue a response that resolves only when the returned gate opens
    pub fn gate(&self, method: Method, path: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Gated(rx));
        Gate { tx }
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }

    /// Number of requests received for one route
    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        if let Ok(mut state) = self.state.lock() {
            state
                .routes
                .entry((method, path.to_string()))
                .or_default()
                .push_back(scripted);
        }
    }
}

impl HttpBackend for MockBackend {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        let route = (request.method.clone(), request.path.clone());
        let next = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| TransportError::Network("mock backend poisoned".into()))?;
            state.requests.push(request);
            state.routes.get_mut(&route).and_then(VecDeque::pop_front)
        };

        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".into()))),
            None => Err(TransportError::Network(format!(
                "no scripted response for {} {}",
                route.0, route.1
            ))),
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse::new(status_code(status), body.to_string().into_bytes())
}
