//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the shared technical foundations of the client:
//! - Transport: the single chokepoint for outgoing HTTP calls
//! - Token vault: the bearer token, its durable storage and invalidation signal
//! - Request sequencing: discarding superseded responses
//! - Client configuration
//! - A scripted HTTP backend for tests (`testing` feature)

pub mod backend;
pub mod config;
pub mod error;
pub mod sequence;
pub mod token;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::ReqwestBackend;
pub use config::ClientConfig;
pub use error::{TransportError, TransportResult};
pub use sequence::{RequestSequence, Ticket};
pub use token::{SessionSignal, TokenStorage, TokenVault};
pub use transport::{HttpBackend, HttpRequest, HttpResponse, RequestBody, RequestOptions, Transport};
