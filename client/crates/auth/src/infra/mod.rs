//! Infrastructure Layer
//!
//! Gateway implementations over the platform Transport.

pub mod http;
