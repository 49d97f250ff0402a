//! Production network backend
//!
//! Moves [`HttpRequest`]s over the wire with `reqwest`.

use http::{HeaderValue, header};

use crate::config::ClientConfig;
use crate::error::{TransportError, TransportResult};
use crate::transport::{HttpBackend, HttpRequest, HttpResponse, RequestBody};

/// `reqwest`-based backend rooted at the configured API base URL
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestBackend {
    pub fn new(config: &ClientConfig) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("skillslab-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        let url = self.url_for(&request.path);
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| TransportError::Request(e.to_string()))?;
                builder
                    .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
                    .body(bytes)
            }
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await.map_err(TransportError::network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::network)?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig {
            api_base_url: "http://localhost:8000/api/v1/".into(),
            ..ClientConfig::default()
        };
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(
            backend.url_for("/problems/1"),
            "http://localhost:8000/api/v1/problems/1"
        );
    }
}
