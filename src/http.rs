//! HTTP client wrapper for platform API requests.

use std::time::Duration;

use base64::{engine::general_purpose, Engine};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};

use crate::error::{IsilonError, Result};

/// Raw reply: status plus body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// True when the body holds nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// HTTP client for making requests to the cluster.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// # Arguments
    /// * `insecure` - Accept any TLS certificate (clusters commonly run self-signed)
    /// * `timeout` - Upper bound for one request/response round trip
    pub fn new(insecure: bool, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| IsilonError::Config(format!("Failed to build client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Send one request.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `url` - Fully built URL including query parameters
    /// * `auth` - Value of the `Authorization` header
    /// * `headers` - Extra headers, added in order
    /// * `body` - JSON body; sets `Content-Type: application/json` unless given in `headers`
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        auth: &str,
        headers: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse> {
        let mut request = self.client.request(method, url).header(AUTHORIZATION, auth);

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        if let Some(body) = body {
            let has_content_type = headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if !has_content_type {
                request = request.header(CONTENT_TYPE, "application/json");
            }
            request = request.body(body);
        }

        let send = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, IsilonError>(HttpResponse { status, body })
        };

        tokio::time::timeout(self.timeout, send)
            .await
            .map_err(|_| IsilonError::Timeout)?
    }
}

/// Format an HTTP basic authentication header value.
pub fn format_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", general_purpose::STANDARD.encode(credentials))
}
