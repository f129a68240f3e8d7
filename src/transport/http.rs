//! Thin blocking HTTP capability for the Smart-HTTP transport.

use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};

/// Wrapper over a blocking reqwest client carrying the configured
/// user agent and timeout. Redirects are followed (reqwest default).
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(HttpClient { client })
    }

    /// GET a URL and return the raw response body.
    pub fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Self::body(response)
    }

    /// POST a body with the given content type and return the raw response
    /// body.
    pub fn post(&self, url: &str, body: Vec<u8>, content_type: &str) -> Result<Vec<u8>> {
        tracing::debug!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Self::body(response)
    }

    fn body(response: reqwest::blocking::Response) -> Result<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("server returned {}", status)));
        }
        let bytes = response
            .bytes()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
