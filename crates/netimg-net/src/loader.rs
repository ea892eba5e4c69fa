//! Resource Loader
//!
//! Validates a URL and performs one GET on a fresh connection.

use std::collections::HashMap;

use crate::client::{ClientConfig, HttpClient};
use crate::{NetError, Response};

/// GET request description
#[derive(Debug, Default)]
pub struct Request {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Parse and check the request URL (http and https only)
    pub fn parsed_url(&self) -> Result<url::Url, NetError> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| NetError::InvalidUrl(format!("{}: {}", self.url, e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(NetError::UnsupportedScheme(other.to_string())),
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(NetError::InvalidUrl(format!("{}: missing host", self.url)));
        }

        Ok(parsed)
    }
}

/// Load resources from network
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader {
    config: ClientConfig,
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch a URL with GET
    pub fn fetch(&self, url: &str) -> Result<Response, NetError> {
        self.request(Request::get(url))
    }

    /// Make a GET request on its own connection
    pub fn request(&self, req: Request) -> Result<Response, NetError> {
        let url = req.parsed_url()?;
        tracing::info!("HTTP GET {}", url);

        let headers: Vec<(String, String)> = req.headers.into_iter().collect();
        let client = HttpClient::with_config(self.config.clone())?;
        client.get(url.as_str(), &headers)
    }
}
