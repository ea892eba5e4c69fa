//! HTTP Client
//!
//! Blocking GET client on top of reqwest. Every client owns its own
//! connection; nothing is pooled across clients.

use std::time::Duration;

use crate::{NetError, Response};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout (whole exchange, body included)
    pub request_timeout: Duration,
    /// Max redirects to follow (0 = disable)
    pub max_redirects: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("netimg/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            max_redirects: 10,
        }
    }
}

/// HTTP client builder
pub struct HttpClientBuilder {
    config: ClientConfig,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.config.user_agent = ua.to_string();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn max_redirects(mut self, max: u32) -> Self {
        self.config.max_redirects = max;
        self
    }

    pub fn config(self) -> ClientConfig {
        self.config
    }

    pub fn build(self) -> Result<HttpClient, NetError> {
        HttpClient::with_config(self.config)
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client
pub struct HttpClient {
    config: ClientConfig,
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create with custom config
    pub fn with_config(config: ClientConfig) -> Result<Self, NetError> {
        let redirect = if config.max_redirects == 0 {
            reqwest::redirect::Policy::none()
        } else {
            reqwest::redirect::Policy::limited(config.max_redirects as usize)
        };

        let inner = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(redirect)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { config, inner })
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Make a GET request and read the whole body
    pub fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Response, NetError> {
        let mut req = self.inner.get(url);

        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = resp.bytes()?.to_vec();

        tracing::debug!("HTTP {} {} ({} bytes)", status, url, body.len());

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.user_agent.starts_with("netimg/"));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn test_client_builder() {
        let client = HttpClient::builder()
            .user_agent("TestAgent/1.0")
            .max_redirects(5)
            .build()
            .unwrap();

        assert_eq!(client.config().user_agent, "TestAgent/1.0");
        assert_eq!(client.config().max_redirects, 5);
    }

    #[test]
    fn test_builder_without_redirects() {
        let config = HttpClientBuilder::new()
            .max_redirects(0)
            .request_timeout(Duration::from_secs(2))
            .config();

        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert!(HttpClient::with_config(config).is_ok());
    }
}
