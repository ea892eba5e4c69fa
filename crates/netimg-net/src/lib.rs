//! netimg Networking
//!
//! One-shot HTTP GET for remote image resources.

pub mod client;
pub mod loader;

pub use client::{ClientConfig, HttpClient, HttpClientBuilder};
pub use loader::{Request, ResourceLoader};
pub use url::Url;

/// HTTP Response
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Check if response is OK (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Content-Type header, if any
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Turn a non-2xx status into an error
    pub fn error_for_status(self) -> Result<Self, NetError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(NetError::HttpError { status: self.status })
        }
    }
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Transport failure; the reqwest error keeps its source chain
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),
}
