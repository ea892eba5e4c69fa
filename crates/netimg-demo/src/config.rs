//! Demo configuration
//!
//! URLs come from the command line; client settings from the environment.

use std::time::Duration;

use anyhow::{Context, Result};
use netimg_net::{ClientConfig, HttpClient};

/// Sample image shown by default
pub const SAMPLE_IMAGE_URL: &str = "https://picsum.photos/400/300";
/// Host that never resolves, to show the error state
pub const ERROR_IMAGE_URL: &str = "https://invalid-url-for-testing.com/image.jpg";

pub const USER_AGENT_VAR: &str = "NETIMG_USER_AGENT";
pub const TIMEOUT_VAR: &str = "NETIMG_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub urls: Vec<String>,
    pub client: ClientConfig,
}

impl DemoConfig {
    /// Build from process arguments (without the program name) and an
    /// environment lookup
    pub fn from_parts<I, E>(args: I, env: E) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut urls: Vec<String> = args.into_iter().collect();
        if urls.is_empty() {
            urls = vec![SAMPLE_IMAGE_URL.to_string(), ERROR_IMAGE_URL.to_string()];
        }

        let mut builder = HttpClient::builder();
        if let Some(ua) = env(USER_AGENT_VAR) {
            builder = builder.user_agent(&ua);
        }
        if let Some(raw) = env(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().with_context(|| {
                format!("{} must be a number of seconds, got {:?}", TIMEOUT_VAR, raw)
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            urls,
            client: builder.config(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_parts(std::env::args().skip(1), |key| std::env::var(key).ok())
    }
}
