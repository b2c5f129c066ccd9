// ABOUTME: Configuration options for URL loading, including LoadOptions and LoaderBuilder.
// ABOUTME: LoaderBuilder provides a fluent API for constructing Loader instances.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::LoadError;
use crate::loader::Loader;

/// Default timeout for a load operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a [`Loader`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub timeout: Duration,
    pub user_agent: String,
    /// When true, the response is kept as raw bytes only and no decoded
    /// string is produced.
    pub expect_binary: bool,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: "xmlkit-loader/0.1".to_string(),
            expect_binary: false,
            headers: HashMap::new(),
            http_client: None,
        }
    }
}

/// Builder for constructing [`Loader`] instances with custom configuration.
#[derive(Debug, Clone)]
pub struct LoaderBuilder {
    url: String,
    opts: LoadOptions,
}

impl LoaderBuilder {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            opts: LoadOptions::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Expect binary response data; skips string decoding.
    pub fn expect_binary(mut self, expect: bool) -> Self {
        self.opts.expect_binary = expect;
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Loader, validating the URL.
    pub fn build(self) -> Result<Loader, LoadError> {
        Loader::from_options(self.url, self.opts)
    }
}
