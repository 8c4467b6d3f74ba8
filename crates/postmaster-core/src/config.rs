//! Configuration for the Postmaster transport.
//!
//! A [`Config`] is owned by each [`HttpTransport`](crate::client::HttpTransport)
//! and read on every call. Nothing is validated on the call path; use
//! [`Config::validate`] when loading values from an untrusted source.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.postmaster.io";

/// Settings consumed by the transport on every request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct Config {
    /// Base URL; request paths are appended verbatim
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as the basic-auth user name
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Extra headers merged into every outgoing request.
    ///
    /// Header names are case-insensitive on the wire. When two keys differ
    /// only in case they are applied in byte order, so the lowercase spelling
    /// is applied last and its value is sent.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: String::new(),
            headers: BTreeMap::new(),
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Add a single extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge a set of extra headers, replacing values for existing names.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Whether an API key has been configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Build the full URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check that the base URL parses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the base URL is not a valid URL.
    pub fn validate(&self) -> Result<(), Error> {
        Validate::validate(self)
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
