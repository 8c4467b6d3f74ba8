//! Seam between resource operations and the HTTP transport.

use crate::Result;
use async_trait::async_trait;
use postmaster_core::{Decoded, HttpTransport, Verb};
use serde_json::Value;

/// Something that can perform one Postmaster API exchange.
///
/// [`HttpTransport`] is the production implementation; tests substitute a
/// mock to drive resource logic without a server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `data` to `path` with the given verb and return the decoded reply.
    async fn send(&self, verb: Verb, path: &str, data: Option<Value>) -> Result<Decoded>;
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, verb: Verb, path: &str, data: Option<Value>) -> Result<Decoded> {
        self.request(verb, path, data.as_ref(), None).await
    }
}
