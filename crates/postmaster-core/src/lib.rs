//! # postmaster-core
//!
//! Transport layer for the Postmaster shipping API.
//!
//! Every resource call flows through one [`HttpTransport`]: it builds the
//! request from an owned [`Config`], performs a single JSON exchange and maps
//! the HTTP status onto the [`Error`] taxonomy.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and diagnostic details
//! - [`config`] - Base URL, API key and extra headers
//! - [`client`] - HTTP transport and response classification
//! - [`query`] - Query-string encoding for GET requests

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use client::{decode_response, Decoded, HttpTransport, Payload, Verb, REQUEST_TIMEOUT_SECS};
pub use config::Config;
pub use error::{Error, ErrorDetails, Result};
