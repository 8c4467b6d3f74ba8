//! HTTP transport for the Postmaster API.
//!
//! Every resource operation goes through [`HttpTransport`]: it builds the
//! request from the owned [`Config`], performs exactly one HTTP exchange and
//! classifies the response with [`decode_response`]. There are no retries.

use crate::config::Config;
use crate::error::{Error, ErrorDetails, API_ERROR_MESSAGE};
use crate::query::QueryParams;
use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout applied to every request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("postmaster-rust/", env!("CARGO_PKG_VERSION"));
const APPLICATION_JSON: &str = "application/json";

/// The four verbs the API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// GET; `data` is sent as query parameters.
    Get,
    /// POST with an optional JSON body.
    Post,
    /// PUT with an optional JSON body.
    Put,
    /// DELETE with an optional JSON body.
    Delete,
}

impl Verb {
    /// The matching reqwest method.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }

    /// Whether `data` travels in the request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// A decoded response body: parsed JSON, or the raw text when parsing failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON (or the `message` field of an error body).
    Json(Value),
    /// Body that was not valid JSON.
    Text(String),
}

impl Payload {
    /// Borrow the JSON value, if the body parsed.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Borrow the raw text, if the body did not parse.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Convert into a JSON value; raw text becomes a JSON string.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Deserialize the payload into a typed model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the payload does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.into_value()).map_err(Error::from)
    }

    /// Render the payload as an error message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Json(Value::String(text)) | Self::Text(text) => text.clone(),
            Self::Json(value) => value.to_string(),
        }
    }
}

/// A successful exchange: the HTTP status and the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body.
    pub payload: Payload,
}

impl Decoded {
    /// Whether the status was 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }
}

/// Classify a status code and body into a decoded payload or a typed error.
///
/// Statuses of 500 and above are never parsed. For other non-2xx statuses the
/// `message` field of a JSON body is preferred, then the parsed JSON, then the
/// raw text. 400, 401 and 403 become errors; anything else is returned.
///
/// # Errors
///
/// Returns [`Error::Api`] for 5xx, [`Error::InvalidData`] for 400,
/// [`Error::Authentication`] for 401 and [`Error::Permission`] for 403.
pub fn decode_response(status: u16, body: &str) -> Result<Decoded> {
    if status >= 500 {
        return Err(Error::Api(
            ErrorDetails::new(API_ERROR_MESSAGE)
                .with_http_status(status)
                .with_http_body(body),
        ));
    }

    let payload = match serde_json::from_str::<Value>(body) {
        Ok(value) if status > 299 => Payload::Json(extract_message(value)),
        Ok(value) => Payload::Json(value),
        Err(_) => Payload::Text(body.to_string()),
    };

    let details = || {
        ErrorDetails::new(payload.message())
            .with_http_status(status)
            .with_http_body(body)
            .with_json_body(body)
    };

    match status {
        400 => Err(Error::InvalidData(details())),
        401 => Err(Error::Authentication(details())),
        403 => Err(Error::Permission(details())),
        _ => {
            if status > 299 {
                warn!(status, "unclassified error status returned as payload");
            }
            Ok(Decoded { status, payload })
        }
    }
}

fn extract_message(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("message") => {
            map.remove("message").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Stateless HTTP transport bound to one [`Config`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    config: Config,
}

impl HttpTransport {
    /// Build a transport owning the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub(crate) fn with_timeout(config: Config, timeout: Duration) -> Result<Self> {
        let http = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, config })
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration; changes apply to the next call.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// GET `path`, sending `data` as query parameters.
    pub async fn get(
        &self,
        path: &str,
        data: Option<&Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<Payload> {
        self.request(Verb::Get, path, data, headers)
            .await
            .map(|decoded| decoded.payload)
    }

    /// POST `data` as JSON to `path`.
    pub async fn post(
        &self,
        path: &str,
        data: Option<&Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<Payload> {
        self.request(Verb::Post, path, data, headers)
            .await
            .map(|decoded| decoded.payload)
    }

    /// PUT `data` as JSON to `path`.
    pub async fn put(
        &self,
        path: &str,
        data: Option<&Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<Payload> {
        self.request(Verb::Put, path, data, headers)
            .await
            .map(|decoded| decoded.payload)
    }

    /// DELETE `path`, with `data` as an optional JSON body.
    pub async fn delete(
        &self,
        path: &str,
        data: Option<&Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<Payload> {
        self.request(Verb::Delete, path, data, headers)
            .await
            .map(|decoded| decoded.payload)
    }

    /// Perform one exchange and keep the status alongside the payload.
    ///
    /// # Errors
    ///
    /// Returns the classified error from [`decode_response`], [`Error::Api`]
    /// when the server cannot be reached or the request times out, and
    /// [`Error::Network`] for any other transport failure.
    pub async fn request(
        &self,
        verb: Verb,
        path: &str,
        data: Option<&Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<Decoded> {
        let url = self.config.url_for(path);
        let header_map = self.build_headers(verb, headers)?;
        let send_basic_auth =
            self.config.has_api_key() && !header_map.contains_key(AUTHORIZATION);

        let mut request = self.http.request(verb.method(), url.as_str()).headers(header_map);

        if send_basic_auth {
            request = request.basic_auth(&self.config.api_key, None::<&str>);
        }

        match data {
            Some(Value::Null) | None => {}
            Some(data) if verb.has_body() => {
                request = request.body(serde_json::to_vec(data)?);
            }
            Some(data) => {
                let params = QueryParams::from_value(data)?;
                request = request.query(params.pairs());
            }
        }

        debug!(%verb, url = %url, "Sending Postmaster request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%verb, url = %url, error = %err, "Postmaster request failed");
                return Err(Error::from(err));
            }
        };

        let status = response.status().as_u16();
        // A timeout while streaming the body is the same failure as one before
        // the status line arrived.
        let body = response.text().await.map_err(|err| {
            if err.is_timeout() || err.is_connect() {
                warn!(%verb, url = %url, error = %err, "Postmaster response body timed out");
                Error::from(err)
            } else {
                Error::Network(
                    ErrorDetails::new(format!("Failed to read response body: {err}"))
                        .with_http_status(status),
                )
            }
        })?;

        debug!(%verb, url = %url, status, "Received Postmaster response");
        decode_response(status, &body)
    }

    fn build_headers(
        &self,
        verb: Verb,
        extra: Option<&BTreeMap<String, String>>,
    ) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        // Call headers override configured ones; the negotiation header always wins.
        // BTreeMap order makes case-colliding names resolve the same way every call.
        for (name, value) in self.config.headers.iter().chain(extra.into_iter().flatten()) {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| Error::Config(format!("Invalid header name `{name}`: {err}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|err| Error::Config(format!("Invalid value for header `{name}`: {err}")))?;
            headers.insert(header_name, header_value);
        }

        let forced = if verb.has_body() { CONTENT_TYPE } else { ACCEPT };
        headers.insert(forced, HeaderValue::from_static(APPLICATION_JSON));

        Ok(headers)
    }
}
