//! Asynchronous Postmaster client implementation.

use crate::models::{
    Address, AddressValidation, CreatePackageRequest, CreateShipmentRequest, ListParams,
    MonitorRequest, MonitorResponse, Package, Page, RateRequest, Shipment, TokenResponse,
    TransitTimeRequest,
};
use crate::transport::Transport;
use crate::Result;
use postmaster_core::config::DEFAULT_BASE_URL;
use postmaster_core::{Config, Decoded, Error, HttpTransport, Verb};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Environment variable holding the API base URL.
pub const ENV_API_HOST: &str = "PM_API_HOST";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "PM_API_KEY";

/// Asynchronous Postmaster client.
///
/// Each operation issues exactly one call through the [`Transport`].
#[derive(Debug, Clone)]
pub struct PostmasterClient<T = HttpTransport> {
    transport: T,
}

impl PostmasterClient<HttpTransport> {
    /// Construct a client over the HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    /// Construct a client from `PM_API_HOST` and `PM_API_KEY`.
    ///
    /// The production endpoint is used when `PM_API_HOST` is unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if `PM_API_HOST` is not
    /// a valid URL or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(ENV_API_HOST).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Config::new(base_url);
        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            config = config.with_api_key(api_key);
        }
        config.validate()?;
        Self::new(config)
    }

    /// Current transport configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        self.transport.config()
    }

    /// Mutable transport configuration; changes apply to the next call.
    pub fn config_mut(&mut self) -> &mut Config {
        self.transport.config_mut()
    }
}

impl<T: Transport> PostmasterClient<T> {
    /// Construct a client over any transport.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch a short-lived API token.
    pub async fn get_token(&self) -> Result<String> {
        let response: TokenResponse = self.call(Verb::Get, "/v1/token", None).await?;
        Ok(response.token)
    }

    /// Track any package by its carrier tracking number.
    pub async fn track_by_reference(&self, tracking_no: &str) -> Result<Value> {
        let query = json!({ "tracking": tracking_no });
        self.call(Verb::Get, "/v1/track", Some(query)).await
    }

    /// Validate an address and receive normalized candidates.
    pub async fn validate_address(&self, address: &Address) -> Result<AddressValidation> {
        self.call(Verb::Post, "/v1/validate", Some(to_data(address)?))
            .await
    }

    /// Estimate transit times between two postal codes.
    pub async fn get_transit_time(&self, request: &TransitTimeRequest) -> Result<Value> {
        self.call(Verb::Post, "/v1/times", Some(to_data(request)?))
            .await
    }

    /// Quote a rate; without a carrier the reply compares carriers under `best`.
    pub async fn get_rate(&self, request: &RateRequest) -> Result<Value> {
        self.call(Verb::Post, "/v1/rates", Some(to_data(request)?))
            .await
    }

    /// Create a shipment and buy its label.
    pub async fn create_shipment(&self, request: &CreateShipmentRequest) -> Result<Shipment> {
        info!(carrier = %request.carrier, service = %request.service, "Creating shipment");
        self.call(Verb::Post, "/v1/shipments", Some(to_data(request)?))
            .await
    }

    /// Fetch a shipment by id.
    pub async fn get_shipment(&self, id: i64) -> Result<Shipment> {
        let path = format!("/v1/shipments/{id}");
        self.call(Verb::Get, &path, None).await
    }

    /// List shipments, newest first.
    pub async fn list_shipments(&self, params: &ListParams) -> Result<Page<Shipment>> {
        self.call(Verb::Get, "/v1/shipments", Some(to_data(params)?))
            .await
    }

    /// Tracking history for a shipment.
    pub async fn track_shipment(&self, id: i64) -> Result<Value> {
        let path = format!("/v1/shipments/{id}/track");
        self.call(Verb::Get, &path, None).await
    }

    /// Void a shipment's label.
    ///
    /// A rejected void (HTTP 400) yields `false`; other failures propagate.
    pub async fn void_shipment(&self, id: i64) -> Result<bool> {
        let path = format!("/v1/shipments/{id}/void");
        info!(shipment_id = id, "Voiding shipment");

        match self.transport.send(Verb::Post, &path, None).await {
            Ok(decoded) => Ok(decoded.is_success()),
            Err(Error::InvalidData(details)) => {
                warn!(shipment_id = id, message = %details.message, "Shipment could not be voided");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Store a package (box) definition.
    pub async fn create_package(&self, request: &CreatePackageRequest) -> Result<Package> {
        self.call(Verb::Post, "/v1/packages", Some(to_data(request)?))
            .await
    }

    /// Fetch a package; `None` when it does not exist.
    pub async fn get_package(&self, id: i64) -> Result<Option<Package>> {
        let path = format!("/v1/packages/{id}");
        let decoded = self.transport.send(Verb::Get, &path, None).await?;

        if decoded.status == 404 {
            debug!(package_id = id, "Package not found");
            return Ok(None);
        }

        into_model(&path, decoded).map(Some)
    }

    /// List stored packages.
    pub async fn list_packages(&self, params: &ListParams) -> Result<Page<Package>> {
        self.call(Verb::Get, "/v1/packages", Some(to_data(params)?))
            .await
    }

    /// Delete a stored package; `false` when the API did not confirm it.
    pub async fn remove_package(&self, id: i64) -> Result<bool> {
        let path = format!("/v1/packages/{id}");
        let decoded = self.transport.send(Verb::Delete, &path, None).await?;
        Ok(decoded.is_success())
    }

    /// Monitor a package shipped outside Postmaster.
    pub async fn monitor_external(&self, request: &MonitorRequest) -> Result<MonitorResponse> {
        self.call(Verb::Post, "/v1/track", Some(to_data(request)?))
            .await
    }

    async fn call<R>(&self, verb: Verb, path: &str, data: Option<Value>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let decoded = self.transport.send(verb, path, data).await?;
        into_model(path, decoded)
    }
}

fn to_data<B>(body: &B) -> Result<Value>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(Error::from)
}

fn into_model<R>(path: &str, decoded: Decoded) -> Result<R>
where
    R: DeserializeOwned,
{
    if !decoded.is_success() {
        return Err(Error::Serialization(format!(
            "Unexpected {} response from `{path}`: {}",
            decoded.status,
            decoded.payload.message()
        )));
    }

    decoded.payload.deserialize().map_err(|err| {
        Error::Serialization(format!(
            "Failed to parse response from `{path}`: {}",
            err.message()
        ))
    })
}
