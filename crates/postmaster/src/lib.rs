//! Postmaster shipping API client.
//!
//! Typed operations for address validation, rates, transit times, shipments,
//! stored packages and tracking. All network I/O goes through the
//! [`Transport`] seam, implemented by [`postmaster_core::HttpTransport`].

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod transport;

pub use client::{PostmasterClient, ENV_API_HOST, ENV_API_KEY};
pub use models::{
    Address, AddressValidation, CreatePackageRequest, CreateShipmentRequest, Customs, CustomsItem,
    ListParams, MonitorRequest, MonitorResponse, Package, Page, RateRequest, Shipment,
    ShipmentPackage, TransitTimeRequest,
};
pub use postmaster_core::{Config, Error, ErrorDetails, Payload};
pub use transport::Transport;

/// Convenient result alias that reuses the core error type.
pub type Result<T> = postmaster_core::Result<T>;
