//! Postmaster resource models.
//!
//! Only the fields the client relies on are typed; everything else the API
//! returns is kept in the flattened `extra` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    /// Company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Contact person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// First street line.
    #[serde(default)]
    pub line1: String,
    /// Second street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    /// Third street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State or province code.
    #[serde(default)]
    pub state: String,
    /// Postal code.
    #[serde(default)]
    pub zip_code: String,
    /// ISO country code; the API assumes `US` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    /// Phone extension or international prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_ext: Option<String>,
    /// Whether the address is residential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residential: Option<bool>,
    /// Tax identifier for international shipments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// Result of an address validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddressValidation {
    /// Validation outcome reported by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Candidate addresses.
    #[serde(default)]
    pub addresses: Vec<Address>,
    /// Remaining response fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One item declared on a customs form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomsItem {
    /// Item description.
    pub description: String,
    /// Declared value, as a decimal string.
    pub value: String,
    /// Item weight.
    pub weight: f64,
    /// Unit for `weight`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_units: Option<String>,
    /// Number of items.
    pub quantity: u32,
    /// Harmonized tariff number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_tariff_number: Option<String>,
    /// ISO country of origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
}

/// Customs declaration attached to an international package.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customs {
    /// Declaration type, e.g. `Gift` or `Merchandise`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Declared items.
    #[serde(default)]
    pub contents: Vec<CustomsItem>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Dimensions and weight of a package within a shipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShipmentPackage {
    /// Package weight.
    pub weight: f64,
    /// Length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Unit for `weight` (`LB` unless stated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_units: Option<String>,
    /// Unit for the dimensions (`IN` unless stated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_units: Option<String>,
    /// Customs declaration for international shipments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customs: Option<Customs>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for creating a shipment.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CreateShipmentRequest {
    /// Recipient.
    pub to: Address,
    /// Sender; the account default is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Packages in the shipment.
    pub packages: Vec<ShipmentPackage>,
    /// Carrier code, e.g. `ups`.
    pub carrier: String,
    /// Carrier service, e.g. `GROUND`.
    pub service: String,
    /// Free-form reference printed on the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A shipment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipment {
    /// Shipment identifier.
    pub id: i64,
    /// Lifecycle status, e.g. `Processing` or `Voided`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Packages.
    #[serde(default)]
    pub packages: Vec<ShipmentPackage>,
    /// Carrier code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Carrier service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Remaining fields (tracking numbers, labels, cost, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for a stored package (box) definition.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CreatePackageRequest {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Length.
    pub length: f64,
    /// Weight.
    pub weight: f64,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit for `weight`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_units: Option<String>,
    /// Unit for the dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_units: Option<String>,
}

/// A stored package (box) definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    /// Package identifier.
    pub id: i64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Length.
    pub length: f64,
    /// Weight.
    pub weight: f64,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit for `weight`.
    pub weight_units: String,
    /// Unit for the dimensions.
    pub dimension_units: String,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Rate quote request.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RateRequest {
    /// Origin postal code.
    pub from_zip: String,
    /// Destination postal code.
    pub to_zip: String,
    /// Total weight.
    pub weight: f64,
    /// Restrict the quote to one carrier; all carriers are compared otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Restrict the quote to one service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Origin country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_country: Option<String>,
    /// Destination country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_country: Option<String>,
}

impl RateRequest {
    /// Domestic quote between two postal codes.
    #[must_use]
    pub fn new(from_zip: impl Into<String>, to_zip: impl Into<String>, weight: f64) -> Self {
        Self {
            from_zip: from_zip.into(),
            to_zip: to_zip.into(),
            weight,
            ..Self::default()
        }
    }

    /// Restrict to one carrier.
    #[must_use]
    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    /// Set origin and destination countries.
    #[must_use]
    pub fn with_countries(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_country = Some(from.into());
        self.to_country = Some(to.into());
        self
    }
}

/// Transit time request.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TransitTimeRequest {
    /// Origin postal code.
    pub from_zip: String,
    /// Destination postal code.
    pub to_zip: String,
    /// Total weight.
    pub weight: f64,
    /// Carrier code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Origin country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_country: Option<String>,
    /// Destination country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_country: Option<String>,
}

/// Request to monitor a package shipped outside Postmaster.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MonitorRequest {
    /// Carrier tracking number.
    pub tracking_no: String,
    /// Events that should trigger a notification.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    /// Webhook URL notified on each event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Monitoring registration as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonitorResponse {
    /// Tracking number being monitored.
    #[serde(default)]
    pub tracking: String,
    /// Events being monitored.
    #[serde(default)]
    pub events: Vec<String>,
    /// Whether the package has reached a final state.
    #[serde(default)]
    pub ended: bool,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cursor-based listing parameters.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ListParams {
    /// Cursor returned by a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListParams {
    /// Limit the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue from a cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Cursor for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Cursor for the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_shipment_request_skips_missing_sender() {
        let request = CreateShipmentRequest {
            to: Address {
                line1: "720 Brazos St.".into(),
                city: "Austin".into(),
                state: "TX".into(),
                zip_code: "78701".into(),
                ..Address::default()
            },
            packages: vec![ShipmentPackage {
                weight: 1.5,
                ..ShipmentPackage::default()
            }],
            carrier: "ups".into(),
            service: "GROUND".into(),
            ..CreateShipmentRequest::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("from").is_none());
        assert_eq!(value["packages"][0], json!({"weight": 1.5}));
        assert_eq!(value["to"]["zip_code"], "78701");
    }

    #[test]
    fn customs_kind_uses_type_key() {
        let customs: Customs = serde_json::from_value(json!({
            "type": "Gift",
            "contents": [{
                "description": "description",
                "value": "15",
                "weight": 2.5,
                "quantity": 1
            }]
        }))
        .unwrap();
        assert_eq!(customs.kind, "Gift");
        assert_eq!(customs.contents[0].value, "15");
        assert_eq!(serde_json::to_value(&customs).unwrap()["type"], "Gift");
    }

    #[test]
    fn list_params_serialize_only_present_fields() {
        let params = ListParams::default().with_limit(6);
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"limit": 6}));
    }

    #[test]
    fn rate_request_builder() {
        let request = RateRequest::new("78704", "683300", 5.0)
            .with_carrier("ups")
            .with_countries("US", "KR");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["carrier"], "ups");
        assert_eq!(value["to_country"], "KR");
        assert!(value.get("service").is_none());
    }

    #[test]
    fn page_defaults_missing_cursors() {
        let page: Page<Package> = serde_json::from_value(json!({"results": []})).unwrap();
        assert!(page.results.is_empty());
        assert!(page.cursor.is_none());
        assert!(page.previous_cursor.is_none());
    }
}
