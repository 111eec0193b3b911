//! Payload types returned by the dashboard backend.
//!
//! Every response is decoded into one of these records at the HTTP boundary.
//! Records are never mutated after decoding; a new response replaces the old
//! record wholesale.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{DashError, Result};

/// One ingredient line of a generated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

/// A generated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub difficulty: String,
    pub prep_time_minutes: i64,
    pub calories: i64,
    pub ingredients: Vec<Ingredient>,
    /// Steps in the order they are performed
    pub instructions: Vec<String>,
}

/// A latitude/longitude pair. No range checks are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A geocoded company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyLocation {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
}

/// Decoded body of a locate call.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateReply {
    Found(CompanyLocation),
    /// The body carried a top-level `error` key, whatever the HTTP status
    Failed { error: String },
}

impl LocateReply {
    /// Route a locate body on the presence of a non-null `error` key.
    pub fn from_value(body: Value) -> Result<Self> {
        match body.get("error") {
            Some(Value::Null) | None => {
                let location: CompanyLocation =
                    serde_json::from_value(body).map_err(|e| DashError::Decode(e.to_string()))?;
                Ok(LocateReply::Found(location))
            }
            Some(Value::String(message)) => Ok(LocateReply::Failed {
                error: message.clone(),
            }),
            Some(other) => Ok(LocateReply::Failed {
                error: other.to_string(),
            }),
        }
    }

    /// Convert into a plain result, turning a backend error into `DashError::Backend`.
    pub fn into_result(self) -> Result<CompanyLocation> {
        match self {
            LocateReply::Found(location) => Ok(location),
            LocateReply::Failed { error } => Err(DashError::Backend(error)),
        }
    }
}

/// Whether the geocoder could place a supply chain participant.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Placed at an address; coordinates are optional and only gate the map link
    Found {
        address: String,
        coordinates: Option<Coordinates>,
    },
    NotFound,
}

/// One participant in a product's supply chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireNode", into = "WireNode")]
pub struct SupplyChainNode {
    pub company_name: String,
    pub role: String,
    pub location_query: String,
    pub resolution: Resolution,
}

impl SupplyChainNode {
    pub fn is_found(&self) -> bool {
        matches!(self.resolution, Resolution::Found { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Found { address, .. } => Some(address),
            Resolution::NotFound => None,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match &self.resolution {
            Resolution::Found { coordinates, .. } => *coordinates,
            Resolution::NotFound => None,
        }
    }
}

/// Node as it appears on the wire: a `found` flag plus optional location fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireNode {
    company_name: String,
    role: String,
    location_query: String,
    found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
}

impl From<WireNode> for SupplyChainNode {
    fn from(wire: WireNode) -> Self {
        // A bad node degrades on its own; siblings are unaffected.
        let resolution = match (wire.found, wire.address) {
            (true, Some(address)) => {
                if wire.coordinates.is_none() {
                    log::warn!("node '{}' is found but has no coordinates", wire.company_name);
                }
                Resolution::Found {
                    address,
                    coordinates: wire.coordinates,
                }
            }
            (true, None) => {
                log::warn!("node '{}' is found but has no address, showing as not found", wire.company_name);
                Resolution::NotFound
            }
            (false, _) => Resolution::NotFound,
        };

        SupplyChainNode {
            company_name: wire.company_name,
            role: wire.role,
            location_query: wire.location_query,
            resolution,
        }
    }
}

impl From<SupplyChainNode> for WireNode {
    fn from(node: SupplyChainNode) -> Self {
        let (found, address, coordinates) = match node.resolution {
            Resolution::Found { address, coordinates } => (true, Some(address), coordinates),
            Resolution::NotFound => (false, None, None),
        };
        WireNode {
            company_name: node.company_name,
            role: node.role,
            location_query: node.location_query,
            found,
            address,
            coordinates,
        }
    }
}

/// Supply chain of a product, in the backend's ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainData {
    pub product: String,
    pub supply_chain: Vec<SupplyChainNode>,
}

impl SupplyChainData {
    pub fn found_count(&self) -> usize {
        self.supply_chain.iter().filter(|n| n.is_found()).count()
    }
}

/// Body of the backend's hello endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hello {
    pub message: String,
}
