//! Map search deep links built from returned data.

use crate::config::MapsConfig;
use crate::model::{CompanyLocation, Coordinates};

/// Builds map search URLs against a configured search endpoint.
#[derive(Debug, Clone)]
pub struct MapLinks {
    search_url: String,
}

impl Default for MapLinks {
    fn default() -> Self {
        Self::new(&MapsConfig::default())
    }
}

impl MapLinks {
    pub fn new(config: &MapsConfig) -> Self {
        Self {
            search_url: config.search_url.clone(),
        }
    }

    /// Search by name and address; coordinates are not used.
    pub fn for_location(&self, location: &CompanyLocation) -> String {
        let query = format!("{} {}", location.name, location.address);
        self.with_query(&urlencoding::encode(&query))
    }

    /// Search by raw `lat,lng`.
    pub fn for_coordinates(&self, coordinates: Coordinates) -> String {
        self.with_query(&coordinates.to_string())
    }

    fn with_query(&self, query: &str) -> String {
        let separator = if self.search_url.contains('?') { '&' } else { '?' };
        format!("{}{}query={}", self.search_url, separator, query)
    }
}
