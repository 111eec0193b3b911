//! Request bodies sent to the dashboard backend.

use serde::{Deserialize, Serialize};

use crate::config::{LocatorConfig, RecipeConfig};

/// Body of `POST /api/generate-recipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    pub dietary_restrictions: String,
}

impl RecipeRequest {
    pub fn from_config(config: &RecipeConfig) -> Self {
        Self {
            ingredients: config.ingredients.clone(),
            dietary_restrictions: config.dietary_restrictions.clone(),
        }
    }
}

impl Default for RecipeRequest {
    fn default() -> Self {
        Self::from_config(&RecipeConfig::default())
    }
}

/// Body of `POST /api/get-coords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateRequest {
    pub company_name: String,
    pub city: String,
}

impl LocateRequest {
    pub fn new(company_name: impl Into<String>, config: &LocatorConfig) -> Self {
        Self {
            company_name: company_name.into(),
            city: config.city.clone(),
        }
    }
}
