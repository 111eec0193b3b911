//! reqwest implementation of [`DashboardApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::DashboardApi;
use super::types::{LocateRequest, RecipeRequest};
use crate::config::BackendConfig;
use crate::error::{DashError, Result};
use crate::model::{CompanyLocation, Hello, LocateReply, Recipe, SupplyChainData};

pub const RECIPE_PATH: &str = "/api/generate-recipe";
pub const LOCATE_PATH: &str = "/api/get-coords";
pub const SUPPLY_CHAIN_PATH: &str = "/api/supply-chain";
pub const HELLO_PATH: &str = "/api/hello";

/// HTTP client for the dashboard backend.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client from the backend section of the config.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("hackdash/", env!("CARGO_PKG_VERSION")));
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| DashError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing with a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&BackendConfig {
            base_url: base_url.into(),
            timeout_ms: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of the supply chain call. The product travels as a query parameter, not a body.
    pub fn supply_chain_url(&self, product_name: &str) -> String {
        format!(
            "{}?product_name={}",
            self.url(SUPPLY_CHAIN_PATH),
            urlencoding::encode(product_name)
        )
    }
}

/// Fail on non-2xx without reading the body.
fn check_status(response: &Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(DashError::Status { status })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| DashError::Decode(e.to_string()))
}

#[async_trait]
impl DashboardApi for HttpBackend {
    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<Recipe> {
        log::debug!("POST {} ingredients={:?}", RECIPE_PATH, request.ingredients);
        let response = self.client.post(self.url(RECIPE_PATH)).json(request).send().await?;

        check_status(&response)?;
        decode(response).await
    }

    async fn locate_company(&self, request: &LocateRequest) -> Result<CompanyLocation> {
        log::debug!("POST {} company_name={:?}", LOCATE_PATH, request.company_name);
        let response = self.client.post(self.url(LOCATE_PATH)).json(request).send().await?;

        // The body decides the outcome; the status only matters when the body is unreadable.
        let status = response.status();
        let body: Value = match decode(response).await {
            Ok(body) => body,
            Err(DashError::Decode(_)) if !status.is_success() => return Err(DashError::Status { status }),
            Err(e) => return Err(e),
        };

        LocateReply::from_value(body)?.into_result()
    }

    async fn supply_chain(&self, product_name: &str) -> Result<SupplyChainData> {
        let url = self.supply_chain_url(product_name);
        log::debug!("POST {}", url);
        let response = self.client.post(url).send().await?;

        check_status(&response)?;
        decode(response).await
    }

    async fn hello(&self) -> Result<Hello> {
        log::debug!("GET {}", HELLO_PATH);
        let response = self.client.get(self.url(HELLO_PATH)).send().await?;

        check_status(&response)?;
        decode(response).await
    }
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend").field("base_url", &self.base_url).finish()
    }
}
