//! Backend client trait and a scripted in-memory implementation.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::types::{LocateRequest, RecipeRequest};
use crate::error::{DashError, Result};
use crate::model::{CompanyLocation, Hello, Recipe, SupplyChainData};

/// One method per backend endpoint; each call is one independent round trip.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<Recipe>;

    /// A body carrying `error` comes back as `DashError::Backend`.
    async fn locate_company(&self, request: &LocateRequest) -> Result<CompanyLocation>;

    async fn supply_chain(&self, product_name: &str) -> Result<SupplyChainData>;

    async fn hello(&self) -> Result<Hello>;
}

/// A call observed by [`MockDashboardApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Recipe(RecipeRequest),
    Locate(LocateRequest),
    SupplyChain(String),
    Hello,
}

struct Scripted<T> {
    delay: Duration,
    outcome: std::result::Result<T, String>,
}

/// In-memory `DashboardApi` that replays queued responses, optionally after a delay.
///
/// Every call is recorded before the delay starts. An empty queue answers with
/// `DashError::Backend`.
#[derive(Default)]
pub struct MockDashboardApi {
    recipes: Mutex<VecDeque<Scripted<Recipe>>>,
    locations: Mutex<VecDeque<Scripted<CompanyLocation>>>,
    chains: Mutex<VecDeque<Scripted<SupplyChainData>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockDashboardApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_recipe(&self, outcome: std::result::Result<Recipe, String>, delay: Duration) {
        lock(&self.recipes).push_back(Scripted { delay, outcome });
    }

    pub fn push_location(&self, outcome: std::result::Result<CompanyLocation, String>, delay: Duration) {
        lock(&self.locations).push_back(Scripted { delay, outcome });
    }

    pub fn push_supply_chain(&self, outcome: std::result::Result<SupplyChainData, String>, delay: Duration) {
        lock(&self.chains).push_back(Scripted { delay, outcome });
    }

    /// All calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: ApiCall) {
        lock(&self.calls).push(call);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn replay<T>(queue: &Mutex<VecDeque<Scripted<T>>>, endpoint: &str) -> Result<T> {
    let next = lock(queue).pop_front();
    let Some(scripted) = next else {
        return Err(DashError::Backend(format!("no scripted response for {}", endpoint)));
    };
    if !scripted.delay.is_zero() {
        tokio::time::sleep(scripted.delay).await;
    }
    scripted.outcome.map_err(DashError::Backend)
}

#[async_trait]
impl DashboardApi for MockDashboardApi {
    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<Recipe> {
        self.record(ApiCall::Recipe(request.clone()));
        replay(&self.recipes, "generate-recipe").await
    }

    async fn locate_company(&self, request: &LocateRequest) -> Result<CompanyLocation> {
        self.record(ApiCall::Locate(request.clone()));
        replay(&self.locations, "get-coords").await
    }

    async fn supply_chain(&self, product_name: &str) -> Result<SupplyChainData> {
        self.record(ApiCall::SupplyChain(product_name.to_string()));
        replay(&self.chains, "supply-chain").await
    }

    async fn hello(&self) -> Result<Hello> {
        self.record(ApiCall::Hello);
        Ok(Hello {
            message: "Hello from the mock backend".to_string(),
        })
    }
}
