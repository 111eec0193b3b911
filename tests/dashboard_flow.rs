//! Dashboard flow integration tests
//!
//! Drives the dashboard state machine, the dispatcher and the views together:
//! overlapping requests for one tool, and a supply chain lookup rendered
//! end to end from an HTTP response.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hackdash::api::{DashboardApi, HttpBackend, LocateRequest, RecipeRequest};
use hackdash::dashboard::{Applied, Dashboard, ToolEvent, ToolId};
use hackdash::dispatch::{Dispatcher, execute};
use hackdash::error::{DashError, Result};
use hackdash::model::{CompanyLocation, Coordinates, Hello, Recipe, SupplyChainData};
use hackdash::tui::{App, TextInput, colors, render};
use mockito::{Matcher, Server};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Answers locate calls per company name, each after its own delay.
struct KeyedLocator {
    answers: HashMap<String, (Duration, CompanyLocation)>,
}

impl KeyedLocator {
    fn new(answers: &[(&str, u64)]) -> Self {
        let answers = answers
            .iter()
            .map(|(name, delay_ms)| {
                let location = CompanyLocation {
                    name: name.to_string(),
                    address: format!("{} HQ", name),
                    coordinates: Coordinates { lat: 10.0, lng: 20.0 },
                };
                (name.to_string(), (Duration::from_millis(*delay_ms), location))
            })
            .collect();
        Self { answers }
    }
}

#[async_trait]
impl DashboardApi for KeyedLocator {
    async fn generate_recipe(&self, _request: &RecipeRequest) -> Result<Recipe> {
        Err(DashError::Backend("not scripted".to_string()))
    }

    async fn locate_company(&self, request: &LocateRequest) -> Result<CompanyLocation> {
        let Some((delay, location)) = self.answers.get(&request.company_name) else {
            return Err(DashError::Backend("Location not found".to_string()));
        };
        tokio::time::sleep(*delay).await;
        Ok(location.clone())
    }

    async fn supply_chain(&self, _product_name: &str) -> Result<SupplyChainData> {
        Err(DashError::Backend("not scripted".to_string()))
    }

    async fn hello(&self) -> Result<Hello> {
        Ok(Hello {
            message: "hi".to_string(),
        })
    }
}

/// Issue two locate requests back to back, run both to completion without
/// cancellation, and fold the results in arrival order.
async fn race_without_abort(first_delay_ms: u64, second_delay_ms: u64) -> (Dashboard, Vec<Applied>) {
    let api = Arc::new(KeyedLocator::new(&[
        ("Old Corp", first_delay_ms),
        ("New Corp", second_delay_ms),
    ]));
    let mut dashboard = Dashboard::default();
    let (tx, mut rx) = mpsc::channel(4);

    for name in ["Old Corp", "New Corp"] {
        dashboard.company_query = TextInput::with_content(name);
        let ticket = dashboard.supersede(ToolId::Locator).unwrap();
        let api = api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = execute(api.as_ref(), ticket.request).await;
            let _ = tx
                .send(ToolEvent {
                    tool: ToolId::Locator,
                    generation: ticket.generation,
                    outcome,
                })
                .await;
        });
    }
    drop(tx);

    let mut applied = Vec::new();
    while let Some(event) = rx.recv().await {
        applied.push(dashboard.apply(event));
    }
    (dashboard, applied)
}

#[tokio::test]
async fn test_latest_locate_wins_when_older_finishes_last() {
    let (dashboard, applied) = race_without_abort(150, 10).await;

    assert_eq!(applied, vec![Applied::Succeeded, Applied::Superseded]);
    assert_eq!(dashboard.locator.result().unwrap().name, "New Corp");
    assert!(!dashboard.is_loading(ToolId::Locator));
}

#[tokio::test]
async fn test_latest_locate_wins_when_older_finishes_first() {
    let (dashboard, applied) = race_without_abort(10, 150).await;

    assert_eq!(applied, vec![Applied::Superseded, Applied::Succeeded]);
    assert_eq!(dashboard.locator.result().unwrap().name, "New Corp");
}

#[tokio::test]
async fn test_dispatcher_aborts_superseded_locate() {
    let api = Arc::new(KeyedLocator::new(&[("Old Corp", 200), ("New Corp", 10)]));
    let (mut dispatcher, mut rx) = Dispatcher::new(api);
    let mut dashboard = Dashboard::default();

    dashboard.company_query = TextInput::with_content("Old Corp");
    dispatcher.dispatch(dashboard.trigger(ToolId::Locator).unwrap());

    // The control is disabled while loading; only a supersede re-issues
    dashboard.company_query = TextInput::with_content("New Corp");
    assert!(dashboard.trigger(ToolId::Locator).is_none());
    dispatcher.dispatch(dashboard.supersede(ToolId::Locator).unwrap());

    let done = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    dispatcher.complete(&done);
    assert_eq!(dashboard.apply(done), Applied::Succeeded);
    assert_eq!(dashboard.locator.result().unwrap().name, "New Corp");

    // The aborted request never reports back
    assert!(timeout(Duration::from_millis(400), rx.recv()).await.is_err());
    assert!(!dispatcher.is_running(ToolId::Locator));
}

#[tokio::test]
async fn test_tools_do_not_block_each_other() {
    let api = Arc::new(KeyedLocator::new(&[("Slow Corp", 300)]));
    let (mut dispatcher, mut rx) = Dispatcher::new(api);
    let mut dashboard = Dashboard::default();

    dashboard.company_query = TextInput::with_content("Slow Corp");
    dispatcher.dispatch(dashboard.trigger(ToolId::Locator).unwrap());
    // Recipe fails fast while the locator is still loading
    dispatcher.dispatch(dashboard.trigger(ToolId::Recipe).unwrap());

    let first = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!(first.tool, ToolId::Recipe);
    assert_eq!(dashboard.apply(first), Applied::Failed);
    assert_eq!(
        dashboard.error(ToolId::Recipe),
        Some("Something went wrong generating the recipe.")
    );
    assert!(dashboard.is_loading(ToolId::Locator));

    let second = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!(dashboard.apply(second), Applied::Succeeded);
    assert_eq!(dashboard.error(ToolId::Locator), None);
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
}

fn find_row(buffer: &Buffer, needle: &str) -> Option<u16> {
    (0..buffer.area.height).find(|y| row_text(buffer, *y).contains(needle))
}

fn bar_color(buffer: &Buffer, y: u16) -> Option<ratatui::style::Color> {
    (0..buffer.area.width)
        .find(|x| buffer[(*x, y)].symbol() == "┃")
        .map(|x| buffer[(x, y)].fg)
}

#[tokio::test]
async fn test_supply_chain_lookup_renders_cards() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/supply-chain")
        .match_query(Matcher::UrlEncoded(
            "product_name".to_string(),
            "iPhone 15 Pro".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "product": "iPhone 15 Pro",
                "supply_chain": [
                    {
                        "company_name": "Foxconn",
                        "role": "Assembler",
                        "location_query": "Foxconn Zhengzhou",
                        "found": true,
                        "address": "Zhengzhou, Henan, China",
                        "coordinates": {"lat": 34.7466, "lng": 113.6254}
                    },
                    {
                        "company_name": "Obscure Sub Ltd",
                        "role": "Component Supplier",
                        "location_query": "Obscure Sub Ltd HQ",
                        "found": false
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = Arc::new(HttpBackend::with_base_url(server.url()).unwrap());
    let (mut dispatcher, mut rx) = Dispatcher::new(api);
    let mut app = App::with_defaults();
    app.focus = ToolId::SupplyChain;
    app.dashboard.product_query = TextInput::with_content("iPhone 15 Pro");

    assert!(app.trigger(ToolId::SupplyChain));
    for ticket in app.take_pending() {
        dispatcher.dispatch(ticket);
    }
    let done = timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();
    assert_eq!(app.apply(done), Applied::Succeeded);

    let mut terminal = Terminal::new(TestBackend::new(100, 60)).unwrap();
    terminal.draw(|f| render(&app, f)).unwrap();
    let buffer = terminal.backend().buffer();

    assert!(find_row(buffer, "Supply Chain for: iPhone 15 Pro").is_some());

    let found_row = find_row(buffer, "Foxconn").unwrap();
    let missing_row = find_row(buffer, "Obscure Sub Ltd").unwrap();
    assert!(found_row < missing_row);
    assert_eq!(bar_color(buffer, found_row), Some(colors::FOUND));
    assert_eq!(bar_color(buffer, missing_row), Some(colors::NOT_FOUND));

    let screen: String = (0..buffer.area.height).map(|y| row_text(buffer, y)).collect();
    assert_eq!(screen.matches("View on Map").count(), 1);
    assert_eq!(screen.matches("Location not found").count(), 1);
    assert!(screen.contains("query=34.7466,113.6254"));
}

#[tokio::test]
async fn test_failed_lookup_shows_fixed_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/supply-chain")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let api = Arc::new(HttpBackend::with_base_url(server.url()).unwrap());
    let mut app = App::with_defaults();
    app.dashboard.product_query = TextInput::with_content("Widget");
    assert!(app.trigger(ToolId::SupplyChain));

    let ticket = app.take_pending().remove(0);
    let outcome = execute(api.as_ref(), ticket.request).await;
    app.apply(ToolEvent {
        tool: ToolId::SupplyChain,
        generation: ticket.generation,
        outcome,
    });

    let mut terminal = Terminal::new(TestBackend::new(100, 60)).unwrap();
    terminal.draw(|f| render(&app, f)).unwrap();
    let buffer = terminal.backend().buffer();

    let row = find_row(buffer, "Failed to analyze supply chain.").unwrap();
    let text = row_text(buffer, row);
    let x = text[..text.find("Failed").unwrap()].chars().count() as u16;
    assert_eq!(buffer[(x, row)].fg, colors::ERROR);
    assert!(find_row(buffer, "boom").is_none());
}
