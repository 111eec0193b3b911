//! One-shot tool runs for the non-interactive subcommands.
//!
//! A run goes through the same dashboard state machine as the TUI, so the
//! presence checks, logging and user-facing failure messages match.

use eyre::{Result, eyre};

use crate::api::DashboardApi;
use crate::config::Config;
use crate::dashboard::{Applied, Dashboard, ToolEvent, ToolId, ToolOutput};
use crate::dispatch::execute;
use crate::tui::TextInput;

/// Run one tool to completion and return its output.
///
/// Fails with the tool's fixed message when the request fails, or when a
/// required query is empty.
pub async fn run_tool(api: &dyn DashboardApi, config: &Config, tool: ToolId, query: &str) -> Result<ToolOutput> {
    let mut dashboard = Dashboard::new(config);
    match tool {
        ToolId::Recipe => {}
        ToolId::Locator => dashboard.company_query = TextInput::with_content(query),
        ToolId::SupplyChain => dashboard.product_query = TextInput::with_content(query),
    }

    let Some(ticket) = dashboard.trigger(tool) else {
        return Err(eyre!("{} needs a non-empty query", tool.name()));
    };

    let generation = ticket.generation;
    let outcome = execute(api, ticket.request).await;
    let output = outcome.as_ref().ok().cloned();
    let applied = dashboard.apply(ToolEvent {
        tool,
        generation,
        outcome,
    });

    match (applied, output) {
        (Applied::Succeeded, Some(output)) => Ok(output),
        _ => Err(eyre!(tool.failure_message())),
    }
}
