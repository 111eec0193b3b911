//! Runs tool requests as tokio tasks, at most one live task per tool.
//!
//! Dispatching a ticket for a tool aborts that tool's previous task before
//! spawning the new one. Completions travel back over an mpsc channel as
//! [`ToolEvent`]s for the UI loop to fold into the [`Dashboard`].
//!
//! [`Dashboard`]: crate::dashboard::Dashboard

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::DashboardApi;
use crate::dashboard::{Ticket, ToolEvent, ToolId, ToolOutput, ToolRequest};
use crate::error::Result;

/// Capacity of the completion channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Handle to a running request task.
struct InFlight {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Spawns and supersedes per-tool request tasks.
pub struct Dispatcher {
    api: Arc<dyn DashboardApi>,
    event_tx: mpsc::Sender<ToolEvent>,
    in_flight: HashMap<ToolId, InFlight>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver its completions arrive on.
    pub fn new(api: Arc<dyn DashboardApi>) -> (Self, mpsc::Receiver<ToolEvent>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let dispatcher = Self {
            api,
            event_tx,
            in_flight: HashMap::new(),
        };
        (dispatcher, event_rx)
    }

    /// Spawn the ticket's request, aborting any earlier task for the same tool.
    pub fn dispatch(&mut self, ticket: Ticket) {
        let tool = ticket.tool();
        let generation = ticket.generation;

        if let Some(previous) = self.in_flight.remove(&tool) {
            debug!(
                "{} generation {} superseded by {}",
                tool.name(),
                previous.generation,
                generation
            );
            previous.handle.abort();
        }

        let api = self.api.clone();
        let event_tx = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = execute(api.as_ref(), ticket.request).await;
            if event_tx
                .send(ToolEvent {
                    tool,
                    generation,
                    outcome,
                })
                .await
                .is_err()
            {
                warn!("{} result dropped: dashboard is gone", tool.name());
            }
        });

        self.in_flight.insert(tool, InFlight { generation, handle });
    }

    /// Forget the task behind a completion once it has been delivered.
    pub fn complete(&mut self, event: &ToolEvent) {
        if let Some(running) = self.in_flight.get(&event.tool)
            && running.generation == event.generation
        {
            self.in_flight.remove(&event.tool);
        }
    }

    /// Whether a task for the tool is still running.
    pub fn is_running(&self, tool: ToolId) -> bool {
        self.in_flight.get(&tool).is_some_and(|r| !r.handle.is_finished())
    }

    /// Abort the tool's running task, if any.
    pub fn cancel(&mut self, tool: ToolId) -> bool {
        match self.in_flight.remove(&tool) {
            Some(running) => {
                running.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Abort every running task.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.in_flight.len();
        for (_, running) in self.in_flight.drain() {
            running.handle.abort();
        }
        count
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Perform one request against the backend.
pub async fn execute(api: &dyn DashboardApi, request: ToolRequest) -> Result<ToolOutput> {
    match request {
        ToolRequest::Recipe(req) => api.generate_recipe(&req).await.map(ToolOutput::Recipe),
        ToolRequest::Locate(req) => api.locate_company(&req).await.map(ToolOutput::Location),
        ToolRequest::SupplyChain { product_name } => {
            api.supply_chain(&product_name).await.map(ToolOutput::SupplyChain)
        }
    }
}
