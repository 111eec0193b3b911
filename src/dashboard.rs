//! Dashboard state: three independent tool panels and their state machines.
//!
//! Each panel moves `idle -> loading -> {succeeded | failed}`. Starting a
//! request hands out a [`Ticket`] stamped with the panel's new generation;
//! only the completion carrying the current generation may touch the panel.
//! Results are written only on confirmed success, and failures are replaced
//! with one fixed message per tool after being logged.

use chrono::{DateTime, Local};
use log::{Level, debug, error, info, log};

use crate::api::{LocateRequest, RecipeRequest};
use crate::config::Config;
use crate::error::DashError;
use crate::model::{CompanyLocation, Recipe, SupplyChainData};
use crate::tui::TextInput;

/// Identity of one dashboard tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolId {
    #[default]
    Recipe,
    Locator,
    SupplyChain,
}

impl ToolId {
    pub const ALL: [ToolId; 3] = [ToolId::Recipe, ToolId::Locator, ToolId::SupplyChain];

    /// Cycle to the next tool
    pub fn next(self) -> Self {
        match self {
            Self::Recipe => Self::Locator,
            Self::Locator => Self::SupplyChain,
            Self::SupplyChain => Self::Recipe,
        }
    }

    /// Cycle to the previous tool
    pub fn prev(self) -> Self {
        match self {
            Self::Recipe => Self::SupplyChain,
            Self::Locator => Self::Recipe,
            Self::SupplyChain => Self::Locator,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Recipe => "Recipe",
            Self::Locator => "Locator",
            Self::SupplyChain => "Supply Chain",
        }
    }

    /// The only error text a user ever sees for this tool.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Recipe => "Something went wrong generating the recipe.",
            Self::Locator => "Could not find that company.",
            Self::SupplyChain => "Failed to analyze supply chain.",
        }
    }

    /// Whether the tool takes a free-text query.
    pub fn has_query(self) -> bool {
        !matches!(self, Self::Recipe)
    }
}

/// A request ready to be sent for one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    Recipe(RecipeRequest),
    Locate(LocateRequest),
    SupplyChain { product_name: String },
}

impl ToolRequest {
    pub fn tool(&self) -> ToolId {
        match self {
            Self::Recipe(_) => ToolId::Recipe,
            Self::Locate(_) => ToolId::Locator,
            Self::SupplyChain { .. } => ToolId::SupplyChain,
        }
    }
}

/// Authorization to run one request; its generation identifies it on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub request: ToolRequest,
}

impl Ticket {
    pub fn tool(&self) -> ToolId {
        self.request.tool()
    }
}

/// Decoded payload of a successful request.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Recipe(Recipe),
    Location(CompanyLocation),
    SupplyChain(SupplyChainData),
}

impl ToolOutput {
    pub fn tool(&self) -> ToolId {
        match self {
            Self::Recipe(_) => ToolId::Recipe,
            Self::Location(_) => ToolId::Locator,
            Self::SupplyChain(_) => ToolId::SupplyChain,
        }
    }
}

/// Completion of one request, delivered back to the UI loop.
#[derive(Debug)]
pub struct ToolEvent {
    pub tool: ToolId,
    pub generation: u64,
    pub outcome: Result<ToolOutput, DashError>,
}

/// What `Dashboard::apply` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Succeeded,
    Failed,
    /// A newer request superseded this one; the panel was not touched.
    Superseded,
}

/// Phase of a panel's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// A result together with when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Received<T> {
    pub value: T,
    pub received_at: DateTime<Local>,
}

/// State of one tool panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPanel<T> {
    status: PanelStatus,
    result: Option<Received<T>>,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for ToolPanel<T> {
    fn default() -> Self {
        Self {
            status: PanelStatus::Idle,
            result: None,
            error: None,
            generation: 0,
        }
    }
}

impl<T> ToolPanel<T> {
    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == PanelStatus::Loading
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref().map(|r| &r.value)
    }

    pub fn received(&self) -> Option<&Received<T>> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enter loading with a fresh generation, clearing the previous error.
    fn start(&mut self, clear_result: bool) -> u64 {
        self.generation += 1;
        self.status = PanelStatus::Loading;
        self.error = None;
        if clear_result {
            self.result = None;
        }
        self.generation
    }

    fn succeed(&mut self, value: T) {
        self.status = PanelStatus::Succeeded;
        self.error = None;
        self.result = Some(Received {
            value,
            received_at: Local::now(),
        });
    }

    fn fail(&mut self, message: &str) {
        self.status = PanelStatus::Failed;
        self.error = Some(message.to_string());
    }
}

/// All dashboard state. Tools share nothing but this container.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub recipe: ToolPanel<Recipe>,
    pub locator: ToolPanel<CompanyLocation>,
    pub supply_chain: ToolPanel<SupplyChainData>,
    /// Company name typed into the locator panel
    pub company_query: TextInput,
    /// Product name typed into the supply chain panel
    pub product_query: TextInput,
    recipe_request: RecipeRequest,
    city: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        Self {
            recipe: ToolPanel::default(),
            locator: ToolPanel::default(),
            supply_chain: ToolPanel::default(),
            company_query: TextInput::new(),
            product_query: TextInput::new(),
            recipe_request: RecipeRequest::from_config(&config.recipe),
            city: config.locator.city.clone(),
        }
    }

    pub fn is_loading(&self, tool: ToolId) -> bool {
        match tool {
            ToolId::Recipe => self.recipe.is_loading(),
            ToolId::Locator => self.locator.is_loading(),
            ToolId::SupplyChain => self.supply_chain.is_loading(),
        }
    }

    pub fn any_loading(&self) -> bool {
        ToolId::ALL.iter().any(|t| self.is_loading(*t))
    }

    pub fn error(&self, tool: ToolId) -> Option<&str> {
        match tool {
            ToolId::Recipe => self.recipe.error(),
            ToolId::Locator => self.locator.error(),
            ToolId::SupplyChain => self.supply_chain.error(),
        }
    }

    fn generation(&self, tool: ToolId) -> u64 {
        match tool {
            ToolId::Recipe => self.recipe.generation(),
            ToolId::Locator => self.locator.generation(),
            ToolId::SupplyChain => self.supply_chain.generation(),
        }
    }

    /// The query a tool would send, or `None` when its input is required and empty.
    fn pending_request(&self, tool: ToolId) -> Option<ToolRequest> {
        match tool {
            ToolId::Recipe => Some(ToolRequest::Recipe(self.recipe_request.clone())),
            ToolId::Locator => {
                if self.company_query.is_empty() {
                    return None;
                }
                Some(ToolRequest::Locate(LocateRequest {
                    company_name: self.company_query.content().to_string(),
                    city: self.city.clone(),
                }))
            }
            ToolId::SupplyChain => {
                if self.product_query.is_empty() {
                    return None;
                }
                Some(ToolRequest::SupplyChain {
                    product_name: self.product_query.content().to_string(),
                })
            }
        }
    }

    /// Whether the tool's trigger is enabled: preconditions met and nothing in flight.
    pub fn can_trigger(&self, tool: ToolId) -> bool {
        !self.is_loading(tool) && self.pending_request(tool).is_some()
    }

    /// Trigger a tool the way its control does: a no-op while disabled.
    pub fn trigger(&mut self, tool: ToolId) -> Option<Ticket> {
        if self.is_loading(tool) {
            debug!("{} trigger ignored while a request is in flight", tool.name());
            return None;
        }
        self.supersede(tool)
    }

    /// Start a request even if one is in flight; the older request is superseded.
    ///
    /// Returns `None` without touching state when the tool's input is empty.
    pub fn supersede(&mut self, tool: ToolId) -> Option<Ticket> {
        let Some(request) = self.pending_request(tool) else {
            debug!("{} trigger ignored: query is empty", tool.name());
            return None;
        };

        let generation = match tool {
            // The previous recipe stays on screen until a new one arrives.
            ToolId::Recipe => self.recipe.start(false),
            ToolId::Locator => self.locator.start(true),
            ToolId::SupplyChain => self.supply_chain.start(true),
        };
        info!("{} request started (generation {})", tool.name(), generation);

        Some(Ticket { generation, request })
    }

    /// Fold a completion into the matching panel.
    pub fn apply(&mut self, event: ToolEvent) -> Applied {
        let tool = event.tool;
        let current = self.generation(tool);
        if event.generation != current {
            debug!(
                "{} result for generation {} discarded, current is {}",
                tool.name(),
                event.generation,
                current
            );
            return Applied::Superseded;
        }

        match event.outcome {
            Ok(output) if output.tool() == tool => {
                match output {
                    ToolOutput::Recipe(recipe) => self.recipe.succeed(recipe),
                    ToolOutput::Location(location) => self.locator.succeed(location),
                    ToolOutput::SupplyChain(data) => self.supply_chain.succeed(data),
                }
                info!("{} request succeeded (generation {})", tool.name(), current);
                Applied::Succeeded
            }
            Ok(output) => {
                error!(
                    "{} request returned a {} payload (generation {})",
                    tool.name(),
                    output.tool().name(),
                    current
                );
                self.fail(tool);
                Applied::Failed
            }
            Err(err) => {
                log!(
                    failure_level(&err),
                    "{} request failed (generation {}): {}",
                    tool.name(),
                    current,
                    err
                );
                self.fail(tool);
                Applied::Failed
            }
        }
    }

    fn fail(&mut self, tool: ToolId) {
        let message = tool.failure_message();
        match tool {
            ToolId::Recipe => self.recipe.fail(message),
            ToolId::Locator => self.locator.fail(message),
            ToolId::SupplyChain => self.supply_chain.fail(message),
        }
    }
}

/// The backend answering with an error is routine; anything else is ours to fix.
fn failure_level(err: &DashError) -> Level {
    if err.is_backend_reported() {
        Level::Warn
    } else {
        Level::Error
    }
}
