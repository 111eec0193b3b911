use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use hackdash::api::{DashboardApi, HttpBackend};
use hackdash::cli::output::format_output;
use hackdash::cli::{Cli, Commands, run_tool};
use hackdash::config::Config;
use hackdash::dashboard::{ToolId, ToolOutput};
use hackdash::maps::MapLinks;
use hackdash::tui::{self, TuiRunner};

fn setup_logging(filter: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hackdash")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("hackdash.log");

    // Setup env_logger with file output so the TUI screen stays clean
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::new()
        .parse_filters(filter)
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{} {}", "Backend:".yellow(), config.backend.base_url);
    }

    let api: Arc<dyn DashboardApi> =
        Arc::new(HttpBackend::new(&config.backend).context("Failed to create backend client")?);

    match &cli.command {
        None => {
            // Default: launch TUI mode
            run_tui(config, api).await
        }
        Some(Commands::Recipe { json }) => handle_tool_command(api.as_ref(), config, ToolId::Recipe, "", *json).await,
        Some(Commands::Locate { company, json }) => {
            handle_tool_command(api.as_ref(), config, ToolId::Locator, company, *json).await
        }
        Some(Commands::SupplyChain { product, json }) => {
            handle_tool_command(api.as_ref(), config, ToolId::SupplyChain, product, *json).await
        }
        Some(Commands::Ping) => handle_ping_command(api.as_ref(), config).await,
    }
}

async fn run_tui(config: &Config, api: Arc<dyn DashboardApi>) -> Result<()> {
    info!("Launching TUI mode");
    let terminal = tui::init_terminal().context("Failed to initialize terminal")?;
    let mut runner = TuiRunner::new(terminal, config, api);
    let result = runner.run().await;
    // Restore even when the loop failed
    tui::finish(result, tui::restore_terminal().context("Failed to restore terminal"))
}

async fn handle_tool_command(
    api: &dyn DashboardApi,
    config: &Config,
    tool: ToolId,
    query: &str,
    json: bool,
) -> Result<()> {
    info!("Running {} tool (query: {:?})", tool.name(), query);
    match tool {
        ToolId::Recipe => println!("{}", "Cooking...".cyan()),
        ToolId::Locator => println!("{}", "Searching...".cyan()),
        ToolId::SupplyChain => println!("{}", "Analyzing...".cyan()),
    }

    let output = run_tool(api, config, tool, query).await?;
    if json {
        let value = match &output {
            ToolOutput::Recipe(recipe) => serde_json::to_string_pretty(recipe)?,
            ToolOutput::Location(location) => serde_json::to_string_pretty(location)?,
            ToolOutput::SupplyChain(data) => serde_json::to_string_pretty(data)?,
        };
        println!("{}", value);
    } else {
        print!("{}", format_output(&output, &MapLinks::new(&config.maps)));
    }
    Ok(())
}

async fn handle_ping_command(api: &dyn DashboardApi, config: &Config) -> Result<()> {
    info!("Pinging backend at {}", config.backend.base_url);
    let hello = api
        .hello()
        .await
        .with_context(|| format!("Backend at {} did not answer", config.backend.base_url))?;
    println!("{} {}", "OK:".green(), hello.message);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; it picks the default log filter
    let config = match Config::load(cli.config.as_ref()) {
        Ok(config) => config.with_backend_url(cli.backend.as_deref()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    // Setup logging
    let filter = config.log_filter(std::env::var("RUST_LOG").ok().as_deref());
    if let Err(e) = setup_logging(&filter) {
        eprintln!("{} {:#}", "Error:".red(), e);
        return ExitCode::FAILURE;
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    match run_application(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            log::error!("Application failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
