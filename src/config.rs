use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Ingredients sent with every recipe request unless configured otherwise
pub const DEFAULT_INGREDIENTS: [&str; 4] = ["chicken", "rice", "soy sauce", "broccoli"];

/// Dietary restriction sent with every recipe request unless configured otherwise
pub const DEFAULT_DIETARY_RESTRICTIONS: &str = "gluten-free";

/// Log filter used when neither `RUST_LOG` nor `log_level` is set
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// env_logger filter, e.g. `debug` or `hackdash=debug,reqwest=warn`
    pub log_level: Option<String>,
    pub backend: BackendConfig,
    pub recipe: RecipeConfig,
    pub locator: LocatorConfig,
    pub maps: MapsConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// No timeout when unset; a stalled request keeps its tool loading.
    pub timeout_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    pub ingredients: Vec<String>,
    pub dietary_restrictions: String,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            ingredients: DEFAULT_INGREDIENTS.iter().map(|s| s.to_string()).collect(),
            dietary_restrictions: DEFAULT_DIETARY_RESTRICTIONS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Sent as `city` on every locate request
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    pub search_url: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.google.com/maps/search/?api=1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Filter for the logger: `RUST_LOG` first, then `log_level`, then `info`.
    pub fn log_filter(&self, rust_log: Option<&str>) -> String {
        rust_log
            .filter(|f| !f.trim().is_empty())
            .or(self.log_level.as_deref())
            .unwrap_or(DEFAULT_LOG_FILTER)
            .to_string()
    }

    /// Replace the backend base URL, e.g. from `--backend`.
    pub fn with_backend_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url {
            self.backend.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}
