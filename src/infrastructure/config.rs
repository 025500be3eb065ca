//! Configuration infrastructure
//!
//! Loads the application configuration from
//! `<config_dir>/venue-scraper/config.json`, layered under `VENUE_SCRAPER__*`
//! environment variables, and writes the defaults on first run.
//!
//! A site is configured as one value pairing its endpoint with the extraction
//! profile for its markup; the extraction core never sees URLs.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;
use url::Url;

use crate::infrastructure::parsing::{ExtractionProfile, ScrapeError, ScrapeResult};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub sites: Vec<SiteConfig>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (written to stderr, stdout carries the records)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log file name inside the log directory
    pub file_name: String,

    /// Module-specific log level filters (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

/// HTTP fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent string
    pub user_agent: String,

    /// Whether to follow redirects
    pub follow_redirects: bool,
}

/// One scrape target: an endpoint and the profile for its markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub url: String,
    pub profile: ExtractionProfile,
}

impl SiteConfig {
    pub fn new(name: &str, url: &str, profile: ExtractionProfile) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            profile,
        }
    }

    pub fn parsed_url(&self) -> ScrapeResult<Url> {
        Url::parse(&self.url).map_err(|e| {
            ScrapeError::configuration(
                &format!("sites.{}.url", self.name),
                format!("invalid URL '{}': {e}", self.url),
            )
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            http: HttpConfig::default(),
            sites: vec![
                SiteConfig::new(sites::PMK_NAME, sites::PMK_URL, ExtractionProfile::pmk()),
                SiteConfig::new(
                    sites::TREIBHAUS_NAME,
                    sites::TREIBHAUS_URL,
                    ExtractionProfile::treibhaus(),
                ),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "warn".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            follow_redirects: true,
        }
    }
}

impl AppConfig {
    /// Check site URLs, site name uniqueness and every profile
    pub fn validate(&self) -> ScrapeResult<()> {
        let mut seen = HashSet::new();

        for site in &self.sites {
            if !seen.insert(site.name.as_str()) {
                return Err(ScrapeError::configuration(
                    "sites",
                    format!("duplicate site name '{}'", site.name),
                ));
            }
            site.parsed_url()?;
            site.profile.validate()?;
        }

        if self.http.timeout_seconds == 0 {
            return Err(ScrapeError::configuration(
                "http.timeout_seconds",
                "timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Sites selected by name, or every site when `names` is empty
    pub fn select_sites(&self, names: &[String]) -> ScrapeResult<Vec<SiteConfig>> {
        if names.is_empty() {
            return Ok(self.sites.clone());
        }

        names
            .iter()
            .map(|name| {
                self.sites
                    .iter()
                    .find(|site| &site.name == name)
                    .cloned()
                    .ok_or_else(|| {
                        ScrapeError::configuration(
                            "sites",
                            format!(
                                "unknown site '{name}' (configured: {})",
                                self.sites
                                    .iter()
                                    .map(|s| s.name.as_str())
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            ),
                        )
                    })
            })
            .collect()
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Create a configuration manager for the default location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Create a configuration manager for an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Load the configuration, writing the defaults first if no file exists
    pub async fn load_or_initialize(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            self.save_config(&AppConfig::default()).await?;
        }
        self.load_config()
    }

    /// Load the file (if present) under environment overrides and validate it
    pub fn load_config(&self) -> Result<AppConfig> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(self.config_path.as_path())
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration: {:?}", self.config_path))?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;
        config.validate().context("Invalid configuration")?;

        info!("Loaded configuration from: {:?}", self.config_path);
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Known venue endpoints
pub mod sites {
    pub const PMK_NAME: &str = "pmk";

    /// PMK programme page
    pub const PMK_URL: &str = "https://www.pmk.or.at/termine";

    pub const TREIBHAUS_NAME: &str = "treibhaus";

    /// Treibhaus programme page
    pub const TREIBHAUS_URL: &str = "https://treibhaus.at/programm";
}

/// Default configuration values
pub mod defaults {
    /// Directory name under the user config directory
    pub const APP_DIR_NAME: &str = "venue-scraper";

    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Prefix of environment overrides, e.g. `VENUE_SCRAPER__HTTP__TIMEOUT_SECONDS`
    pub const ENV_PREFIX: &str = "VENUE_SCRAPER";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const USER_AGENT: &str = concat!("venue-scraper/", env!("CARGO_PKG_VERSION"));

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    pub const LOG_JSON_FORMAT: bool = false;

    pub const LOG_CONSOLE_OUTPUT: bool = true;

    pub const LOG_FILE_OUTPUT: bool = false;

    pub const LOG_FILE_NAME: &str = "venue-scraper.log";
}
