//! Infrastructure layer for HTML extraction and external integrations
//!
//! The extraction core lives in [`parsing`] and is pure. Everything around it
//! (configuration, logging, HTTP fetching and per-site orchestration) is
//! ambient plumbing for the command-line tool.

pub mod config; // Configuration file and environment overrides
pub mod http_client;
pub mod logging; // Logging infrastructure
pub mod parsing; // Extraction core
pub mod scrape_error;
pub mod site_scraper;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, HttpConfig, LoggingConfig, SiteConfig};
pub use http_client::HttpClient;
pub use logging::{get_log_directory, init_logging_with_config};
pub use parsing::{
    Document, DocumentParser, EventExtractor, ExtractionProfile, LinkParser, ProfileRegistry,
};
pub use scrape_error::{ScrapeError, ScrapeResult};
pub use site_scraper::{DocumentSource, ScrapeMode, SiteRecords, SiteReport, SiteScraper};
