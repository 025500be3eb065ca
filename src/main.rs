//! venue-scraper command-line entry point
//!
//! Usage: `venue-scraper [events|links] [site...]`
//!
//! Records are printed to stdout as one JSON object per line; logs go to
//! stderr and, when enabled, to the log file.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use venue_scraper::domain::Link;
use venue_scraper::infrastructure::{
    ConfigManager, HttpClient, ScrapeMode, SiteRecords, SiteScraper, init_logging_with_config,
};

#[derive(Parser, Debug)]
#[command(name = "venue-scraper")]
#[command(about = "Extract events or links from venue programme pages")]
#[command(version)]
struct Cli {
    /// What to extract from each site
    #[arg(value_enum, default_value_t = ScrapeMode::Events)]
    mode: ScrapeMode,

    /// Configured site names; every site when omitted
    sites: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli { mode, sites: site_names } = Cli::parse();

    let config = ConfigManager::new()?.load_or_initialize().await?;
    init_logging_with_config(config.logging.clone())?;

    let sites = config.select_sites(&site_names)?;
    info!("Scraping {} site(s) for {:?}", sites.len(), mode);

    let scraper = SiteScraper::new(HttpClient::with_config(&config.http)?);
    let reports = scraper.scrape_all(&sites, mode).await;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;

    for report in reports {
        let records = match report.result {
            Ok(records) => records,
            Err(_) => {
                failed += 1;
                continue;
            }
        };

        match records {
            SiteRecords::Events(events) => {
                for event in &events {
                    writeln!(out, "{}", serde_json::to_string(event)?)
                        .context("Failed to write to stdout")?;
                }
            }
            SiteRecords::Links(links) => {
                let base = report.site.parsed_url()?;
                for link in links {
                    let href = link
                        .resolve(&base)
                        .map_or_else(|| link.href.clone(), |url| url.to_string());
                    let resolved = Link::new(href, link.text);
                    writeln!(out, "{}", serde_json::to_string(&resolved)?)
                        .context("Failed to write to stdout")?;
                }
            }
        }
    }

    if failed > 0 {
        warn!("{} of {} site(s) could not be fetched", failed, sites.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults_to_events_for_all_sites() {
        let cli = Cli::try_parse_from(["venue-scraper"]).unwrap();
        assert_eq!(cli.mode, ScrapeMode::Events);
        assert!(cli.sites.is_empty());
    }

    #[test]
    fn test_mode_and_sites() {
        let cli = Cli::try_parse_from(["venue-scraper", "links", "pmk", "treibhaus"]).unwrap();
        assert_eq!(cli.mode, ScrapeMode::Links);
        assert_eq!(cli.sites, vec!["pmk", "treibhaus"]);
    }

    #[test]
    fn test_mistyped_mode_is_rejected() {
        let err = Cli::try_parse_from(["venue-scraper", "evnts", "pmk"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Cli::try_parse_from(["venue-scraper", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
