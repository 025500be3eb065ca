//! Site scraping with an in-memory document source
use std::sync::Mutex;

use async_trait::async_trait;
use venue_scraper::infrastructure::{
    AppConfig, DocumentSource, ScrapeError, ScrapeMode, ScrapeResult, SiteConfig, SiteRecords,
    SiteScraper,
};
use venue_scraper::{ExtractionProfile, Link};

const PMK_PAGE: &str = r#"
    <html><body>
        <a href="/termine?page=1">weiter</a>
        <div class="layout--pmktermin">
            <time datetime="2024-05-01T20:00:00Z">1. Mai</time>
            <div class="field--name-field-titel">Show</div>
        </div>
    </body></html>"#;

/// Serves fixed bodies and records every requested URL
struct FixtureSource {
    pages: Vec<(String, ScrapeResult<String>)>,
    requested: Mutex<Vec<String>>,
}

impl FixtureSource {
    fn new(pages: Vec<(&str, ScrapeResult<String>)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(url, body)| (url.to_string(), body))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentSource for FixtureSource {
    async fn fetch_document(&self, url: &str) -> ScrapeResult<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .iter()
            .find(|(page, _)| page == url)
            .map(|(_, body)| body.clone())
            .unwrap_or_else(|| {
                Err(ScrapeError::HttpRequestFailed {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
            })
    }
}

fn pmk_site() -> SiteConfig {
    SiteConfig::new("pmk", "https://www.pmk.or.at/termine", ExtractionProfile::pmk())
}

#[tokio::test]
async fn events_are_extracted_from_fetched_page() {
    let source = FixtureSource::new(vec![(
        "https://www.pmk.or.at/termine",
        Ok(PMK_PAGE.to_string()),
    )]);
    let scraper = SiteScraper::new(source);

    let events = scraper.scrape_events(&pmk_site()).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Show");
    assert_eq!(events[0].description, "");
}

#[tokio::test]
async fn links_are_extracted_from_fetched_page() {
    let source = FixtureSource::new(vec![(
        "https://www.pmk.or.at/termine",
        Ok(PMK_PAGE.to_string()),
    )]);
    let scraper = SiteScraper::new(source);

    let links = scraper.scrape_links(&pmk_site()).await.unwrap();
    assert_eq!(links, vec![Link::new("/termine?page=1", "weiter")]);
}

#[tokio::test]
async fn fetch_failure_skips_extraction_and_is_reported() {
    let source = FixtureSource::new(vec![(
        "https://www.pmk.or.at/termine",
        Err(ScrapeError::HttpStatus {
            status: 503,
            url: "https://www.pmk.or.at/termine".to_string(),
        }),
    )]);
    let scraper = SiteScraper::new(source);

    let err = scraper
        .scrape(&pmk_site(), ScrapeMode::Events)
        .await
        .unwrap_err();
    assert!(err.is_fetch_failure());
    assert!(matches!(err, ScrapeError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn scrape_all_reports_every_default_site_in_order() {
    let config = AppConfig::default();
    let source = FixtureSource::new(vec![(
        "https://www.pmk.or.at/termine",
        Ok(PMK_PAGE.to_string()),
    )]);
    let scraper = SiteScraper::new(source);

    let reports = scraper.scrape_all(&config.sites, ScrapeMode::Events).await;

    let names: Vec<&str> = reports.iter().map(|r| r.site.name.as_str()).collect();
    assert_eq!(names, vec!["pmk", "treibhaus"]);
    assert!(matches!(&reports[0].result, Ok(SiteRecords::Events(events)) if events.len() == 1));
    assert!(matches!(
        reports[1].result,
        Err(ScrapeError::HttpRequestFailed { .. })
    ));
}
