//! Site scraping: fetch each configured site and run the extraction core
//!
//! Fetching is the only async part. Documents are parsed after the body
//! arrives and never held across an await point.

use async_trait::async_trait;
use clap::ValueEnum;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{Event, Link};
use crate::infrastructure::config::SiteConfig;
use crate::infrastructure::parsing::{
    Document, DocumentParser, EventExtractor, LinkParser, ScrapeResult,
};

/// Anything that can turn a URL into an HTML body
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self, url: &str) -> ScrapeResult<String>;
}

/// What to extract from each site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeMode {
    Events,
    Links,
}

/// Records extracted from one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum SiteRecords {
    Events(Vec<Event>),
    Links(Vec<Link>),
}

/// Outcome for one site; a failed fetch does not affect the others
#[derive(Debug, Clone)]
pub struct SiteReport {
    pub site: SiteConfig,
    pub result: ScrapeResult<SiteRecords>,
}

/// Runs the extraction core over fetched documents
pub struct SiteScraper<S> {
    source: S,
}

impl<S: DocumentSource> SiteScraper<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn scrape_events(&self, site: &SiteConfig) -> ScrapeResult<Vec<Event>> {
        let body = self.source.fetch_document(&site.url).await?;
        let events = EventExtractor.parse(&Document::parse(&body), &site.profile);
        info!("{}: extracted {} events", site.name, events.len());
        Ok(events)
    }

    pub async fn scrape_links(&self, site: &SiteConfig) -> ScrapeResult<Vec<Link>> {
        let body = self.source.fetch_document(&site.url).await?;
        let links = LinkParser.parse(&Document::parse(&body), &());
        info!("{}: extracted {} links", site.name, links.len());
        Ok(links)
    }

    pub async fn scrape(&self, site: &SiteConfig, mode: ScrapeMode) -> ScrapeResult<SiteRecords> {
        match mode {
            ScrapeMode::Events => self.scrape_events(site).await.map(SiteRecords::Events),
            ScrapeMode::Links => self.scrape_links(site).await.map(SiteRecords::Links),
        }
    }

    /// Scrape every site concurrently; reports keep the order of `sites`
    pub async fn scrape_all(&self, sites: &[SiteConfig], mode: ScrapeMode) -> Vec<SiteReport> {
        let reports = join_all(sites.iter().map(|site| async move {
            SiteReport {
                site: site.clone(),
                result: self.scrape(site, mode).await,
            }
        }))
        .await;

        for report in &reports {
            if let Err(e) = &report.result {
                warn!("{}: skipped ({})", report.site.name, e);
            }
        }

        reports
    }
}
