//! Error module re-export
//!
//! This module re-exports the extraction error types.

pub use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
