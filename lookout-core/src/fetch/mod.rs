//! HTTP transport for page and resource fetches
//!
//! Checks never talk to reqwest directly; they go through the [`Fetcher`]
//! trait so a run can be driven by an in-memory transport in tests.

mod client;
mod types;

pub use client::HttpFetcher;
pub use types::{FetchMethod, FetchResult};

use async_trait::async_trait;

use crate::error::{LookoutError, Result};

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL, following redirects, within the transport's timeout.
    ///
    /// Any HTTP status is a successful fetch; only transport failures are errors.
    async fn fetch(&self, method: FetchMethod, url: &str) -> Result<FetchResult>;
}

/// Primary fetch: GET the page and reject non-2xx answers.
pub async fn fetch_page(fetcher: &dyn Fetcher, url: &str) -> Result<FetchResult> {
    let result = fetcher.fetch(FetchMethod::Get, url).await?;
    if !result.is_success() {
        return Err(LookoutError::status(result.status, result.final_url.as_str()));
    }
    Ok(result)
}
