use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::types::{FetchMethod, FetchResult};
use super::Fetcher;
use crate::error::{LookoutError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!("Lookout/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport with a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the default 10 second timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookoutError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self, method), fields(method = %method))]
    async fn fetch(&self, method: FetchMethod, url: &str) -> Result<FetchResult> {
        let request = match method {
            FetchMethod::Get => self.http.get(url),
            FetchMethod::Head => self.http.head(url),
        };

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LookoutError::Timeout(format!("{} timed out after {:?}", url, self.timeout))
            } else {
                LookoutError::HttpError(e)
            }
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = match method {
            FetchMethod::Get => response.bytes().await?.to_vec(),
            FetchMethod::Head => Vec::new(),
        };
        let elapsed = start.elapsed();

        debug!(
            status = status,
            final_url = %final_url,
            bytes = body.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Fetched"
        );

        Ok(FetchResult {
            status,
            final_url,
            body,
            elapsed,
            headers,
        })
    }
}
