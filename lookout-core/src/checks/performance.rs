use tracing::instrument;

use super::types::{CheckKind, CheckReport, Finding};
use crate::fetch::{fetch_page, FetchMethod, Fetcher};

/// Page size limit used when none is configured
pub const DEFAULT_PAGE_SIZE_LIMIT_KB: f64 = 500.0;

/// Report how long the page took to load, request start to body read
#[instrument(skip(fetcher))]
pub async fn check_load_time(fetcher: &dyn Fetcher, url: &str) -> CheckReport {
    let finding = match fetch_page(fetcher, url).await {
        Ok(page) => Finding::timing(format!(
            "Website {} loaded in {:.2} seconds",
            url,
            page.elapsed.as_secs_f64()
        )),
        Err(e) => Finding::error(format!("Error checking load speed for {}: {}", url, e)),
    };

    CheckReport::new(CheckKind::LoadTime, vec![finding])
}

/// Pass when the final URL after redirects is served over https.
///
/// Only the scheme is inspected; the certificate chain is not validated.
#[instrument(skip(fetcher))]
pub async fn check_ssl(fetcher: &dyn Fetcher, url: &str) -> CheckReport {
    let finding = match fetcher.fetch(FetchMethod::Get, url).await {
        Ok(response) if response.final_url.scheme() == "https" => {
            Finding::pass(format!("SSL/TLS validation passed for {}", url))
        }
        Ok(_) => Finding::fail(format!("SSL/TLS validation failed for {}", url)),
        Err(e) => Finding::error(format!("Error during SSL check for {}: {}", url, e)),
    };

    CheckReport::new(CheckKind::Ssl, vec![finding])
}

/// Report the body size and warn when it exceeds `limit_kb`
#[instrument(skip(fetcher))]
pub async fn check_page_size(fetcher: &dyn Fetcher, url: &str, limit_kb: f64) -> CheckReport {
    let findings = match fetcher.fetch(FetchMethod::Get, url).await {
        Ok(response) => {
            let size_kb = response.size_kb();
            let mut findings = vec![Finding::size(format!(
                "Page size for {}: {:.2} KB",
                url, size_kb
            ))];
            if exceeds_limit(size_kb, limit_kb) {
                findings.push(Finding::warn(format!(
                    "Alert: Page size for {} exceeds the limit of {} KB.",
                    url, limit_kb
                )));
            }
            findings
        }
        Err(e) => vec![Finding::error(format!(
            "Error checking page size for {}: {}",
            url, e
        ))],
    };

    CheckReport::new(CheckKind::PageSize, findings)
}

/// Strictly greater; a page exactly at the limit is fine
pub fn exceeds_limit(size_kb: f64, limit_kb: f64) -> bool {
    size_kb > limit_kb
}
