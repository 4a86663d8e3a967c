use tracing::{debug, instrument, warn};

use super::types::{CheckKind, CheckReport, Finding};
use crate::document::PageDocument;
use crate::fetch::{fetch_page, FetchMethod, Fetcher};

/// Which embedded resources to verify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Links,
    Images,
}

impl Resource {
    fn check_kind(&self) -> CheckKind {
        match self {
            Resource::Links => CheckKind::Links,
            Resource::Images => CheckKind::Images,
        }
    }

    fn urls<'a>(&self, document: &'a PageDocument) -> &'a [String] {
        match self {
            Resource::Links => &document.links,
            Resource::Images => &document.images,
        }
    }

    fn all_clear(&self, url: &str) -> String {
        match self {
            Resource::Links => format!("All links in {} are working correctly.", url),
            Resource::Images => format!("All images in {} are loading correctly.", url),
        }
    }

    fn broken(&self, url: &str) -> String {
        match self {
            Resource::Links => format!("Broken Links in {}:", url),
            Resource::Images => format!("Broken Images in {}:", url),
        }
    }
}

/// Fetch the page and verify every link or image it references.
///
/// Resources are probed one at a time in document order; repeats are probed again.
#[instrument(skip(fetcher))]
pub async fn check_resources(
    fetcher: &dyn Fetcher,
    url: &str,
    resource: Resource,
    method: FetchMethod,
) -> CheckReport {
    let document = match fetch_page(fetcher, url).await {
        Ok(page) => PageDocument::parse(&page.text(), &page.final_url),
        Err(e) => {
            return CheckReport::new(
                resource.check_kind(),
                vec![Finding::error(format!("Error accessing {}: {}", url, e))],
            );
        }
    };

    let broken = find_broken(fetcher, resource.urls(&document), method).await;
    CheckReport::new(resource.check_kind(), vec![summarize(url, resource, broken)])
}

/// Probe each URL and return the ones that did not answer exactly 200
pub async fn find_broken(
    fetcher: &dyn Fetcher,
    urls: &[String],
    method: FetchMethod,
) -> Vec<String> {
    let mut broken = Vec::new();

    for resource_url in urls {
        match fetcher.fetch(method, resource_url).await {
            Ok(response) if response.status == 200 => {}
            Ok(response) => {
                debug!(url = %resource_url, status = response.status, "Broken resource");
                broken.push(resource_url.clone());
            }
            Err(e) => {
                warn!(url = %resource_url, error = %e, "Resource fetch failed");
                broken.push(resource_url.clone());
            }
        }
    }

    broken
}

fn summarize(url: &str, resource: Resource, broken: Vec<String>) -> Finding {
    if broken.is_empty() {
        Finding::all_clear(resource.all_clear(url))
    } else {
        Finding::fail(resource.broken(url)).with_details(broken)
    }
}
