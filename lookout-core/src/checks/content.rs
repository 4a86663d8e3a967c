use tracing::{debug, instrument};

use super::types::{CheckKind, CheckReport, Finding};
use crate::document::PageDocument;
use crate::fetch::{fetch_page, Fetcher};

/// Characters of the JSON-LD block echoed in the pass line
pub const STRUCTURED_DATA_PREVIEW_CHARS: usize = 100;

/// Content & SEO inspection: title, meta description, viewport and structured data.
///
/// A failed primary fetch yields a single error and no sub-checks.
#[instrument(skip(fetcher))]
pub async fn inspect_content(fetcher: &dyn Fetcher, url: &str) -> CheckReport {
    let findings = match fetch_page(fetcher, url).await {
        Ok(page) => {
            let document = PageDocument::parse(&page.text(), &page.final_url);
            debug!(title = ?document.title, "Parsed page");
            content_findings(url, &document)
        }
        Err(e) => vec![Finding::error(format!("Error accessing {}: {}", url, e))],
    };

    CheckReport::new(CheckKind::Content, findings)
}

/// Sub-check verdicts for an already parsed page, in reporting order
pub fn content_findings(url: &str, document: &PageDocument) -> Vec<Finding> {
    let mut findings = Vec::with_capacity(4);

    findings.push(match document.title {
        Some(ref title) => Finding::pass(format!("Title tag found in {}: {}", url, title.trim())),
        None => Finding::warn(format!("Title tag missing in {}", url)),
    });

    findings.push(match document.meta_description {
        Some(ref description) => {
            Finding::pass(format!("Meta description found in {}: {}", url, description))
        }
        None => Finding::warn(format!("Meta description missing in {}", url)),
    });

    findings.push(match document.viewport {
        Some(ref viewport) => Finding::pass(format!("Viewport tag found in {}: {}", url, viewport)),
        None => Finding::warn(format!(
            "Viewport tag missing in {} - important for mobile responsiveness.",
            url
        )),
    });

    findings.push(
        match document.structured_data_preview(STRUCTURED_DATA_PREVIEW_CHARS) {
            Some(preview) => Finding::pass(format!(
                "Structured data found in {}: {}...",
                url, preview
            )),
            None => Finding::warn(format!(
                "Structured data missing in {} - helps search engines understand content.",
                url
            )),
        },
    );

    findings
}
