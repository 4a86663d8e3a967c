use tracing::instrument;
use url::Url;

use super::types::{CheckKind, CheckReport, Finding};
use crate::error::Result;
use crate::fetch::{FetchMethod, Fetcher};

pub const DEFAULT_VALIDATOR_ENDPOINT: &str = "https://validator.w3.org/nu/";

/// Submit the page to an external markup validator.
///
/// Any 200 answer counts as success, so this only proves the validator
/// accepted the request; it does not read the validation messages.
#[instrument(skip(fetcher))]
pub async fn check_validation(fetcher: &dyn Fetcher, endpoint: &str, url: &str) -> CheckReport {
    let finding = match submit(fetcher, endpoint, url).await {
        Ok(200) => Finding::pass(format!("HTML/CSS validation succeeded for {}.", url)),
        Ok(_) => Finding::fail(format!("HTML/CSS validation failed for {}.", url)),
        Err(e) => Finding::error(format!(
            "Error during HTML/CSS validation for {}: {}",
            url, e
        )),
    };

    CheckReport::new(CheckKind::Validation, vec![finding])
}

async fn submit(fetcher: &dyn Fetcher, endpoint: &str, url: &str) -> Result<u16> {
    let request = validation_url(endpoint, url)?;
    let response = fetcher.fetch(FetchMethod::Get, request.as_str()).await?;
    Ok(response.status)
}

/// Validator URL with the target passed as the `doc` query parameter
pub fn validation_url(endpoint: &str, url: &str) -> Result<Url> {
    let mut request = Url::parse(endpoint)?;
    request.query_pairs_mut().append_pair("doc", url);
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::types::Verdict;
    use crate::testing::MockFetcher;

    const URL: &str = "https://example.com/";
    const REQUEST: &str = "https://validator.w3.org/nu/?doc=https%3A%2F%2Fexample.com%2F";

    #[test]
    fn test_validation_url_encodes_target() {
        assert_eq!(
            validation_url(DEFAULT_VALIDATOR_ENDPOINT, URL).unwrap().as_str(),
            REQUEST
        );
    }

    #[tokio::test]
    async fn test_reachable_validator_counts_as_valid() {
        // The body reports markup errors, yet a 200 is still taken as success.
        let fetcher = MockFetcher::new().page(
            REQUEST,
            r#"<ol><li class="error"><p>Error: Stray end tag div.</p></li></ol>"#,
        );

        let report = check_validation(&fetcher, DEFAULT_VALIDATOR_ENDPOINT, URL).await;

        assert_eq!(report.verdict(), Verdict::Pass);
        assert_eq!(
            report.findings[0].message,
            "HTML/CSS validation succeeded for https://example.com/."
        );
    }

    #[tokio::test]
    async fn test_non_200_is_failure() {
        let fetcher = MockFetcher::new().status(REQUEST, 503, "");

        let report = check_validation(&fetcher, DEFAULT_VALIDATOR_ENDPOINT, URL).await;

        assert_eq!(report.verdict(), Verdict::Fail);
        assert_eq!(
            report.findings[0].message,
            "HTML/CSS validation failed for https://example.com/."
        );
    }

    #[tokio::test]
    async fn test_unreachable_validator_is_error() {
        let fetcher = MockFetcher::new();

        let report = check_validation(&fetcher, DEFAULT_VALIDATOR_ENDPOINT, URL).await;

        assert_eq!(report.verdict(), Verdict::Error);
        assert!(report.findings[0]
            .message
            .starts_with("Error during HTML/CSS validation for https://example.com/:"));
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_error() {
        let fetcher = MockFetcher::new();

        let report = check_validation(&fetcher, "not a url", URL).await;

        assert_eq!(report.verdict(), Verdict::Error);
        assert!(fetcher.requests().is_empty());
    }
}
