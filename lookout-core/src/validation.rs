//! Target URL normalization

use url::Url;

use crate::error::{LookoutError, Result};

/// Normalize and validate a target URL
///
/// This function:
/// - Trims surrounding whitespace
/// - Prepends `https://` when no scheme is given
/// - Accepts only http and https URLs
/// - Requires a host
///
/// The path and query are kept as given; diagnostics run against the exact page.
pub fn normalize_target(input: &str) -> Result<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LookoutError::InvalidUrl("empty target".to_string()));
    }

    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| LookoutError::InvalidUrl(format!("{}: {}", input, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(LookoutError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            input,
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(LookoutError::InvalidUrl(format!("{}: missing host", input))),
    }
}

/// Parse a list of targets, failing on the first invalid entry
pub fn normalize_targets<I, S>(inputs: I) -> Result<Vec<Url>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .map(|s| normalize_target(s.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_target() {
        assert_eq!(
            normalize_target("https://example.com").unwrap().as_str(),
            "https://example.com/"
        );
        assert_eq!(
            normalize_target("  example.com  ").unwrap().as_str(),
            "https://example.com/"
        );
        assert_eq!(
            normalize_target("http://example.com/path?q=1").unwrap().as_str(),
            "http://example.com/path?q=1"
        );

        // Invalid targets
        assert!(normalize_target("").is_err());
        assert!(normalize_target("   ").is_err());
        assert!(normalize_target("ftp://example.com").is_err());
        assert!(normalize_target("file:///etc/passwd").is_err());
        assert!(normalize_target("https://").is_err());
    }

    #[test]
    fn test_normalize_targets_stops_at_invalid() {
        assert_eq!(
            normalize_targets(["example.com", "example.org"]).unwrap().len(),
            2
        );
        assert!(normalize_targets(["example.com", "ftp://example.org"]).is_err());
    }
}
