use std::fmt;
use std::time::Duration;

use url::Url;

/// HTTP method used to probe a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMethod {
    #[default]
    Get,
    Head,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMethod::Get => write!(f, "GET"),
            FetchMethod::Head => write!(f, "HEAD"),
        }
    }
}

/// Outcome of a single HTTP exchange
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code of the final response
    pub status: u16,
    /// URL of the final response, after redirects
    pub final_url: Url,
    /// Response body (empty for HEAD)
    pub body: Vec<u8>,
    /// Wall-clock time from request start to body fully read
    pub elapsed: Duration,
    /// Response headers, lowercased names
    pub headers: Vec<(String, String)>,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body size in kilobytes (1 KB = 1024 bytes)
    pub fn size_kb(&self) -> f64 {
        self.body.len() as f64 / 1024.0
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: u16, body: &[u8]) -> FetchResult {
        FetchResult {
            status,
            final_url: Url::parse("https://example.com/").unwrap(),
            body: body.to_vec(),
            elapsed: Duration::from_millis(5),
            headers: vec![("content-type".to_string(), "text/html".to_string())],
        }
    }

    #[test]
    fn test_success_range() {
        assert!(result(200, b"").is_success());
        assert!(result(204, b"").is_success());
        assert!(!result(301, b"").is_success());
        assert!(!result(404, b"").is_success());
        assert!(!result(500, b"").is_success());
    }

    #[test]
    fn test_size_kb() {
        assert_eq!(result(200, &[0u8; 2048]).size_kb(), 2.0);
        assert_eq!(result(200, b"").size_kb(), 0.0);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let r = result(200, b"");
        assert_eq!(r.header("Content-Type"), Some("text/html"));
        assert_eq!(r.header("x-missing"), None);
    }
}
