use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookoutError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{status} {reason} for url: {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Browser error: {0}")]
    BrowserError(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

impl LookoutError {
    /// Builds the error reported when a primary fetch answers with a non-2xx status.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        LookoutError::HttpStatus {
            status,
            reason,
            url: url.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LookoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = LookoutError::status(404, "https://example.com/missing");
        assert_eq!(
            err.to_string(),
            "404 Not Found for url: https://example.com/missing"
        );
    }

    #[test]
    fn test_status_error_unknown_code() {
        let err = LookoutError::status(599, "https://example.com/");
        assert!(err.to_string().starts_with("599 Unknown"));
    }
}
