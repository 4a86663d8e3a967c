use std::time::Duration;

use crate::browser::Viewport;
use crate::checks::{
    CheckKind, DEFAULT_PAGE_SIZE_LIMIT_KB, DEFAULT_SETTLE_DELAY, DEFAULT_VALIDATOR_ENDPOINT,
};
use crate::fetch::FetchMethod;

/// Page size limit of the audit profile
pub const AUDIT_PAGE_SIZE_LIMIT_KB: f64 = 300.0;

/// Named check sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// SEO metadata followed by link integrity
    Seo,
    /// Every check
    #[default]
    Audit,
}

impl Profile {
    /// Checks in execution order
    pub fn checks(&self) -> Vec<CheckKind> {
        match self {
            Profile::Seo => vec![CheckKind::Content, CheckKind::Links],
            Profile::Audit => vec![
                CheckKind::Content,
                CheckKind::Images,
                CheckKind::Links,
                CheckKind::LoadTime,
                CheckKind::Ssl,
                CheckKind::PageSize,
                CheckKind::Responsiveness,
                CheckKind::Console,
                CheckKind::Validation,
            ],
        }
    }

    pub fn page_size_limit_kb(&self) -> f64 {
        match self {
            Profile::Seo => DEFAULT_PAGE_SIZE_LIMIT_KB,
            Profile::Audit => AUDIT_PAGE_SIZE_LIMIT_KB,
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seo" => Ok(Profile::Seo),
            "audit" | "full" | "all" => Ok(Profile::Audit),
            _ => Err(format!("Unknown profile: {}", s)),
        }
    }
}

/// Knobs for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub checks: Vec<CheckKind>,
    pub page_size_limit_kb: f64,
    pub settle_delay: Duration,
    pub viewports: Vec<Viewport>,
    pub validator_endpoint: String,
    pub probe_method: FetchMethod,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl RunConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            checks: profile.checks(),
            page_size_limit_kb: profile.page_size_limit_kb(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            viewports: Viewport::defaults(),
            validator_endpoint: DEFAULT_VALIDATOR_ENDPOINT.to_string(),
            probe_method: FetchMethod::Get,
        }
    }

    pub fn with_checks(mut self, checks: Vec<CheckKind>) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_page_size_limit(mut self, limit_kb: f64) -> Self {
        self.page_size_limit_kb = limit_kb;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_validator_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.validator_endpoint = endpoint.into();
        self
    }

    pub fn with_probe_method(mut self, method: FetchMethod) -> Self {
        self.probe_method = method;
        self
    }

    /// Whether any configured check needs a browser
    pub fn needs_browser(&self) -> bool {
        self.checks.iter().any(CheckKind::needs_browser)
    }
}
