//! The page diagnostics
//!
//! Every check turns its own failures into an error [`Finding`] and returns a
//! [`CheckReport`]; nothing a check does can abort the checks after it.

mod content;
mod integrity;
mod performance;
mod rendering;
mod types;
mod validator;

pub use content::{content_findings, inspect_content, STRUCTURED_DATA_PREVIEW_CHARS};
pub use integrity::{check_resources, find_broken, Resource};
pub use performance::{
    check_load_time, check_page_size, check_ssl, exceeds_limit, DEFAULT_PAGE_SIZE_LIMIT_KB,
};
pub use rendering::{check_console, check_responsiveness, session_error, DEFAULT_SETTLE_DELAY};
pub use types::{CheckKind, CheckReport, Finding, Symbol, Verdict};
pub use validator::{check_validation, validation_url, DEFAULT_VALIDATOR_ENDPOINT};
