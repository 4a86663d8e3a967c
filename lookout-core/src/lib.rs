pub mod browser;
pub mod checks;
pub mod colors;
pub mod document;
pub mod error;
pub mod fetch;
pub mod output;
pub mod runner;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::{LookoutError, Result};
pub use validation::{normalize_target, normalize_targets};

pub use browser::{BrowserLauncher, BrowserSession, ChromiumLauncher, ConsoleEntry, Viewport};
pub use checks::{CheckKind, CheckReport, Finding, Symbol, Verdict};
pub use document::PageDocument;
pub use fetch::{FetchMethod, FetchResult, Fetcher, HttpFetcher};
pub use output::HumanFormatter;
pub use runner::{Profile, RunConfig, RunEvent, Runner, TargetReport};
