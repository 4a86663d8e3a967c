use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};
use url::Url;

use super::config::RunConfig;
use crate::browser::{BrowserLauncher, BrowserSession};
use crate::checks::{
    check_console, check_load_time, check_page_size, check_resources, check_responsiveness,
    check_ssl, check_validation, inspect_content, session_error, CheckKind, CheckReport, Resource,
    Verdict,
};
use crate::error::LookoutError;
use crate::fetch::Fetcher;

/// Progress notifications, emitted in order while a run proceeds
#[derive(Debug)]
pub enum RunEvent<'a> {
    TargetStarted(&'a Url),
    CheckStarted(&'a Url, CheckKind),
    CheckFinished(&'a Url, &'a CheckReport),
    TargetFinished(&'a TargetReport),
}

/// Every check report for one target
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub target: Url,
    pub reports: Vec<CheckReport>,
    pub duration: Duration,
}

impl TargetReport {
    /// Worst verdict across all checks
    pub fn verdict(&self) -> Verdict {
        self.reports
            .iter()
            .map(CheckReport::verdict)
            .max()
            .unwrap_or(Verdict::Pass)
    }

    pub fn has_failures(&self) -> bool {
        self.reports.iter().any(CheckReport::is_failure)
    }
}

enum SessionState {
    NotStarted,
    Ready(Box<dyn BrowserSession>),
    Failed(LookoutError),
}

/// Runs the configured checks over targets, strictly one at a time
#[derive(Clone)]
pub struct Runner {
    fetcher: Arc<dyn Fetcher>,
    launcher: Option<Arc<dyn BrowserLauncher>>,
    config: RunConfig,
}

impl Runner {
    /// A runner without browser support; browser checks are skipped
    pub fn new(fetcher: Arc<dyn Fetcher>, config: RunConfig) -> Self {
        Self {
            fetcher,
            launcher: None,
            config,
        }
    }

    pub fn with_browser(mut self, launcher: Arc<dyn BrowserLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Check each target in order
    pub async fn run<F>(&self, targets: &[Url], mut on_event: F) -> Vec<TargetReport>
    where
        F: FnMut(RunEvent<'_>),
    {
        debug!(
            targets = targets.len(),
            checks = self.config.checks.len(),
            "Starting run"
        );

        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            let report = self.run_target(target, &mut on_event).await;
            on_event(RunEvent::TargetFinished(&report));
            reports.push(report);
        }
        reports
    }

    /// Check a single target, sharing one browser session between browser checks
    #[instrument(skip(self, target, on_event), fields(target = %target))]
    pub async fn run_target<F>(&self, target: &Url, on_event: &mut F) -> TargetReport
    where
        F: FnMut(RunEvent<'_>),
    {
        on_event(RunEvent::TargetStarted(target));

        let start = Instant::now();
        let mut session = SessionState::NotStarted;
        let mut reports = Vec::with_capacity(self.config.checks.len());

        for check in &self.config.checks {
            if check.needs_browser() && self.launcher.is_none() {
                debug!(check = %check, "No browser configured, skipping");
                continue;
            }

            on_event(RunEvent::CheckStarted(target, *check));
            let report = match self.run_check(*check, target, &mut session).await {
                Some(report) => report,
                None => continue,
            };
            on_event(RunEvent::CheckFinished(target, &report));
            reports.push(report);
        }

        if let SessionState::Ready(mut browser) = session {
            if let Err(e) = browser.close().await {
                warn!(error = %e, "Failed to close browser session");
            }
        }

        let duration = start.elapsed();
        debug!(elapsed_ms = duration.as_millis() as u64, "Target finished");

        TargetReport {
            target: target.clone(),
            reports,
            duration,
        }
    }

    async fn run_check(
        &self,
        check: CheckKind,
        target: &Url,
        session: &mut SessionState,
    ) -> Option<CheckReport> {
        let fetcher = self.fetcher.as_ref();
        let url = target.as_str();
        let config = &self.config;

        let report = match check {
            CheckKind::Content => inspect_content(fetcher, url).await,
            CheckKind::Images => {
                check_resources(fetcher, url, Resource::Images, config.probe_method).await
            }
            CheckKind::Links => {
                check_resources(fetcher, url, Resource::Links, config.probe_method).await
            }
            CheckKind::LoadTime => check_load_time(fetcher, url).await,
            CheckKind::Ssl => check_ssl(fetcher, url).await,
            CheckKind::PageSize => check_page_size(fetcher, url, config.page_size_limit_kb).await,
            CheckKind::Validation => {
                check_validation(fetcher, &config.validator_endpoint, url).await
            }
            CheckKind::Responsiveness | CheckKind::Console => {
                let launcher = self.launcher.as_ref()?;

                if let SessionState::NotStarted = session {
                    *session = match launcher.launch().await {
                        Ok(browser) => SessionState::Ready(browser),
                        Err(e) => {
                            warn!(error = %e, "Browser session unavailable");
                            SessionState::Failed(e)
                        }
                    };
                }

                match session {
                    SessionState::Ready(browser) => {
                        browser_check(check, browser.as_mut(), url, config).await
                    }
                    SessionState::Failed(e) => {
                        CheckReport::new(check, vec![session_error(check, url, e)])
                    }
                    SessionState::NotStarted => return None,
                }
            }
        };

        Some(report)
    }
}

async fn browser_check(
    check: CheckKind,
    session: &mut dyn BrowserSession,
    url: &str,
    config: &RunConfig,
) -> CheckReport {
    match check {
        CheckKind::Console => check_console(session, url, config.settle_delay).await,
        _ => check_responsiveness(session, url, &config.viewports, config.settle_delay).await,
    }
}
