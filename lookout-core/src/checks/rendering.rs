use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, instrument};

use super::types::{CheckKind, CheckReport, Finding};
use crate::browser::{BrowserSession, Viewport};
use crate::error::{LookoutError, Result};

/// Time given to a page after navigation before it is inspected
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Load the page at each viewport size.
///
/// No layout property is asserted; a size passes once navigation completes.
/// The first failure ends the check, keeping the lines already produced.
#[instrument(skip(session, viewports))]
pub async fn check_responsiveness(
    session: &mut dyn BrowserSession,
    url: &str,
    viewports: &[Viewport],
    settle: Duration,
) -> CheckReport {
    let mut findings = Vec::with_capacity(viewports.len());

    for viewport in viewports {
        match load_at(session, url, *viewport, settle).await {
            Ok(()) => findings.push(Finding::responsive(format!(
                "Checked responsiveness for {} at {}.",
                url, viewport
            ))),
            Err(e) => {
                findings.push(session_error(CheckKind::Responsiveness, url, &e));
                break;
            }
        }
    }

    CheckReport::new(CheckKind::Responsiveness, findings)
}

async fn load_at(
    session: &mut dyn BrowserSession,
    url: &str,
    viewport: Viewport,
    settle: Duration,
) -> Result<()> {
    session.set_viewport(viewport).await?;
    session.navigate(url).await?;
    sleep(settle).await;
    Ok(())
}

/// Navigate once more and fail on any SEVERE console entry
#[instrument(skip(session))]
pub async fn check_console(
    session: &mut dyn BrowserSession,
    url: &str,
    settle: Duration,
) -> CheckReport {
    let finding = match collect_severe(session, url, settle).await {
        Ok(errors) if errors.is_empty() => {
            Finding::all_clear(format!("No JavaScript errors found on {}.", url))
        }
        Ok(errors) => {
            Finding::fail(format!("JavaScript Errors found on {}:", url)).with_details(errors)
        }
        Err(e) => session_error(CheckKind::Console, url, &e),
    };

    CheckReport::new(CheckKind::Console, vec![finding])
}

async fn collect_severe(
    session: &mut dyn BrowserSession,
    url: &str,
    settle: Duration,
) -> Result<Vec<String>> {
    session.navigate(url).await?;
    sleep(settle).await;

    let entries = session.console_entries().await?;
    debug!(total = entries.len(), "Collected console entries");

    Ok(entries
        .into_iter()
        .filter(|entry| entry.is_severe())
        .map(|entry| entry.message)
        .collect())
}

/// Error line for a browser check that could not run to completion
pub fn session_error(check: CheckKind, url: &str, error: &LookoutError) -> Finding {
    let message = match check {
        CheckKind::Console => format!("Error checking JavaScript errors for {}: {}", url, error),
        _ => format!("Error checking mobile responsiveness for {}: {}", url, error),
    };
    Finding::error(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserLauncher, ConsoleEntry, ConsoleLevel};
    use crate::checks::types::{Symbol, Verdict};
    use crate::testing::FakeLauncher;

    const URL: &str = "https://example.com/";

    #[tokio::test]
    async fn test_responsiveness_visits_every_viewport() {
        let launcher = FakeLauncher::new();
        let journal = launcher.journal();
        let mut session = launcher.launch().await.unwrap();

        let report =
            check_responsiveness(session.as_mut(), URL, &Viewport::defaults(), Duration::ZERO)
                .await;

        let messages: Vec<&str> = report.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Checked responsiveness for https://example.com/ at 375x812.",
                "Checked responsiveness for https://example.com/ at 768x1024.",
                "Checked responsiveness for https://example.com/ at 1366x768.",
            ]
        );
        assert!(report.findings.iter().all(|f| f.symbol == Symbol::Responsive));

        let journal = journal.lock().unwrap();
        assert_eq!(journal.viewports, Viewport::defaults());
        assert_eq!(journal.navigations.len(), 3);
    }

    #[tokio::test]
    async fn test_responsiveness_stops_at_first_navigation_error() {
        let launcher = FakeLauncher::new().failing_navigation_after(1);
        let mut session = launcher.launch().await.unwrap();

        let report =
            check_responsiveness(session.as_mut(), URL, &Viewport::defaults(), Duration::ZERO)
                .await;

        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0].symbol, Symbol::Responsive);
        assert_eq!(report.findings[1].verdict, Verdict::Error);
        assert!(report.findings[1]
            .message
            .starts_with("Error checking mobile responsiveness for https://example.com/:"));
        assert_eq!(report.verdict(), Verdict::Error);
    }

    #[tokio::test]
    async fn test_console_without_severe_entries_passes() {
        let launcher = FakeLauncher::new().with_console(vec![
            ConsoleEntry::new(ConsoleLevel::Warning, "deprecated API"),
            ConsoleEntry::new(ConsoleLevel::Info, "hello"),
        ]);
        let mut session = launcher.launch().await.unwrap();

        let report = check_console(session.as_mut(), URL, Duration::ZERO).await;

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].symbol, Symbol::AllClear);
        assert_eq!(
            report.findings[0].message,
            "No JavaScript errors found on https://example.com/."
        );
    }

    #[tokio::test]
    async fn test_console_lists_every_severe_entry() {
        let launcher = FakeLauncher::new().with_console(vec![
            ConsoleEntry::new(ConsoleLevel::Severe, "Uncaught TypeError: x is undefined"),
            ConsoleEntry::new(ConsoleLevel::Warning, "deprecated API"),
            ConsoleEntry::new(ConsoleLevel::Severe, "Failed to load resource: 404"),
        ]);
        let mut session = launcher.launch().await.unwrap();

        let report = check_console(session.as_mut(), URL, Duration::ZERO).await;

        let finding = &report.findings[0];
        assert_eq!(finding.verdict, Verdict::Fail);
        assert_eq!(finding.message, "JavaScript Errors found on https://example.com/:");
        assert_eq!(
            finding.details,
            vec![
                "Uncaught TypeError: x is undefined".to_string(),
                "Failed to load resource: 404".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_console_navigation_error() {
        let launcher = FakeLauncher::new().failing_navigation_after(0);
        let mut session = launcher.launch().await.unwrap();

        let report = check_console(session.as_mut(), URL, Duration::ZERO).await;

        assert_eq!(report.verdict(), Verdict::Error);
        assert!(report.findings[0]
            .message
            .starts_with("Error checking JavaScript errors for https://example.com/:"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_delay_is_awaited() {
        let launcher = FakeLauncher::new();
        let mut session = launcher.launch().await.unwrap();
        let start = tokio::time::Instant::now();

        check_console(session.as_mut(), URL, DEFAULT_SETTLE_DELAY).await;

        assert!(start.elapsed() >= DEFAULT_SETTLE_DELAY);
    }
}
