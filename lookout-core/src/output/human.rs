use std::time::Duration;

use chrono::TimeDelta;
use colored::Colorize;
use url::Url;

use crate::checks::{CheckReport, Finding, Symbol, Verdict};
use crate::colors::Palette;
use crate::runner::TargetReport;

fn format_duration(duration: TimeDelta) -> String {
    let total_secs = duration.num_seconds();
    if total_secs < 60 {
        format!("{}s", total_secs)
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = total_secs / 3600;
        let mins = (total_secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

/// Formats findings as emoji-prefixed lines
pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn paint(&self, symbol: Symbol, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        text.for_symbol(symbol).to_string()
    }

    fn detail(&self, text: &str) -> String {
        if self.use_colors {
            text.detail().to_string()
        } else {
            text.to_string()
        }
    }

    /// Section header printed before a target's checks
    pub fn format_target_header(&self, target: &Url) -> String {
        let text = format!("🔍 Checking {}...", target);
        if self.use_colors {
            format!("\n{}", text.heading())
        } else {
            format!("\n{}", text)
        }
    }

    pub fn format_finding(&self, finding: &Finding) -> String {
        let mut output = vec![format!(
            "{} {}",
            finding.symbol.as_str(),
            self.paint(finding.symbol, &finding.message)
        )];

        for item in &finding.details {
            output.push(format!("  - {}", self.detail(item)));
        }

        output.join("\n")
    }

    pub fn format_report(&self, report: &CheckReport) -> String {
        report
            .findings
            .iter()
            .map(|finding| self.format_finding(finding))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line tally across a whole run
    pub fn format_summary(&self, reports: &[TargetReport], elapsed: Duration) -> String {
        let checks: Vec<&CheckReport> = reports.iter().flat_map(|t| t.reports.iter()).collect();
        let count = |verdict: Verdict| checks.iter().filter(|r| r.verdict() == verdict).count();

        let elapsed = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX);
        let line = format!(
            "{} target(s), {} check(s) in {}: {} passed, {} warned, {} failed, {} errored",
            reports.len(),
            checks.len(),
            format_duration(elapsed),
            count(Verdict::Pass),
            count(Verdict::Warn),
            count(Verdict::Fail),
            count(Verdict::Error),
        );

        if !self.use_colors {
            return format!("\n{}", line);
        }

        let worst = checks
            .iter()
            .map(|r| r.verdict())
            .max()
            .unwrap_or(Verdict::Pass);
        format!("\n{}", line.for_verdict(worst).bold())
    }
}
