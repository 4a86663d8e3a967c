mod display;

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use lookout_core::colors::Palette;
use lookout_core::{
    normalize_targets, ChromiumLauncher, FetchMethod, HttpFetcher, HumanFormatter, Profile,
    RunConfig, RunEvent, Runner, TargetReport,
};
use tracing_subscriber::EnvFilter;

use display::{ProgressWriterFactory, Spinner};

const SEO_DEFAULT_TARGETS: &[&str] = &["https://cems-solarexpo.com"];
const AUDIT_DEFAULT_TARGETS: &[&str] = &[
    "https://cems-solarexpo.com",
    "https://cems-apparelsourcing.com",
];

#[derive(Parser)]
#[command(name = "lookout")]
#[command(about = "Website checklist runner - SEO metadata, broken links, speed, and rendering")]
#[command(version)]
struct Cli {
    /// URLs to check (scheme defaults to https)
    urls: Vec<String>,

    /// Check profile (seo or audit)
    #[arg(short, long, default_value = "audit")]
    profile: String,

    /// Page size limit in KB (defaults to the profile's limit)
    #[arg(long)]
    page_size_limit: Option<f64>,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// Seconds to wait after each browser navigation
    #[arg(long, default_value_t = 3)]
    settle: u64,

    /// Skip responsiveness and console checks
    #[arg(long)]
    no_browser: bool,

    /// Path to a Chrome or Chromium executable
    #[arg(long)]
    chrome: Option<String>,

    /// Launch the browser without its sandbox (needed when running as root)
    #[arg(long)]
    no_sandbox: bool,

    /// Markup validator endpoint
    #[arg(long)]
    validator: Option<String>,

    /// Probe links and images with HEAD instead of GET
    #[arg(long)]
    head: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with status 1 if any check failed or errored
    #[arg(long)]
    strict: bool,

    /// Print a tally line after the run
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(ProgressWriterFactory::new())
        .init();

    let cli = Cli::parse();

    let use_colors = !cli.no_color && std::io::stdout().is_terminal();
    if !use_colors {
        colored::control::set_override(false);
    }

    let profile: Profile = cli.profile.parse().map_err(anyhow::Error::msg)?;

    let raw_targets: Vec<String> = if cli.urls.is_empty() {
        default_targets(profile)
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        cli.urls.clone()
    };

    let targets = match normalize_targets(&raw_targets) {
        Ok(targets) => targets,
        Err(e) => {
            eprintln!("{} {}", "Error:".bad(), e);
            std::process::exit(1);
        }
    };

    tracing::debug!(profile = ?profile, targets = targets.len(), "Resolved targets");

    let config = build_config(&cli, profile);
    let fetcher = Arc::new(HttpFetcher::with_timeout(Duration::from_secs(cli.timeout))?);
    let mut runner = Runner::new(fetcher, config);
    if !cli.no_browser && runner.config().needs_browser() {
        runner = runner.with_browser(Arc::new(build_launcher(&cli)));
    }

    let formatter = if use_colors {
        HumanFormatter::new()
    } else {
        HumanFormatter::new().without_colors()
    };

    let started = Instant::now();
    let mut spinner: Option<Spinner> = None;
    let reports = runner
        .run(&targets, |event| match event {
            RunEvent::TargetStarted(target) => {
                println!("{}", formatter.format_target_header(target));
                spinner = Some(Spinner::new(&format!("Checking {}...", target)));
            }
            RunEvent::CheckStarted(target, check) => {
                if let Some(s) = &spinner {
                    s.set_message(&format!("Running {} on {}...", check, target));
                }
            }
            RunEvent::CheckFinished(_, report) => {
                let text = formatter.format_report(report);
                if text.is_empty() {
                    return;
                }
                match &spinner {
                    Some(s) => s.println(&text),
                    None => println!("{}", text),
                }
            }
            RunEvent::TargetFinished(_) => {
                if let Some(s) = spinner.take() {
                    s.finish();
                }
            }
        })
        .await;

    if cli.summary {
        println!("{}", formatter.format_summary(&reports, started.elapsed()));
    }

    let code = exit_code(cli.strict, &reports);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

fn default_targets(profile: Profile) -> &'static [&'static str] {
    match profile {
        Profile::Seo => SEO_DEFAULT_TARGETS,
        Profile::Audit => AUDIT_DEFAULT_TARGETS,
    }
}

/// Non-zero only in strict mode, when some check failed or errored
fn exit_code(strict: bool, reports: &[TargetReport]) -> i32 {
    if strict && reports.iter().any(TargetReport::has_failures) {
        1
    } else {
        0
    }
}

fn build_config(cli: &Cli, profile: Profile) -> RunConfig {
    let mut config =
        RunConfig::for_profile(profile).with_settle_delay(Duration::from_secs(cli.settle));

    if let Some(limit) = cli.page_size_limit {
        config = config.with_page_size_limit(limit);
    }
    if let Some(endpoint) = &cli.validator {
        config = config.with_validator_endpoint(endpoint.clone());
    }
    if cli.head {
        config = config.with_probe_method(FetchMethod::Head);
    }
    config
}

fn build_launcher(cli: &Cli) -> ChromiumLauncher {
    let mut launcher = ChromiumLauncher::new();
    if let Some(path) = &cli.chrome {
        launcher = launcher.with_executable(path);
    }
    if cli.no_sandbox {
        launcher = launcher.without_sandbox();
    }
    launcher
}
