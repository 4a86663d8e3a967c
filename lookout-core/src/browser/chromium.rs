use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::log::{
    EnableParams as LogEnableParams, EventEntryAdded, LogEntryLevel,
};
use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EnableParams as RuntimeEnableParams, EventConsoleApiCalled,
    EventExceptionThrown, RemoteObject,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use super::{BrowserLauncher, BrowserSession, ConsoleEntry, ConsoleLevel, Viewport};
use crate::error::{LookoutError, Result};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type ConsoleBuffer = Arc<Mutex<Vec<ConsoleEntry>>>;

/// Launches headless Chrome/Chromium over the DevTools protocol
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    executable: Option<PathBuf>,
    sandbox: bool,
    request_timeout: Duration,
}

impl Default for ChromiumLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromiumLauncher {
    pub fn new() -> Self {
        Self {
            executable: None,
            sandbox: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Use a specific Chrome binary instead of searching the usual locations
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Run without the Chrome sandbox (needed inside most containers)
    pub fn without_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Upper bound for a single DevTools command, navigation included
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(self.request_timeout)
            .window_size(Viewport::DESKTOP.width, Viewport::DESKTOP.height);

        if !self.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = self.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(LookoutError::BrowserLaunch)
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    #[instrument(skip(self))]
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let config = self.config()?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| LookoutError::BrowserLaunch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "Failed to close browser after setup error");
                }
                handler_task.abort();
                return Err(LookoutError::BrowserLaunch(e.to_string()));
            }
        };

        let mut session = ChromiumSession {
            browser,
            page,
            console: Arc::new(Mutex::new(Vec::new())),
            tasks: vec![handler_task],
            closed: false,
        };

        if let Err(e) = session.capture_console().await {
            if let Err(close_err) = session.close().await {
                warn!(error = %close_err, "Failed to close browser after setup error");
            }
            return Err(e);
        }

        debug!("Browser session ready");
        Ok(Box::new(session))
    }
}

/// One browser process with a single tab
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    console: ConsoleBuffer,
    tasks: Vec<JoinHandle<()>>,
    closed: bool,
}

impl ChromiumSession {
    /// Enable the Log domain and subscribe to every event that carries console output
    async fn capture_console(&mut self) -> Result<()> {
        self.page
            .execute(LogEnableParams::default())
            .await
            .map_err(|e| LookoutError::BrowserError(e.to_string()))?;
        self.page
            .execute(RuntimeEnableParams::default())
            .await
            .map_err(|e| LookoutError::BrowserError(e.to_string()))?;

        let mut log_events = self
            .page
            .event_listener::<EventEntryAdded>()
            .await
            .map_err(|e| LookoutError::BrowserError(e.to_string()))?;
        let buffer = self.console.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = log_events.next().await {
                let entry = &event.entry;
                let message = match entry.url {
                    Some(ref url) => format!("{} - {}", url, entry.text),
                    None => entry.text.clone(),
                };
                record(&buffer, ConsoleEntry::new(log_level(&entry.level), message));
            }
        }));

        let mut api_events = self
            .page
            .event_listener::<EventConsoleApiCalled>()
            .await
            .map_err(|e| LookoutError::BrowserError(e.to_string()))?;
        let buffer = self.console.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = api_events.next().await {
                let message = event
                    .args
                    .iter()
                    .map(remote_object_text)
                    .collect::<Vec<_>>()
                    .join(" ");
                record(&buffer, ConsoleEntry::new(api_level(&event.r#type), message));
            }
        }));

        let mut exception_events = self
            .page
            .event_listener::<EventExceptionThrown>()
            .await
            .map_err(|e| LookoutError::BrowserError(e.to_string()))?;
        let buffer = self.console.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = exception_events.next().await {
                let details = &event.exception_details;
                let message = match details.exception {
                    Some(ref exception) => {
                        format!("{} {}", details.text, remote_object_text(exception))
                    }
                    None => details.text.clone(),
                };
                record(&buffer, ConsoleEntry::new(ConsoleLevel::Severe, message));
            }
        }));

        Ok(())
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            1.0,
            viewport.mobile,
        );
        self.page
            .execute(params)
            .await
            .map_err(|e| LookoutError::BrowserError(e.to_string()))?;
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        if let Ok(mut entries) = self.console.lock() {
            entries.clear();
        }

        self.page
            .goto(url)
            .await
            .map_err(|e| LookoutError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn console_entries(&mut self) -> Result<Vec<ConsoleEntry>> {
        self.console
            .lock()
            .map(|entries| entries.clone())
            .map_err(|_| LookoutError::BrowserError("Console buffer lock poisoned".to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = self
            .browser
            .close()
            .await
            .map_err(|e| LookoutError::BrowserError(e.to_string()));
        if result.is_ok() {
            if let Err(e) = self.browser.wait().await {
                warn!(error = %e, "Browser process did not exit cleanly");
            }
        }
        self.abort_tasks();
        result.map(|_| ())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        // Dropping `Browser` kills the child process; only the event tasks need stopping.
        self.abort_tasks();
    }
}

fn record(buffer: &ConsoleBuffer, entry: ConsoleEntry) {
    if let Ok(mut entries) = buffer.lock() {
        entries.push(entry);
    }
}

fn log_level(level: &LogEntryLevel) -> ConsoleLevel {
    match level {
        LogEntryLevel::Error => ConsoleLevel::Severe,
        LogEntryLevel::Warning => ConsoleLevel::Warning,
        _ => ConsoleLevel::Info,
    }
}

fn api_level(kind: &ConsoleApiCalledType) -> ConsoleLevel {
    match kind {
        ConsoleApiCalledType::Error | ConsoleApiCalledType::Assert => ConsoleLevel::Severe,
        ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
        _ => ConsoleLevel::Info,
    }
}

fn remote_object_text(object: &RemoteObject) -> String {
    if let Some(ref value) = object.value {
        return match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        };
    }
    object
        .description
        .as_deref()
        .and_then(|d| d.lines().next())
        .unwrap_or_default()
        .to_string()
}
