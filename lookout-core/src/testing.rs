//! In-memory transport and browser used by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::browser::{BrowserLauncher, BrowserSession, ConsoleEntry, Viewport};
use crate::error::{LookoutError, Result};
use crate::fetch::{FetchMethod, FetchResult, Fetcher};

#[derive(Debug, Clone)]
enum Route {
    Respond {
        status: u16,
        body: String,
        final_url: Option<String>,
    },
    Fail(String),
}

/// Fetcher answering from a fixed route table; unknown URLs fail to connect
#[derive(Debug, Default)]
pub struct MockFetcher {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<(FetchMethod, String)>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, body: &str) -> Self {
        self.status(url, 200, body)
    }

    pub fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond {
                status,
                body: body.to_string(),
                final_url: None,
            },
        );
        self
    }

    pub fn redirect(mut self, url: &str, final_url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond {
                status: 200,
                body: body.to_string(),
                final_url: Some(final_url.to_string()),
            },
        );
        self
    }

    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.routes
            .insert(url.to_string(), Route::Fail(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<(FetchMethod, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|(_, u)| u == url).count()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, method: FetchMethod, url: &str) -> Result<FetchResult> {
        self.requests.lock().unwrap().push((method, url.to_string()));

        match self.routes.get(url) {
            Some(Route::Respond {
                status,
                body,
                final_url,
            }) => {
                let final_url = final_url.as_deref().unwrap_or(url);
                let body = match method {
                    FetchMethod::Get => body.clone().into_bytes(),
                    FetchMethod::Head => Vec::new(),
                };
                Ok(FetchResult {
                    status: *status,
                    final_url: Url::parse(final_url)?,
                    body,
                    elapsed: Duration::from_millis(120),
                    headers: vec![("content-type".to_string(), "text/html".to_string())],
                })
            }
            Some(Route::Fail(message)) => Err(LookoutError::Other(message.clone())),
            None => Err(LookoutError::Other(format!(
                "error sending request for url ({}): connection refused",
                url
            ))),
        }
    }
}

/// What happened to the fake browser, shared with the test after the run
#[derive(Debug, Default)]
pub struct BrowserJournal {
    pub launches: usize,
    pub closes: usize,
    pub viewports: Vec<Viewport>,
    pub navigations: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeLauncher {
    journal: Arc<Mutex<BrowserJournal>>,
    console: Vec<ConsoleEntry>,
    fail_launch: Option<String>,
    fail_navigation_after: Option<usize>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_console(mut self, entries: Vec<ConsoleEntry>) -> Self {
        self.console = entries;
        self
    }

    pub fn failing_launch(mut self, message: &str) -> Self {
        self.fail_launch = Some(message.to_string());
        self
    }

    /// Let `count` navigations succeed, then fail every later one
    pub fn failing_navigation_after(mut self, count: usize) -> Self {
        self.fail_navigation_after = Some(count);
        self
    }

    pub fn journal(&self) -> Arc<Mutex<BrowserJournal>> {
        self.journal.clone()
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        if let Some(ref message) = self.fail_launch {
            return Err(LookoutError::BrowserLaunch(message.clone()));
        }
        self.journal.lock().unwrap().launches += 1;
        Ok(Box::new(FakeSession {
            journal: self.journal.clone(),
            console: self.console.clone(),
            fail_navigation_after: self.fail_navigation_after,
        }))
    }
}

struct FakeSession {
    journal: Arc<Mutex<BrowserJournal>>,
    console: Vec<ConsoleEntry>,
    fail_navigation_after: Option<usize>,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.journal.lock().unwrap().viewports.push(viewport);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        let mut journal = self.journal.lock().unwrap();
        if let Some(limit) = self.fail_navigation_after {
            if journal.navigations.len() >= limit {
                return Err(LookoutError::Navigation {
                    url: url.to_string(),
                    message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
                });
            }
        }
        journal.navigations.push(url.to_string());
        Ok(())
    }

    async fn console_entries(&mut self) -> Result<Vec<ConsoleEntry>> {
        Ok(self.console.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.journal.lock().unwrap().closes += 1;
        Ok(())
    }
}
