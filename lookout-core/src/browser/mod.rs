//! Headless browser sessions
//!
//! A [`BrowserLauncher`] hands out [`BrowserSession`]s; the runner acquires
//! one session per target, runs every browser-dependent check against it and
//! closes it afterwards whatever the outcome.

mod chromium;

pub use chromium::{ChromiumLauncher, ChromiumSession};

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

/// Browser window dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Emulate a touch device
    pub mobile: bool,
}

impl Viewport {
    pub const PHONE: Viewport = Viewport {
        width: 375,
        height: 812,
        mobile: true,
    };
    pub const TABLET: Viewport = Viewport {
        width: 768,
        height: 1024,
        mobile: false,
    };
    pub const DESKTOP: Viewport = Viewport {
        width: 1366,
        height: 768,
        mobile: false,
    };

    /// Sizes exercised by the responsiveness check
    pub fn defaults() -> Vec<Viewport> {
        vec![Self::PHONE, Self::TABLET, Self::DESKTOP]
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Console severity, using the WebDriver log level names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Severe,
    Warning,
    Info,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleLevel::Severe => write!(f, "SEVERE"),
            ConsoleLevel::Warning => write!(f, "WARNING"),
            ConsoleLevel::Info => write!(f, "INFO"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub level: ConsoleLevel,
    pub message: String,
}

impl ConsoleEntry {
    pub fn new(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn is_severe(&self) -> bool {
        self.level == ConsoleLevel::Severe
    }
}

#[async_trait]
pub trait BrowserSession: Send {
    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Navigate and wait for the load event. Clears previously captured console entries.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Console entries captured since the last navigation
    async fn console_entries(&mut self) -> Result<Vec<ConsoleEntry>>;

    /// Shut the browser down. The session must not be used afterwards.
    async fn close(&mut self) -> Result<()>;
}

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}
