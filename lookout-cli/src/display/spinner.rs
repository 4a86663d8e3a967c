use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::progress::{clear_active_spinner, set_active_spinner};

/// Spinner on stderr while a target is being checked.
///
/// While it is alive, log lines are routed through it so they don't tear the display.
pub struct Spinner {
    progress: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let progress = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        progress.set_style(style);
        progress.set_message(message.to_string());
        progress.enable_steady_tick(Duration::from_millis(80));
        set_active_spinner(progress.clone());

        Self { progress }
    }

    pub fn set_message(&self, message: &str) {
        self.progress.set_message(message.to_string());
    }

    /// Print to stdout without the spinner line getting in the way
    pub fn println(&self, text: &str) {
        self.progress.suspend(|| println!("{}", text));
    }

    pub fn finish(&self) {
        clear_active_spinner();
        self.progress.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}
