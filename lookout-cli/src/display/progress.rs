//! Log routing around the active spinner.
//!
//! tracing output goes to stderr, the same stream the spinner draws on. While a
//! spinner is active every log line is printed through it instead.

use indicatif::ProgressBar;
use std::io::Write;
use std::sync::Mutex;

static ACTIVE_SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub fn set_active_spinner(pb: ProgressBar) {
    if let Ok(mut guard) = ACTIVE_SPINNER.lock() {
        *guard = Some(pb);
    }
}

pub fn clear_active_spinner() {
    if let Ok(mut guard) = ACTIVE_SPINNER.lock() {
        *guard = None;
    }
}

fn active_spinner() -> Option<ProgressBar> {
    ACTIVE_SPINNER.lock().ok().and_then(|guard| guard.clone())
}

fn emit(line: &str) -> std::io::Result<()> {
    match active_spinner() {
        Some(pb) => {
            pb.suspend(|| eprintln!("{}", line));
            Ok(())
        }
        None => {
            let mut stderr = std::io::stderr();
            stderr.write_all(line.as_bytes())?;
            stderr.write_all(b"\n")
        }
    }
}

/// Line-buffered writer that defers to the active spinner
pub struct ProgressWriter {
    buffer: Vec<u8>,
}

impl ProgressWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }
}

impl Default for ProgressWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            let line_str = String::from_utf8_lossy(&line);
            emit(line_str.trim_end_matches('\n'))?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let line_str = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer.clear();
            let trimmed = line_str.trim_end();
            if !trimmed.is_empty() {
                emit(trimmed)?;
            }
        }
        Ok(())
    }
}

impl Drop for ProgressWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// `MakeWriter` handing tracing-subscriber a fresh [`ProgressWriter`] per event
pub struct ProgressWriterFactory;

impl ProgressWriterFactory {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProgressWriterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ProgressWriterFactory {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressWriter::new()
    }
}
