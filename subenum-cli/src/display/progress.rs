//! Routes tracing output through the active progress bar.
//!
//! While a bar is drawing, log lines written straight to stderr would
//! interleave with its redraws. The writer here prints through
//! `ProgressBar::println` whenever a bar is registered.

use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use indicatif::ProgressBar;

static ACTIVE_PROGRESS_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn active_slot() -> MutexGuard<'static, Option<ProgressBar>> {
    ACTIVE_PROGRESS_BAR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn set_active_progress_bar(pb: ProgressBar) {
    *active_slot() = Some(pb);
}

pub fn clear_active_progress_bar() {
    *active_slot() = None;
}

fn active_progress_bar() -> Option<ProgressBar> {
    active_slot().clone()
}

fn emit_line(line: &str) -> std::io::Result<()> {
    if let Some(pb) = active_progress_bar() {
        pb.println(line);
        Ok(())
    } else {
        let mut stderr = std::io::stderr();
        stderr.write_all(line.as_bytes())?;
        stderr.write_all(b"\n")
    }
}

/// Line-buffered writer that prints each complete line via [`emit_line`].
#[derive(Default)]
pub struct ProgressWriter {
    buffer: Vec<u8>,
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&line);
            emit_line(line.trim_end_matches('\n'))?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
            self.buffer.clear();
            if !line.is_empty() {
                emit_line(&line)?;
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

/// `MakeWriter` for tracing-subscriber producing [`ProgressWriter`]s.
#[derive(Default)]
pub struct ProgressWriterFactory;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ProgressWriterFactory {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressWriter::default()
    }
}
