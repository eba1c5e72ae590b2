use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use subenum_core::ProgressCallback;

use super::progress::{clear_active_progress_bar, set_active_progress_bar};

/// Progress bar shown while the sources are queried.
///
/// Registered as the active bar so log lines print above it instead of
/// tearing it.
pub struct FanOutProgress {
    progress: ProgressBar,
}

impl FanOutProgress {
    pub fn new(message: &str, total: usize) -> Self {
        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner:.cyan} {msg} [{bar:20.cyan/blue}] {pos}/{len}")
                .expect("Progress bar template is hardcoded and should be valid")
                .progress_chars("█▓░"),
        );
        progress.set_message(message.to_string());
        progress.enable_steady_tick(Duration::from_millis(80));

        set_active_progress_bar(progress.clone());

        Self { progress }
    }

    /// Callback advancing the bar as each source completes.
    pub fn callback(&self) -> ProgressCallback {
        let progress = self.progress.clone();
        Box::new(move |completed, _total, _source| {
            progress.set_position(completed as u64);
        })
    }

    pub fn finish(&self) {
        clear_active_progress_bar();
        self.progress.finish_and_clear();
    }
}

impl Drop for FanOutProgress {
    fn drop(&mut self) {
        self.finish();
    }
}
