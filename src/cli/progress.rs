//! Terminal progress bar for bulk runs.

use email_verdict_core::{Progress, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives an indicatif bar from batch progress reports.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new(total: usize, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
        bar.set_style(style);
        bar.set_message("verifying");
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ProgressSink for BarSink {
    fn report(&mut self, progress: Progress) {
        self.bar.set_length(progress.total as u64);
        self.bar.set_position(progress.completed as u64);
    }
}
