//! Batch progress display for directory conversions

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many files of a batch have been converted
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    converted: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bar yet
    pub const fn new() -> Self {
        Self {
            bar: None,
            converted: 0,
        }
    }

    /// Show a bar for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show the file currently being converted
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(name.into_owned());
        }
    }

    /// Count a converted file
    pub fn complete_file(&mut self) {
        self.converted += 1;
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Close the bar with a summary
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(self.summary());
        }
    }

    /// `"N converted"`
    pub fn summary(&self) -> String {
        format!("{} converted", self.converted)
    }

    /// Number of files converted successfully
    pub const fn converted(&self) -> usize {
        self.converted
    }
}
