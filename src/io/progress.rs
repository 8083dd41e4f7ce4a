//! Batch progress display with a per-file stage message

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Pipeline step currently running for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Decoding the source image
    Loading,
    /// Segmentation, location and tiling
    Extracting,
    /// Encoding the outputs
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "loading",
            Self::Extracting => "extracting",
            Self::Writing => "writing",
        };
        f.write_str(label)
    }
}

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for a batch of input files
///
/// One bar counts finished files; its message names the file being worked
/// on and the stage it is in.
pub struct ProgressManager {
    bar: ProgressBar,
    current: String,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with an empty bar
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
            current: String::new(),
        }
    }

    /// Size the bar for the number of files in the batch
    pub fn initialize(&mut self, file_count: usize) {
        self.bar.set_length(file_count as u64);
        self.bar.set_style(BATCH_STYLE.clone());
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    /// Record the file now being processed
    pub fn start_file(&mut self, path: &Path) {
        self.current = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(self.current.clone());
    }

    /// Show which stage the current file has reached
    pub fn set_stage(&self, stage: Stage) {
        self.bar.set_message(format!("{}: {stage}", self.current));
    }

    /// Count the current file as done
    pub fn complete_file(&mut self) {
        self.bar.inc(1);
        self.current.clear();
    }

    /// Files completed so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
