//! Progress reporting module

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for the output-directory scan
pub struct ScanProgress {
    progress_bar: Option<ProgressBar>,
}

impl ScanProgress {
    /// Create a reporter; quiet mode renders nothing.
    pub fn new(quiet: bool, total_files: u64) -> Self {
        if quiet || total_files == 0 {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new(total_files);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} scanned {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    /// Record one scanned file and the number of hashes it contributed.
    pub fn file_scanned(&self, filename: &str, hashes: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{filename}: {hashes} hashes"));
            pb.inc(1);
        }
    }

    /// Finish the scan display.
    pub fn finish(&self, total_hashes: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{total_hashes} existing hashes"));
        }
    }
}
