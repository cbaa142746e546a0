//! Output formatting and progress display

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

use crate::cli::args::VerbosityLevel;
use crate::core::entry::{QualityTier, VideoEntry, VideoStatus};
use crate::core::progress::BatchProgress;
use crate::download::BatchReport;

/// Output formatter for thumbgrab
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            progress_bar: Mutex::new(None),
        }
    }

    /// Create a progress bar for the batch download
    pub fn create_batch_bar(&self, total: u64) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let progress_bar = ProgressBar::new(total);
        progress_bar.set_style(style);
        progress_bar.set_message("Downloading...");

        *self.progress_bar.lock().unwrap() = Some(progress_bar);
    }

    /// Update the batch progress bar
    pub fn update_batch(&self, progress: &BatchProgress) {
        if let Some(progress_bar) = self.progress_bar.lock().unwrap().as_ref() {
            if progress.in_progress {
                progress_bar.set_position(progress.completed as u64);
                progress_bar.set_message(format!("{:.0}%", progress.percent));
            }
        }
    }

    /// Finish and clear the batch progress bar
    pub fn finish_batch(&self) {
        if let Some(progress_bar) = self.progress_bar.lock().unwrap().take() {
            progress_bar.finish_and_clear();
        }
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("ℹ️  {}", message);
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("✅ {}", message);
        }
    }

    /// Print warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("⚠️  {}", message);
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }

    /// Print debug message
    pub fn debug(&self, message: &str) {
        if self.verbosity == VerbosityLevel::Verbose {
            println!("🐛 {}", message);
        }
    }

    /// Print one resolved entry.
    ///
    /// Failed entries always print; the rest respect quiet mode.
    pub fn print_entry(&self, entry: &VideoEntry) {
        match entry.status {
            VideoStatus::Ready => {
                if self.verbosity != VerbosityLevel::Quiet {
                    println!("  {}  {}  {}", "ready ".green().bold(), entry.id, entry.title);
                }
            }
            VideoStatus::Failed => {
                eprintln!(
                    "  {}  {}  {}",
                    "failed".red().bold(),
                    entry.source_url,
                    entry.error.as_deref().unwrap_or("unknown error")
                );
            }
            VideoStatus::Pending => {
                if self.verbosity == VerbosityLevel::Verbose {
                    println!("  {}  {}", "pending".yellow(), entry.id);
                }
            }
        }
    }

    /// Print summary of a resolved submission
    pub fn print_submit_summary(&self, ready: usize, failed: usize) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!();
        if failed > 0 {
            println!(
                "📋 {} thumbnails ready, {} failed",
                ready.to_string().green(),
                failed.to_string().red()
            );
        } else {
            println!("📋 {} thumbnails ready for download", ready);
        }
    }

    /// Print batch download start message
    pub fn print_batch_start(&self, count: usize, tier: QualityTier) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!();
        println!(
            "🚀 Downloading {} thumbnails at {} ({})...",
            count,
            tier.label(),
            tier.description()
        );
    }

    /// Print the final batch report
    pub fn print_report(&self, report: &BatchReport, duration: Duration) {
        for failure in &report.failures {
            self.error(&format!("{}: {}", failure.filename, failure.reason));
        }

        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!(
            "✅ Downloaded {} thumbnails in {}",
            report.completed,
            format_duration(duration)
        );
        if !report.failures.is_empty() {
            println!("⚠️  {} downloads failed", report.failures.len());
        }
    }

    /// Print help text
    pub fn print_help(&self) {
        println!("Thumbgrab - YouTube Thumbnail Downloader");
        println!();
        println!("Usage: thumbgrab [OPTIONS] [URLS]...");
        println!();
        println!("Examples:");
        println!("  thumbgrab VIDEO_URL");
        println!("  thumbgrab --quality high --output ./thumbs VIDEO_URL PLAYLIST_URL");
        println!("  thumbgrab --input urls.txt --keep-going");
        println!("  thumbgrab --dry-run PLAYLIST_URL");
        println!();
        println!("For more information, run: thumbgrab --help");
    }
}

/// Format duration as human-readable string
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    if total_seconds < 60 {
        format!("{}s", total_seconds)
    } else if total_seconds < 3600 {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        if seconds == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m {}s", minutes, seconds)
        }
    } else {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        if minutes == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, minutes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_formatter_creation() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        assert_eq!(formatter.verbosity, VerbosityLevel::Normal);
        assert!(formatter.progress_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_create_batch_bar_quiet_mode() {
        let formatter = OutputFormatter::new(VerbosityLevel::Quiet);
        formatter.create_batch_bar(3);
        assert!(formatter.progress_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_create_batch_bar_normal_mode() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        formatter.create_batch_bar(3);
        assert!(formatter.progress_bar.lock().unwrap().is_some());
    }

    #[test]
    fn test_update_and_finish_batch() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        formatter.create_batch_bar(2);

        let mut progress = BatchProgress::new(2);
        progress.update(1);
        formatter.update_batch(&progress);

        formatter.finish_batch();
        assert!(formatter.progress_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_print_entry_does_not_panic() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);

        let mut ready = VideoEntry::pending("abc", "https://youtu.be/abc");
        ready.status = VideoStatus::Ready;
        ready.title = "Some Title".to_string();
        formatter.print_entry(&ready);

        formatter.print_entry(&VideoEntry::invalid("not a url"));
        formatter.print_entry(&VideoEntry::pending("def", "https://youtu.be/def"));
    }

    #[test]
    fn test_quiet_mode_messages() {
        let formatter = OutputFormatter::new(VerbosityLevel::Quiet);
        // These should not print anything in quiet mode
        formatter.info("test");
        formatter.success("test");
        formatter.warning("test");
        formatter.debug("test");
        formatter.print_submit_summary(1, 0);
        formatter.print_batch_start(1, QualityTier::Maxres);

        // Error should always print
        formatter.error("test");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(format_duration(Duration::from_secs(3660)), "1h 1m");
    }
}
