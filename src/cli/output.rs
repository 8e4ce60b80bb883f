//! CLI output formatting utilities.

use crate::rag::{KeyPoint, SourceRef};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a cited source with a link into the video.
    pub fn source(video_id: &str, source: &SourceRef) {
        println!(
            "\n{} {}",
            style(">>").green(),
            style(&source.timestamp).cyan().bold()
        );
        println!("   {}", source.text.replace('\n', " "));
        println!("   {}", style(watch_url(video_id, source.start_time)).dim());
    }

    /// Print a summary key point.
    pub fn key_point(point: &KeyPoint) {
        println!(
            "  {} [{}] {}",
            style("*").cyan(),
            style(&point.timestamp).cyan(),
            point.point.replace('\n', " ")
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// YouTube link that starts playback at `seconds`.
pub fn watch_url(video_id: &str, seconds: f64) -> String {
    format!(
        "https://youtube.com/watch?v={}&t={}s",
        video_id,
        seconds.max(0.0) as u64
    )
}
