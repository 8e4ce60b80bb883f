//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::rag::SummaryStyle;
use crate::session::SessionStore;
use anyhow::Result;
use std::sync::Arc;

/// Run the summarize command: ingest the video, then summarize it.
pub async fn run_summarize(
    video: &str,
    style: &str,
    chunk_size: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let style: SummaryStyle = style.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    if let Err(e) = preflight::check(Operation::Ingest, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings, Arc::new(SessionStore::new()))?;

    let spinner = Output::spinner("Fetching captions and building index...");
    let report = match orchestrator.ingest(video, chunk_size).await {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to ingest video: {}", e));
            return Err(e.into());
        }
    };

    spinner.set_message(format!("Writing {} summary...", style));
    let result = orchestrator.summarize(&report.video_id, style).await;
    spinner.finish_and_clear();

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            Output::error(&format!("Failed to generate summary: {}", e));
            return Err(e.into());
        }
    };

    println!("\n{}\n", response.summary);

    if !response.key_points.is_empty() {
        Output::header("Key points");
        for point in &response.key_points {
            Output::key_point(point);
        }
    }

    if !response.sources.is_empty() {
        Output::header("Sources");
        for source in &response.sources {
            Output::source(&report.video_id, source);
        }
    }

    Ok(())
}
