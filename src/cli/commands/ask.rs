//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::session::SessionStore;
use anyhow::Result;
use std::sync::Arc;

/// Run the ask command: ingest the video, then answer one question.
pub async fn run_ask(
    video: &str,
    question: &str,
    chunk_size: Option<usize>,
    settings: Settings,
) -> Result<()> {
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

    spinner.set_message("Searching transcript...");
    let result = orchestrator.ask(&report.video_id, question).await;
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            println!("\n{}\n", response.answer);

            if !response.sources.is_empty() {
                Output::header("Sources");
                for source in &response.sources {
                    Output::source(&report.video_id, source);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
