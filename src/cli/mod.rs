//! CLI module for TubeMind.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// TubeMind - ask questions about YouTube videos
///
/// Fetches a video's captions, indexes them in memory, and answers questions
/// or writes summaries with timestamps pointing back into the video.
#[derive(Parser, Debug)]
#[command(name = "tubemind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ingest a video and ask one question about it
    Ask {
        /// YouTube URL or video ID
        video: String,

        /// The question to ask
        question: String,

        /// Target chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Ingest a video and summarize it
    Summarize {
        /// YouTube URL or video ID
        video: String,

        /// Summary style (brief, detailed, bullet_points)
        #[arg(short, long, default_value = "brief")]
        style: String,

        /// Target chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file if none exists
    Init,

    /// Show configuration file path
    Path,
}
