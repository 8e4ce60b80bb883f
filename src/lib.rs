//! TubeMind - question answering over YouTube captions
//!
//! Fetches a video's caption track, splits it into timestamped chunks,
//! embeds the chunks into an in-memory vector index, and answers questions
//! or writes summaries grounded in the retrieved excerpts.
//!
//! # Architecture
//!
//! - `captions` - Video id parsing and caption track retrieval
//! - `chunking` - Greedy time-aligned chunking of caption segments
//! - `embedding` - Batched embedding client and providers
//! - `vector_store` - Exact L2 nearest-neighbour index
//! - `generation` - Text generation providers
//! - `rag` - Retrieval, context assembly, and prompting
//! - `session` - Per-video index registry
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tubemind::config::Settings;
//! use tubemind::orchestrator::Orchestrator;
//! use tubemind::session::SessionStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings, Arc::new(SessionStore::new()))?;
//!
//!     let report = orchestrator.ingest("https://youtu.be/dQw4w9WgXcQ", None).await?;
//!     let response = orchestrator.ask(&report.video_id, "What is this about?").await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod session;
pub mod vector_store;

#[cfg(test)]
mod test_utils;

pub use error::{Result, TubeMindError};
