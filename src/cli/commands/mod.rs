//! CLI command implementations.

mod ask;
mod config;
mod serve;
mod summarize;

pub use ask::run_ask;
pub use config::run_config;
pub use serve::run_serve;
pub use summarize::run_summarize;
