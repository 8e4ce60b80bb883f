//! Configuration module for TubeMind.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::Prompts;
pub use settings::{
    CaptionSettings, ChunkingSettings, EmbeddingSettings, GenerationSettings, ProviderSettings,
    RetrievalSettings, ServerSettings, Settings,
};
