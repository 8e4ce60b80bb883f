//! Pipeline orchestrator for TubeMind.
//!
//! Coordinates ingestion (captions → chunks → embeddings → index) and the
//! query operations that run against the stored indexes.

use crate::captions::{extract_video_id, CaptionSource, YoutubeCaptions};
use crate::chunking::chunk_segments;
use crate::config::Settings;
use crate::embedding::{EmbeddingClient, EmbeddingProvider, OpenAIEmbedder};
use crate::error::{Result, TubeMindError};
use crate::generation::{OpenAIGenerator, TextGenerator};
use crate::openai::create_client;
use crate::rag::{
    AnswerGenerator, AskResponse, KeyPoint, Retriever, SourceRef, SummaryResponse, SummaryStyle,
    MAX_KEY_POINTS,
};
use crate::session::SessionStore;
use crate::vector_store::{SearchResult, VectorIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// The main orchestrator for the TubeMind pipeline.
pub struct Orchestrator {
    settings: Settings,
    captions: Arc<dyn CaptionSource>,
    embedder: EmbeddingClient,
    retriever: Retriever,
    answerer: AnswerGenerator,
    sessions: Arc<SessionStore>,
    ingest_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Orchestrator {
    /// Create an orchestrator backed by the configured remote providers.
    pub fn new(settings: Settings, sessions: Arc<SessionStore>) -> Result<Self> {
        settings.validate()?;
        let api_key = settings.api_key()?;
        let client = create_client(&settings.provider, &api_key)?;

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAIEmbedder::new(
            client.clone(),
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));
        let generator: Arc<dyn TextGenerator> =
            Arc::new(OpenAIGenerator::new(client, &settings.generation.model));
        let captions: Arc<dyn CaptionSource> = Arc::new(YoutubeCaptions::new(
            &settings.captions,
            settings.cookies_path(),
        ));

        info!(
            "Using {} for embeddings and {} for generation via {}",
            settings.embedding.model, settings.generation.model, settings.provider.api_base
        );

        Ok(Self::with_components(
            settings, captions, embedder, generator, sessions,
        ))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        captions: Arc<dyn CaptionSource>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        let embedder = EmbeddingClient::from_settings(embedder, &settings.embedding);
        let retriever = Retriever::new(embedder.clone());
        let answerer = AnswerGenerator::new(generator)
            .with_settings(&settings.generation)
            .with_prompts(settings.prompts.clone())
            .with_context_char_limit(settings.retrieval.context_char_limit);

        Self {
            settings,
            captions,
            embedder,
            retriever,
            answerer,
            sessions,
            ingest_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the session store.
    pub fn sessions(&self) -> Arc<SessionStore> {
        self.sessions.clone()
    }

    async fn ingest_lock(&self, video_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.ingest_locks.lock().await;
        locks
            .entry(video_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the per-video lock once no other ingest holds or awaits it.
    async fn release_ingest_lock(&self, video_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.ingest_locks.lock().await;
        drop(lock);
        if locks
            .get(video_id)
            .is_some_and(|l| Arc::strong_count(l) == 1)
        {
            locks.remove(video_id);
        }
    }

    /// Ingest a video: fetch captions, chunk, embed, and store a fresh index.
    ///
    /// `target_chunk_size` defaults to `chunking.target_chars`. Nothing is
    /// stored unless every step succeeds. Ingests of the same video run one
    /// at a time.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn ingest(
        &self,
        input: &str,
        target_chunk_size: Option<usize>,
    ) -> Result<IngestReport> {
        let video_id = extract_video_id(input)?;
        let target = target_chunk_size.unwrap_or(self.settings.chunking.target_chars);
        if target == 0 {
            return Err(TubeMindError::InvalidInput(
                "chunk size must be positive".to_string(),
            ));
        }

        let lock = self.ingest_lock(&video_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.build_and_store(&video_id, target).await
        };
        self.release_ingest_lock(&video_id, lock).await;
        result
    }

    async fn build_and_store(&self, video_id: &str, target: usize) -> Result<IngestReport> {
        info!("Fetching transcript for video: {}", video_id);
        let segments = self.captions.fetch(video_id).await?;
        if segments.is_empty() {
            return Err(TubeMindError::NoCaptionsAvailable(video_id.to_string()));
        }

        info!("Creating chunks from {} transcript segments", segments.len());
        let chunks = chunk_segments(&segments, target);
        if chunks.is_empty() {
            return Err(TubeMindError::NoCaptionsAvailable(video_id.to_string()));
        }

        info!("Creating embeddings for {} chunks", chunks.len());
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;

        let index = VectorIndex::from_parts(self.embedder.dimensions(), chunks, embeddings)?;
        let chunks_processed = index.len();
        self.sessions.put(video_id, Arc::new(index)).await;
        info!("Index built with {} vectors", chunks_processed);

        Ok(IngestReport {
            video_id: video_id.to_string(),
            segments: segments.len(),
            chunks_processed,
        })
    }

    async fn retrieve(
        &self,
        video_id: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let index = self.sessions.get(video_id).await?;
        self.retriever
            .retrieve(query, top_k, &index)
            .await
            .map_err(|e| match e {
                TubeMindError::IndexNotBuilt(_) => {
                    TubeMindError::IndexNotBuilt(video_id.to_string())
                }
                other => other,
            })
    }

    /// Answer a question about an ingested video.
    #[instrument(skip(self))]
    pub async fn ask(&self, video_id: &str, question: &str) -> Result<AskResponse> {
        if question.trim().is_empty() {
            return Err(TubeMindError::InvalidInput("question is empty".to_string()));
        }

        info!("Searching for relevant chunks for question: {}", question);
        let results = self
            .retrieve(video_id, question, self.settings.retrieval.ask_top_k)
            .await?;
        let answer = self.answerer.answer(question, &results).await?;

        Ok(AskResponse {
            answer,
            sources: results.iter().map(SourceRef::from).collect(),
        })
    }

    /// Summarize an ingested video.
    #[instrument(skip(self))]
    pub async fn summarize(&self, video_id: &str, style: SummaryStyle) -> Result<SummaryResponse> {
        let retrieval = &self.settings.retrieval;
        let results = self
            .retrieve(video_id, &retrieval.summary_query, retrieval.summary_top_k)
            .await?;
        let summary = self.answerer.summarize(&results, style).await?;

        Ok(SummaryResponse {
            summary,
            key_points: results.iter().take(MAX_KEY_POINTS).map(KeyPoint::from).collect(),
            sources: results.iter().map(SourceRef::from).collect(),
        })
    }

    /// All ingested video ids.
    pub async fn list_sessions(&self) -> BTreeSet<String> {
        self.sessions.list().await
    }
}

/// Result of ingesting a video.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Video ID.
    pub video_id: String,
    /// Caption segments fetched.
    pub segments: usize,
    /// Chunks embedded and indexed.
    pub chunks_processed: usize,
}
