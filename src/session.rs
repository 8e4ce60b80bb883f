//! Process-wide registry of ingested videos.
//!
//! Indexes are stored behind `Arc` and never mutated after insertion, so a
//! reader holding an index is unaffected by a later re-ingestion of the same
//! video. Entries live until the process exits.

use crate::error::{Result, TubeMindError};
use crate::vector_store::VectorIndex;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

struct Session {
    index: Arc<VectorIndex>,
    ingested_at: DateTime<Utc>,
}

/// Summary information about an ingested video.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub video_id: String,
    pub chunk_count: usize,
    pub ingested_at: DateTime<Utc>,
}

/// Mapping from video id to its built index.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `index` for `video_id`, replacing any previous entry.
    pub async fn put(&self, video_id: &str, index: Arc<VectorIndex>) -> Arc<VectorIndex> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            video_id.to_string(),
            Session {
                index: index.clone(),
                ingested_at: Utc::now(),
            },
        );
        index
    }

    /// Get the index for `video_id`.
    pub async fn get(&self, video_id: &str) -> Result<Arc<VectorIndex>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(video_id)
            .map(|s| s.index.clone())
            .ok_or_else(|| TubeMindError::IndexNotBuilt(video_id.to_string()))
    }

    /// All stored video ids.
    pub async fn list(&self) -> BTreeSet<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    /// Per-video details, most recently ingested first.
    pub async fn list_details(&self) -> Vec<SessionInfo> {
        let sessions = self.sessions.read().await;
        let mut infos: Vec<SessionInfo> = sessions
            .iter()
            .map(|(id, s)| SessionInfo {
                video_id: id.clone(),
                chunk_count: s.index.len(),
                ingested_at: s.ingested_at,
            })
            .collect();
        infos.sort_by(|a, b| b.ingested_at.cmp(&a.ingested_at));
        infos
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;

    fn index(text: &str) -> Arc<VectorIndex> {
        Arc::new(
            VectorIndex::from_parts(2, vec![Chunk::new(text, 0.0, 1.0)], vec![vec![1.0, 0.0]])
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = SessionStore::new();
        let stored = store.put("abc", index("hello")).await;
        let fetched = store.get("abc").await.unwrap();

        assert!(Arc::ptr_eq(&stored, &fetched));
        assert_eq!(fetched.chunks()[0].text, "hello");
    }

    #[tokio::test]
    async fn test_missing_video() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);
        let err = store.get("never").await.unwrap_err();
        assert!(matches!(err, TubeMindError::IndexNotBuilt(id) if id == "never"));
    }

    #[tokio::test]
    async fn test_last_put_wins() {
        let store = SessionStore::new();
        let old = store.put("abc", index("old")).await;
        store.put("xyz", index("other")).await;
        store.put("abc", index("new")).await;

        assert_eq!(store.len().await, 2);
        assert_eq!(store.get("abc").await.unwrap().chunks()[0].text, "new");
        // readers that already hold the old index keep a consistent view
        assert_eq!(old.chunks()[0].text, "old");

        let ids: Vec<String> = store.list().await.into_iter().collect();
        assert_eq!(ids, vec!["abc".to_string(), "xyz".to_string()]);
    }

    #[tokio::test]
    async fn test_list_details() {
        let store = SessionStore::new();
        store.put("one", index("a")).await;
        let details = store.list_details().await;

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].video_id, "one");
        assert_eq!(details[0].chunk_count, 1);
    }
}
