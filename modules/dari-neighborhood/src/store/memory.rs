//! In-memory cache store. Used by tests and callers that can afford to lose
//! the cache on restart. Thread-safe via interior Mutex.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use dari_common::NeighborhoodAnalysis;

use crate::traits::AnalysisStore;

pub struct MemoryStore {
    records: Mutex<HashMap<Uuid, NeighborhoodAnalysis>>,
    fail_on_put: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_on_put: false,
        }
    }

    /// Make `put` return an error for every call.
    pub fn failing_puts(mut self) -> Self {
        self.fail_on_put = true;
        self
    }

    /// Number of records currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn get(&self, property_id: Uuid) -> Result<Option<NeighborhoodAnalysis>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .get(&property_id)
            .filter(|r| !r.is_expired(Utc::now()))
            .cloned())
    }

    async fn put(&self, analysis: &NeighborhoodAnalysis) -> Result<()> {
        if self.fail_on_put {
            bail!("MemoryStore: put forced failure");
        }
        let mut records = self.records.lock().unwrap();
        records.insert(analysis.property_id, analysis.clone());
        Ok(())
    }

    async fn delete(&self, property_id: Uuid) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        records.remove(&property_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use dari_common::GeoPoint;

    fn analysis(property_id: Uuid) -> NeighborhoodAnalysis {
        NeighborhoodAnalysis::fresh(
            property_id,
            "Lac 2, Tunis",
            GeoPoint::new(36.8625, 10.2297),
            Vec::new(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.put(&analysis(id)).await.unwrap();

        let found = store.get(id).await.unwrap().unwrap();
        assert_eq!(found.property_id, id);
        assert_eq!(found.address, "Lac 2, Tunis");
    }

    #[tokio::test]
    async fn expired_record_is_invisible() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let mut stale = analysis(id);
        stale.last_updated = Utc::now() - Duration::days(40);
        stale.expires_at = Utc::now() - Duration::days(10);
        store.put(&stale).await.unwrap();

        assert!(store.get(id).await.unwrap().is_none());
        // The row itself is still there until someone reaps it
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn put_replaces_whole_record() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.put(&analysis(id)).await.unwrap();

        let mut replacement = analysis(id);
        replacement.address = "La Marsa, Tunis".to_string();
        store.put(&replacement).await.unwrap();

        let found = store.get(id).await.unwrap().unwrap();
        assert_eq!(found.address, "La Marsa, Tunis");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.put(&analysis(id)).await.unwrap();
        store.delete(id).await.unwrap();

        assert!(store.get(id).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failing_puts_errors() {
        let store = MemoryStore::new().failing_puts();
        let result = store.put(&analysis(Uuid::new_v4())).await;
        assert!(result.is_err());
    }
}
