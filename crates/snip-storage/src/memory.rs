use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::repository::{ReadRepository, Repository, Result, UrlRecord};
use snip_core::{ShortCode, StorageError};
use tracing::trace;

/// Process-local store keyed by short code.
///
/// Records are lost on restart. Inserts go through the shard's entry guard,
/// so two concurrent inserts of one code admit exactly one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, String>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        trace!(code = %code, "Looking up short code in memory");

        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| UrlRecord::new(code.clone(), entry.value().as_str())))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<UrlRecord> {
        // The entry guard holds the shard lock, making check-and-insert atomic.
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(original_url.to_owned());
                trace!(code = %code, "Inserted short code into memory");
                Ok(UrlRecord::new(code.clone(), original_url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn inserted_record_is_readable() {
        let repo = InMemoryRepository::new();

        let inserted = repo
            .insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();
        assert_eq!(inserted.short_code, code("abc123"));
        assert_eq!(inserted.original_url, "https://example.com");

        let stored = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored, inserted);
    }

    #[tokio::test]
    async fn unknown_code_reads_as_none() {
        let repo = InMemoryRepository::new();

        assert_eq!(repo.get(&code("nope00")).await.unwrap(), None);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts_and_keeps_first() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let err = repo
            .insert(&code("abc123"), "https://other.com")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(ref c) if c == "abc123"));

        let kept = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(kept.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn codes_are_case_sensitive() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abcdef"), "https://lower.example")
            .await
            .unwrap();
        repo.insert(&code("ABCDEF"), "https://upper.example")
            .await
            .unwrap();

        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn exists_tracks_inserts() {
        let repo = InMemoryRepository::new();

        assert!(!repo.exists(&code("abc123")).await.unwrap());

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        assert!(repo.exists(&code("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_code_admit_one() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&code("race00"), &format!("https://example{}.com", i))
                    .await
                    .is_ok()
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_of_distinct_codes() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = code(&format!("code{:02}", i));
                repo.insert(&c, &format!("https://example{}.com", i))
                    .await
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let c = code(&format!("code{:02}", i));
            let record = repo.get(&c).await.unwrap().unwrap();
            assert_eq!(record.original_url, format!("https://example{}.com", i));
        }
    }
}
