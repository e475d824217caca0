use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::job::Job;
use crate::models::matches::JobMatch;
use crate::models::resume::ResumeRecord;
use crate::store::{CacheGeneration, JobStore, MatchCache, ResumeStore};

#[derive(Default)]
pub struct InMemoryStore {
    jobs: RwLock<Vec<Job>>,
    resumes: RwLock<HashMap<Uuid, ResumeRecord>>,
    matches: RwLock<MatchTable>,
}

/// Entries and generation counters live under one lock so that the
/// generation check in `put` and the insert are atomic.
#[derive(Default)]
struct MatchTable {
    entries: HashMap<(Uuid, String), JobMatch>,
    epoch: u64,
    sessions: HashMap<Uuid, u64>,
}

impl MatchTable {
    fn generation(&self, session_id: Uuid) -> CacheGeneration {
        CacheGeneration {
            epoch: self.epoch,
            session: self.sessions.get(&session_id).copied().unwrap_or_default(),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn replace_all(&self, jobs: Vec<Job>) {
        *self.jobs.write().await = jobs;
    }

    async fn list(&self) -> Vec<Job> {
        self.jobs.read().await.clone()
    }

    async fn get(&self, job_id: &str) -> Option<Job> {
        self.jobs.read().await.iter().find(|j| j.id == job_id).cloned()
    }
}

#[async_trait]
impl ResumeStore for InMemoryStore {
    async fn put(&self, record: ResumeRecord) {
        self.resumes.write().await.insert(record.session_id, record);
    }

    async fn get(&self, session_id: Uuid) -> Option<ResumeRecord> {
        self.resumes.read().await.get(&session_id).cloned()
    }

    async fn remove_uploaded_before(&self, cutoff: DateTime<Utc>) -> Vec<Uuid> {
        let mut resumes = self.resumes.write().await;
        let expired: Vec<Uuid> = resumes
            .values()
            .filter(|r| r.uploaded_at < cutoff)
            .map(|r| r.session_id)
            .collect();
        for session_id in &expired {
            resumes.remove(session_id);
        }
        expired
    }
}

#[async_trait]
impl MatchCache for InMemoryStore {
    async fn get(&self, session_id: Uuid, job_id: &str) -> Option<JobMatch> {
        self.matches
            .read()
            .await
            .entries
            .get(&(session_id, job_id.to_string()))
            .cloned()
    }

    async fn generation(&self, session_id: Uuid) -> CacheGeneration {
        self.matches.read().await.generation(session_id)
    }

    async fn put(&self, job_match: JobMatch, generation: CacheGeneration) -> bool {
        let mut table = self.matches.write().await;
        if table.generation(job_match.session_id) != generation {
            return false;
        }
        let key = (job_match.session_id, job_match.job_id.clone());
        table.entries.insert(key, job_match);
        true
    }

    async fn invalidate_session(&self, session_id: Uuid) {
        let mut table = self.matches.write().await;
        table.entries.retain(|(session, _), _| *session != session_id);
        *table.sessions.entry(session_id).or_default() += 1;
    }

    async fn forget_sessions(&self, session_ids: &[Uuid]) {
        if session_ids.is_empty() {
            return;
        }
        let mut table = self.matches.write().await;
        table
            .entries
            .retain(|(session, _), _| !session_ids.contains(session));
        for session_id in session_ids {
            table.sessions.remove(session_id);
        }
        table.epoch += 1;
    }

    async fn clear(&self) {
        let mut table = self.matches.write().await;
        table.entries.clear();
        table.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::format::format_result;
    use chrono::Utc;

    fn job(id: &str) -> Job {
        Job {
            id: id.to_string(),
            title: "Rust Engineer".to_string(),
            description: "Rust and SQL".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            apply_url: id.to_string(),
            created_at: Utc::now(),
        }
    }

    fn job_match(session_id: Uuid, job_id: &str) -> JobMatch {
        JobMatch {
            session_id,
            job_id: job_id.to_string(),
            result: format_result(&[], &[], 0),
            scorer_backend: "weighted".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_replace_all_overwrites_jobs() {
        let store = InMemoryStore::new();
        store.replace_all(vec![job("a"), job("b")]).await;
        store.replace_all(vec![job("c")]).await;

        let jobs = JobStore::list(&store).await;
        assert_eq!(jobs.len(), 1);
        assert!(JobStore::get(&store, "a").await.is_none());
        assert!(JobStore::get(&store, "c").await.is_some());
    }

    #[tokio::test]
    async fn test_resume_put_overwrites_per_session() {
        let store = InMemoryStore::new();
        let session = Uuid::new_v4();
        for text in ["first", "second"] {
            ResumeStore::put(
                &store,
                ResumeRecord {
                    session_id: session,
                    text: text.to_string(),
                    source_media_type: "text/plain".to_string(),
                    uploaded_at: Utc::now(),
                },
            )
            .await;
        }
        let record = ResumeStore::get(&store, session).await.unwrap();
        assert_eq!(record.text, "second");
        assert!(ResumeStore::get(&store, Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_session_only_drops_that_session() {
        let store = InMemoryStore::new();
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());
        let (g1, g2) = (store.generation(s1).await, store.generation(s2).await);
        MatchCache::put(&store, job_match(s1, "a"), g1).await;
        MatchCache::put(&store, job_match(s1, "b"), g1).await;
        MatchCache::put(&store, job_match(s2, "a"), g2).await;

        store.invalidate_session(s1).await;

        assert!(MatchCache::get(&store, s1, "a").await.is_none());
        assert!(MatchCache::get(&store, s1, "b").await.is_none());
        assert!(MatchCache::get(&store, s2, "a").await.is_some());

        store.clear().await;
        assert!(MatchCache::get(&store, s2, "a").await.is_none());
    }

    #[tokio::test]
    async fn test_put_with_stale_session_generation_is_dropped() {
        let store = InMemoryStore::new();
        let session = Uuid::new_v4();
        let before = store.generation(session).await;

        store.invalidate_session(session).await;

        assert!(!MatchCache::put(&store, job_match(session, "a"), before).await);
        assert!(MatchCache::get(&store, session, "a").await.is_none());

        let current = store.generation(session).await;
        assert!(MatchCache::put(&store, job_match(session, "a"), current).await);
        assert!(MatchCache::get(&store, session, "a").await.is_some());
    }

    #[tokio::test]
    async fn test_clear_rejects_puts_from_before_the_clear() {
        let store = InMemoryStore::new();
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());
        let before = store.generation(s1).await;
        let other = store.generation(s2).await;

        store.clear().await;

        assert!(!MatchCache::put(&store, job_match(s1, "a"), before).await);
        assert!(!MatchCache::put(&store, job_match(s2, "a"), other).await);
    }

    #[tokio::test]
    async fn test_invalidation_leaves_other_sessions_current() {
        let store = InMemoryStore::new();
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());
        let other = store.generation(s2).await;

        store.invalidate_session(s1).await;

        assert!(MatchCache::put(&store, job_match(s2, "a"), other).await);
    }

    #[tokio::test]
    async fn test_remove_uploaded_before_expires_old_sessions() {
        let store = InMemoryStore::new();
        let (old, fresh) = (Uuid::new_v4(), Uuid::new_v4());
        let now = Utc::now();
        for (session_id, uploaded_at) in [(old, now - chrono::Duration::hours(48)), (fresh, now)] {
            ResumeStore::put(
                &store,
                ResumeRecord {
                    session_id,
                    text: "rust".to_string(),
                    source_media_type: "text/plain".to_string(),
                    uploaded_at,
                },
            )
            .await;
        }

        let expired = store
            .remove_uploaded_before(now - chrono::Duration::hours(24))
            .await;

        assert_eq!(expired, vec![old]);
        assert!(ResumeStore::get(&store, old).await.is_none());
        assert!(ResumeStore::get(&store, fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_forget_sessions_drops_matches_and_in_flight_puts() {
        let store = InMemoryStore::new();
        let (gone, kept) = (Uuid::new_v4(), Uuid::new_v4());
        let g = store.generation(gone).await;
        let k = store.generation(kept).await;
        MatchCache::put(&store, job_match(gone, "a"), g).await;
        MatchCache::put(&store, job_match(kept, "a"), k).await;

        store.forget_sessions(&[gone]).await;

        assert!(MatchCache::get(&store, gone, "a").await.is_none());
        assert!(MatchCache::get(&store, kept, "a").await.is_some());
        assert!(!MatchCache::put(&store, job_match(gone, "b"), g).await);
    }
}
