//! Storage seams for the orchestration layer.
//!
//! Handlers and services only see these traits. The matching engine never
//! touches a store. `memory::InMemoryStore` implements all three and is reset
//! on restart.
//!
//! Sessions are never closed by clients, so per-session entries only go away
//! through `ResumeStore::remove_uploaded_before` and
//! `MatchCache::forget_sessions`. `resumes::spawn_session_sweeper` calls both.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::job::Job;
use crate::models::matches::JobMatch;
use crate::models::resume::ResumeRecord;

pub use memory::InMemoryStore;

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Replaces the stored job list with the results of a new search.
    async fn replace_all(&self, jobs: Vec<Job>);
    async fn list(&self) -> Vec<Job>;
    async fn get(&self, job_id: &str) -> Option<Job>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Overwrites any resume previously stored for the session.
    async fn put(&self, record: ResumeRecord);
    async fn get(&self, session_id: Uuid) -> Option<ResumeRecord>;
    /// Removes resumes uploaded before `cutoff` and returns their session ids.
    async fn remove_uploaded_before(&self, cutoff: DateTime<Utc>) -> Vec<Uuid>;
}

/// Point-in-time view of the cache for one session. Taken before a score is
/// computed and handed back on `put`; a stale generation means the resume or
/// the job list changed meanwhile and the score is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeneration {
    pub(crate) epoch: u64,
    pub(crate) session: u64,
}

/// Match results keyed by (session, job).
#[async_trait]
pub trait MatchCache: Send + Sync {
    async fn get(&self, session_id: Uuid, job_id: &str) -> Option<JobMatch>;
    async fn generation(&self, session_id: Uuid) -> CacheGeneration;
    /// Stores the match only if `generation` is still current. Returns whether it was stored.
    async fn put(&self, job_match: JobMatch, generation: CacheGeneration) -> bool;
    /// Drops the session's matches and advances its generation.
    async fn invalidate_session(&self, session_id: Uuid);
    /// Drops the given sessions' matches and their generation counters. The
    /// global generation advances too, so no in-flight score lands afterwards.
    async fn forget_sessions(&self, session_ids: &[Uuid]);
    /// Drops every match and advances the global generation.
    async fn clear(&self);
}
