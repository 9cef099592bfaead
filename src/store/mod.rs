pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::StoreError;
use crate::models::{AuditEntry, JobRecord, JobUpdate, UserProfile, UserRecord};

pub use memory::MemoryStore;

/// Persistence boundary for the console. Implementations own the canonical
/// job table and publish a full snapshot through [`subscribe_jobs`] after
/// every successful mutation, so readers never observe a half-applied write.
///
/// [`subscribe_jobs`]: RecordStore::subscribe_jobs
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Persists a fully-defaulted record and returns it with its assigned id.
    async fn create_job(&self, job: JobRecord) -> Result<JobRecord, StoreError>;

    /// Applies a partial update. `Ok(None)` means the id is unknown.
    async fn update_job(
        &self,
        id: &str,
        update: JobUpdate,
    ) -> Result<Option<JobRecord>, StoreError>;

    /// Removes a record, returning it if it existed.
    async fn delete_job(&self, id: &str) -> Result<Option<JobRecord>, StoreError>;

    async fn get_job(&self, id: &str) -> Result<Option<JobRecord>, StoreError>;

    /// Snapshot channel. The receiver holds the current full table
    /// immediately and is replaced wholesale on every change, newest jobs
    /// first.
    fn subscribe_jobs(&self) -> watch::Receiver<Arc<Vec<JobRecord>>>;

    /// Appends to the activity trail. Callers treat failures as
    /// non-fatal; the job write they accompany has already committed.
    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError>;

    /// Most recent audit entries, newest first, capped at `limit`.
    async fn recent_audit(&self, limit: usize) -> Result<Vec<AuditEntry>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Role/profile lookup is deliberately separate from the credential
    /// record: a user can authenticate yet have no profile row, and login
    /// must fail hard in that case.
    async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    async fn upsert_user(
        &self,
        user: UserRecord,
        profile: UserProfile,
    ) -> Result<(), StoreError>;
}
