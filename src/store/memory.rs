use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{AuditEntry, JobRecord, JobUpdate, UserProfile, UserRecord};

use super::RecordStore;

const AUDIT_RETENTION: usize = 100;

#[derive(Default)]
struct Tables {
    /// Newest-first, mirroring the order snapshots are published in.
    jobs: Vec<JobRecord>,
    /// Newest-first, trimmed to `AUDIT_RETENTION`.
    audit: Vec<AuditEntry>,
    users: HashMap<String, UserRecord>,
    profiles: HashMap<String, UserProfile>,
}

/// In-process backend. A single `RwLock` serializes writers, and each
/// mutation republishes the whole job table through the watch channel
/// before the lock is released.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    jobs_tx: watch::Sender<Arc<Vec<JobRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (jobs_tx, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            tables: RwLock::new(Tables::default()),
            jobs_tx,
        }
    }

    fn publish(&self, tables: &Tables) {
        self.jobs_tx.send_replace(Arc::new(tables.jobs.clone()));
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_job(&self, mut job: JobRecord) -> Result<JobRecord, StoreError> {
        if job.id.is_empty() {
            job.id = Uuid::new_v4().to_string();
        }
        let mut tables = self.tables.write().await;
        tables.jobs.insert(0, job.clone());
        self.publish(&tables);
        Ok(job)
    }

    async fn update_job(
        &self,
        id: &str,
        update: JobUpdate,
    ) -> Result<Option<JobRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(job) = tables.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        update.apply_to(job);
        let updated = job.clone();
        self.publish(&tables);
        Ok(Some(updated))
    }

    async fn delete_job(&self, id: &str) -> Result<Option<JobRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(position) = tables.jobs.iter().position(|j| j.id == id) else {
            return Ok(None);
        };
        let removed = tables.jobs.remove(position);
        self.publish(&tables);
        Ok(Some(removed))
    }

    async fn get_job(&self, id: &str) -> Result<Option<JobRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.jobs.iter().find(|j| j.id == id).cloned())
    }

    fn subscribe_jobs(&self) -> watch::Receiver<Arc<Vec<JobRecord>>> {
        self.jobs_tx.subscribe()
    }

    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.audit.insert(0, entry);
        tables.audit.truncate(AUDIT_RETENTION);
        Ok(())
    }

    async fn recent_audit(&self, limit: usize) -> Result<Vec<AuditEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.audit.iter().take(limit).cloned().collect())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.get(user_id).cloned())
    }

    async fn upsert_user(
        &self,
        user: UserRecord,
        profile: UserProfile,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.profiles.insert(user.id.clone(), profile);
        tables.users.insert(user.id.clone(), user);
        Ok(())
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Drops the profile row while keeping the credential record, to model
    /// an account that authenticates but has no console profile.
    pub async fn remove_profile(&self, user_id: &str) {
        let mut tables = self.tables.write().await;
        tables.profiles.remove(user_id);
    }
}
