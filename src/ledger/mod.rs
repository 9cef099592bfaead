pub mod aggregates;
pub mod badges;
pub mod filter;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

pub use aggregates::DashboardTotals;
pub use badges::BadgeCategory;
pub use filter::{JobFilter, JobListQuery, Selector};

use crate::models::{job::status, JobRecord};

/// Read model over the job table. The store pushes a full snapshot into the
/// watch channel on every mutation; all queries here are pure functions of
/// the latest snapshot, so a ledger is always internally consistent even
/// while writes are in flight.
#[derive(Debug, Clone)]
pub struct JobLedger {
    snapshot: watch::Receiver<Arc<Vec<JobRecord>>>,
}

impl JobLedger {
    pub fn new(snapshot: watch::Receiver<Arc<Vec<JobRecord>>>) -> Self {
        Self { snapshot }
    }

    /// Latest full snapshot, newest-first as published by the store.
    pub fn jobs(&self) -> Arc<Vec<JobRecord>> {
        self.snapshot.borrow().clone()
    }

    pub fn filtered(&self, filter: &JobFilter) -> Vec<JobRecord> {
        filter.apply(&self.jobs()).into_iter().cloned().collect()
    }

    /// Jobs still on the bench, for the work queue view.
    pub fn in_progress(&self) -> Vec<JobRecord> {
        self.jobs()
            .iter()
            .filter(|job| job.status == status::IN_PROGRESS)
            .cloned()
            .collect()
    }

    pub fn totals(&self) -> DashboardTotals {
        DashboardTotals::compute(&self.jobs(), Utc::now().date_naive())
    }
}
