use std::sync::Arc;

use tracing::{instrument, warn};

use crate::errors::ServiceError;
use crate::models::AuditEntry;
use crate::store::RecordStore;

/// Default page size for the trail view, matching the store's retention.
pub const DEFAULT_AUDIT_LIMIT: usize = 100;

/// Writes and reads the activity trail.
#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn RecordStore>,
}

impl AuditService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Fire-and-forget append. The mutation this entry describes has
    /// already committed, so a failed append is logged and swallowed.
    #[instrument(skip(self))]
    pub async fn record(&self, user: &str, action: &str, details: String) {
        let entry = AuditEntry::new(user, action, details);
        if let Err(e) = self.store.append_audit(entry).await {
            warn!(error = %e, action, "failed to append audit entry");
        }
    }

    #[instrument(skip(self))]
    pub async fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, ServiceError> {
        let capped = limit.min(DEFAULT_AUDIT_LIMIT);
        Ok(self.store.recent_audit(capped).await?)
    }
}
