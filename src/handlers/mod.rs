pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod jobs;
pub mod queue;

use std::sync::Arc;

use crate::events::EventSender;
use crate::services::{AuditService, JobService};
use crate::store::RecordStore;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub jobs: JobService,
    pub audit: AuditService,
}

impl AppServices {
    pub fn new(store: Arc<dyn RecordStore>, event_sender: Arc<EventSender>) -> Self {
        let audit = AuditService::new(store.clone());
        Self {
            jobs: JobService::new(store, event_sender, audit.clone()),
            audit,
        }
    }
}
