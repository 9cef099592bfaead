use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Well-known audit action labels. The field is stored as free text so other
/// writers may append actions outside this list.
pub mod actions {
    pub const CREATE: &str = "CREATE";
    pub const UPDATE: &str = "UPDATE";
    pub const DELETE: &str = "DELETE";
    pub const PRINT: &str = "PRINT";
    pub const EXPORT: &str = "EXPORT";
}

/// One entry in the append-only `audit_logs` namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    /// Display name of the acting user.
    pub user: String,
    pub action: String,
    pub details: String,
}

impl AuditEntry {
    pub fn new(user: impl Into<String>, action: &str, details: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            user: user.into(),
            action: action.to_string(),
            details: details.into(),
        }
    }
}
