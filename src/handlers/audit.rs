use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::ledger::badges::audit_badge;
use crate::ledger::BadgeCategory;
use crate::models::AuditEntry;
use crate::services::audit::DEFAULT_AUDIT_LIMIT;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditQuery {
    /// Maximum entries to return; capped at the retention window.
    pub limit: Option<usize>,
}

/// One line of the activity trail, with its display badge.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuditRow {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub action: String,
    pub details: String,
    pub badge: BadgeCategory,
}

impl From<AuditEntry> for AuditRow {
    fn from(entry: AuditEntry) -> Self {
        Self {
            badge: audit_badge(&entry.action),
            timestamp: entry.timestamp,
            user: entry.user,
            action: entry.action,
            details: entry.details,
        }
    }
}

/// Activity trail
#[utoipa::path(
    get,
    path = "/api/v1/audit",
    summary = "Activity trail",
    description = "Most recent audit entries, newest first. The store retains the last 100.",
    params(AuditQuery),
    responses(
        (status = 200, description = "Entries retrieved", body = ApiResponse<Vec<AuditRow>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn list_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
    _auth_user: AuthUser,
) -> Result<Json<ApiResponse<Vec<AuditRow>>>, ServiceError> {
    let limit = query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    let rows = state
        .services
        .audit
        .recent(limit)
        .await?
        .into_iter()
        .map(AuditRow::from)
        .collect();
    Ok(Json(ApiResponse::success(rows)))
}
