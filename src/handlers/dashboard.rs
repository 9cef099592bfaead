use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::ledger::DashboardTotals;
use crate::{ApiResponse, AppState};

/// Dashboard totals
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    summary = "Dashboard totals",
    description = "Cash received today and this month, jobs still in progress, and the outstanding balance across the ledger. Recomputed from the latest snapshot on every call.",
    responses(
        (status = 200, description = "Totals computed", body = ApiResponse<DashboardTotals>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<ApiResponse<DashboardTotals>>, ServiceError> {
    Ok(Json(ApiResponse::success(state.ledger.totals())))
}
