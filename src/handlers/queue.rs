use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

use super::jobs::JobRow;

/// Work queue: jobs still on the bench
#[utoipa::path(
    get,
    path = "/api/v1/queue",
    summary = "Work queue",
    description = "Jobs whose status is In Progress, in snapshot order.",
    responses(
        (status = 200, description = "Queue retrieved", body = ApiResponse<Vec<JobRow>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn get_queue(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<ApiResponse<Vec<JobRow>>>, ServiceError> {
    let rows = state
        .ledger
        .in_progress()
        .into_iter()
        .map(JobRow::from)
        .collect();
    Ok(Json(ApiResponse::success(rows)))
}
