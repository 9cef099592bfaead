use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{policy, AuthUser};
use crate::errors::ServiceError;
use crate::ledger::{
    badges::{payment_badge, status_badge},
    BadgeCategory, JobFilter, JobListQuery,
};
use crate::models::{JobRecord, JobUpdate, NewJob};
use crate::services::export;
use crate::{ApiResponse, AppState};

/// One row of the ledger view: the record plus the derived display fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobRow {
    #[serde(flatten)]
    pub job: JobRecord,
    pub balance: Decimal,
    pub payment_badge: BadgeCategory,
    pub status_badge: BadgeCategory,
}

impl From<JobRecord> for JobRow {
    fn from(job: JobRecord) -> Self {
        Self {
            balance: job.balance(),
            payment_badge: payment_badge(job.effective_payment_status()),
            status_badge: status_badge(&job.status),
            job,
        }
    }
}

/// List job records, filtered
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    summary = "List jobs",
    description = "Latest snapshot of the ledger, filtered by search text, job status, and payment status. Dimensions combine with AND; snapshot order is preserved.",
    params(JobListQuery),
    responses(
        (status = 200, description = "Jobs retrieved successfully", body = ApiResponse<Vec<JobRow>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
    _auth_user: AuthUser,
) -> Result<Json<ApiResponse<Vec<JobRow>>>, ServiceError> {
    let filter = JobFilter::from(query);
    let rows = state
        .ledger
        .filtered(&filter)
        .into_iter()
        .map(JobRow::from)
        .collect();
    Ok(Json(ApiResponse::success(rows)))
}

/// Create a job record
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    summary = "Create job",
    description = "Register incoming lab work. New jobs always start In Progress; blank logistics fields are stored as the display placeholder.",
    request_body = NewJob,
    responses(
        (status = 201, description = "Job created", body = ApiResponse<JobRow>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn create_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(new_job): Json<NewJob>,
) -> Result<(StatusCode, Json<ApiResponse<JobRow>>), ServiceError> {
    let created = state.services.jobs.create_job(new_job, &auth_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(JobRow::from(created))),
    ))
}

/// Fetch one job record
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    summary = "Get job",
    params(("id" = String, Path, description = "Job record id")),
    responses(
        (status = 200, description = "Job retrieved", body = ApiResponse<JobRow>),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth_user: AuthUser,
) -> Result<Json<ApiResponse<JobRow>>, ServiceError> {
    let job = state.services.jobs.get_job(&id).await?;
    Ok(Json(ApiResponse::success(JobRow::from(job))))
}

/// Update a job record
#[utoipa::path(
    put,
    path = "/api/v1/jobs/{id}",
    summary = "Update job",
    description = "Merge the provided fields into the record. Date received, creation timestamp, and creator are immutable.",
    params(("id" = String, Path, description = "Job record id")),
    request_body = JobUpdate,
    responses(
        (status = 200, description = "Job updated", body = ApiResponse<JobRow>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth_user: AuthUser,
    Json(update): Json<JobUpdate>,
) -> Result<Json<ApiResponse<JobRow>>, ServiceError> {
    let updated = state
        .services
        .jobs
        .update_job(&id, update, &auth_user)
        .await?;
    Ok(Json(ApiResponse::success(JobRow::from(updated))))
}

/// Delete a job record (administrators only)
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    summary = "Delete job",
    params(("id" = String, Path, description = "Job record id")),
    responses(
        (status = 200, description = "Job deleted", body = ApiResponse<JobRow>),
        (status = 403, description = "Not an administrator", body = crate::errors::ErrorResponse),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<JobRow>>, ServiceError> {
    if !policy::can_delete_jobs(&auth_user) {
        return Err(ServiceError::Forbidden(
            "Only administrators may delete job records".to_string(),
        ));
    }
    let removed = state.services.jobs.delete_job(&id, &auth_user).await?;
    Ok(Json(ApiResponse::success(JobRow::from(removed))))
}

/// Printable receipt for one job
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}/receipt",
    summary = "Job receipt",
    description = "Plain-text receipt slip with job, logistics, and billing sections. Fetching one is recorded in the activity trail.",
    params(("id" = String, Path, description = "Job record id")),
    responses(
        (status = 200, description = "Receipt rendered", content_type = "text/plain"),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth_user: AuthUser,
) -> Result<Response, ServiceError> {
    let job = state.services.jobs.job_for_receipt(&id, &auth_user).await?;
    let receipt = export::job_to_receipt(&job);
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        receipt,
    )
        .into_response())
}

/// Export the filtered ledger as CSV
#[utoipa::path(
    get,
    path = "/api/v1/jobs/export",
    summary = "Export jobs",
    description = "CSV of the current filtered view. An empty view is refused rather than producing a header-only file.",
    params(JobListQuery),
    responses(
        (status = 200, description = "CSV rendered", content_type = "text/csv"),
        (status = 422, description = "Nothing to export", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = []))
)]
pub async fn export_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
    auth_user: AuthUser,
) -> Result<Response, ServiceError> {
    let filter = JobFilter::from(query);
    let jobs = state.ledger.filtered(&filter);
    let csv = export::jobs_to_csv(&jobs)?;

    state.services.jobs.record_export(jobs.len(), &auth_user).await;

    let filename = export::export_filename(Utc::now().date_naive());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
