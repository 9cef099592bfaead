use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LabLedger API",
        version = "0.1.0",
        description = r#"
# Dental Lab Job Ledger API

Management console backend for a dental laboratory: job intake, the live
sales ledger, dashboard aggregates, the work queue, receipts, CSV export,
and the activity trail.

## Authentication

All `/api/v1` endpoints require a bearer token obtained from `/auth/login`:

```
Authorization: Bearer <your-jwt-token>
```

Deleting job records additionally requires the `admin` role.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Auth", description = "Login, logout, and identity"),
        (name = "Jobs", description = "Job record management and export"),
        (name = "Views", description = "Dashboard, work queue, and activity trail")
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::auth::me,

        crate::handlers::jobs::list_jobs,
        crate::handlers::jobs::create_job,
        crate::handlers::jobs::get_job,
        crate::handlers::jobs::update_job,
        crate::handlers::jobs::delete_job,
        crate::handlers::jobs::get_receipt,
        crate::handlers::jobs::export_jobs,

        crate::handlers::dashboard::get_dashboard,
        crate::handlers::queue::get_queue,
        crate::handlers::audit::list_audit,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,

            crate::models::JobRecord,
            crate::models::NewJob,
            crate::models::JobUpdate,
            crate::handlers::jobs::JobRow,
            crate::handlers::audit::AuditRow,
            crate::ledger::DashboardTotals,
            crate::ledger::BadgeCategory,

            crate::auth::LoginCredentials,
            crate::auth::TokenResponse,
            crate::auth::AuthUser,

            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds_and_lists_the_job_paths() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        let paths = json.get("paths").unwrap().as_object().unwrap();
        assert!(paths.contains_key("/api/v1/jobs"));
        assert!(paths.contains_key("/api/v1/jobs/{id}"));
        assert!(paths.contains_key("/auth/login"));
    }
}
