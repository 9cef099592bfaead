use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    middleware, Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use labledger_api::{
    auth::{hash_password, AuthService, LoginCredentials},
    config::AppConfig,
    events::{self, EventSender},
    handlers::AppServices,
    ledger::JobLedger,
    models::{UserProfile, UserRecord},
    store::{MemoryStore, RecordStore},
    AppState,
};

pub const TEST_JWT_SECRET: &str =
    "integration_test_secret_that_is_definitely_long_enough_for_hs256_keys";

/// Harness that assembles the full router over a fresh in-memory store.
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub store: Arc<MemoryStore>,
    #[allow(dead_code)]
    pub auth_service: Arc<AuthService>,
    admin_token: String,
    staff_token: String,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let store_dyn: Arc<dyn RecordStore> = store.clone();

        seed_user(&store_dyn, "admin-1", "owner@lab.test", "owner-pass", "Owner", "admin").await;
        seed_user(&store_dyn, "staff-1", "tech@lab.test", "tech-pass", "Dana", "staff").await;

        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let auth_service = Arc::new(AuthService::new(
            TEST_JWT_SECRET.to_string(),
            3600,
            store_dyn.clone(),
        ));

        let admin_token = login(&auth_service, "owner@lab.test", "owner-pass").await;
        let staff_token = login(&auth_service, "tech@lab.test", "tech-pass").await;

        let cfg = test_config();
        let services = AppServices::new(store_dyn.clone(), Arc::new(event_sender.clone()));
        let state = AppState {
            config: cfg,
            store: store_dyn.clone(),
            ledger: JobLedger::new(store_dyn.subscribe_jobs()),
            event_sender,
            services,
        };

        let auth_service_for_layer = auth_service.clone();
        let api_router =
            labledger_api::api_v1_routes().layer(middleware::from_fn_with_state(
                auth_service_for_layer,
                |axum::extract::State(auth): axum::extract::State<Arc<AuthService>>,
                 mut req: Request<Body>,
                 next: axum::middleware::Next| async move {
                    req.extensions_mut().insert(auth);
                    next.run(req).await
                },
            ));

        let auth_service_for_routes = auth_service.clone();
        let auth_router = labledger_api::handlers::auth::auth_routes()
            .with_state(auth_service.clone())
            .layer(middleware::from_fn_with_state(
                auth_service_for_routes,
                |axum::extract::State(auth): axum::extract::State<Arc<AuthService>>,
                 mut req: Request<Body>,
                 next: axum::middleware::Next| async move {
                    req.extensions_mut().insert(auth);
                    next.run(req).await
                },
            ));

        let router = Router::new()
            .nest("/api/v1", api_router)
            .nest("/auth", auth_router)
            .with_state(state);

        Self {
            router,
            store,
            auth_service,
            admin_token,
            staff_token,
            _event_task: event_task,
        }
    }

    #[allow(dead_code)]
    pub fn admin_token(&self) -> &str {
        &self.admin_token
    }

    pub fn staff_token(&self) -> &str {
        &self.staff_token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn request_as_admin(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let token = self.admin_token.clone();
        self.request(method, uri, body, Some(&token)).await
    }

    pub async fn request_as_staff(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let token = self.staff_token.clone();
        self.request(method, uri, body, Some(&token)).await
    }
}

async fn seed_user(
    store: &Arc<dyn RecordStore>,
    id: &str,
    email: &str,
    password: &str,
    name: &str,
    role: &str,
) {
    store
        .upsert_user(
            UserRecord {
                id: id.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password).expect("hash test password"),
            },
            UserProfile {
                name: name.to_string(),
                role: role.to_string(),
            },
        )
        .await
        .expect("seed test user");
}

async fn login(auth_service: &AuthService, email: &str, password: &str) -> String {
    auth_service
        .login(&LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .expect("test login")
        .access_token
}

fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration: 3600,
        host: "127.0.0.1".to_string(),
        port: 18_080,
        environment: "test".to_string(),
        log_level: "warn".to_string(),
        log_json: false,
        cors_allowed_origins: None,
        cors_allow_any_origin: true,
        bootstrap_admin_email: None,
        bootstrap_admin_password: None,
    }
}

/// Deserialize a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is json")
}

/// Read a response body as text.
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    String::from_utf8(bytes.to_vec()).expect("response body is utf-8")
}

/// JSON payload for a typical new job.
pub fn job_payload(doctor: &str, description: &str, amount: &str, amount_paid: &str) -> Value {
    json!({
        "date_received": "2026-08-29",
        "doctor": doctor,
        "description": description,
        "units": 2,
        "shade": "A2",
        "amount": amount,
        "amount_paid": amount_paid,
        "payment_status": "Downpayment"
    })
}

#[allow(dead_code)]
pub fn assert_status(response: &axum::response::Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
