use std::sync::Arc;

use axum::{routing::get, Router};
use http::HeaderValue;
use tokio::{signal, sync::mpsc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing::{error, info};

use labledger_api as api;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::observe::init_tracing(cfg.log_level(), cfg.log_json);

    // Record store and the ledger read model over its snapshots
    let store: Arc<dyn api::store::RecordStore> = Arc::new(api::store::MemoryStore::new());
    let ledger = api::ledger::JobLedger::new(store.subscribe_jobs());

    // Init events
    let (event_tx, event_rx) = mpsc::channel(1024);
    let event_sender = api::events::EventSender::new(event_tx);
    tokio::spawn(api::events::process_events(event_rx));

    // Auth service for handlers requiring it
    let auth_service = Arc::new(api::auth::AuthService::new(
        cfg.jwt_secret.clone(),
        cfg.jwt_expiration as i64,
        store.clone(),
    ));

    seed_bootstrap_admin(&cfg, &store).await?;

    // Aggregate app services used by HTTP handlers
    let services = api::handlers::AppServices::new(store.clone(), Arc::new(event_sender.clone()));

    let app_state = api::AppState {
        config: cfg.clone(),
        store: store.clone(),
        ledger,
        event_sender,
        services,
    };

    // Build CORS layer from config
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    let cors_layer = if let Some(origins) = configured_origins {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.is_development() || cfg.cors_allow_any_origin {
        info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        CorsLayer::permissive()
    } else {
        error!("Missing CORS configuration detected; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true");
        return Err("Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true".into());
    };

    // Build router: status/health + full v1 API + Swagger UI
    let app = Router::<api::AppState>::new()
        .route("/", get(|| async { "labledger-api up" }))
        .nest("/api/v1", api::api_v1_routes())
        .nest(
            "/auth",
            api::handlers::auth::auth_routes().with_state(auth_service.clone()),
        )
        .merge(api::openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(api::observe::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        // Inject AuthService into request extensions for auth middleware
        .layer(axum::middleware::from_fn_with_state(
            auth_service.clone(),
            |axum::extract::State(auth): axum::extract::State<Arc<api::auth::AuthService>>,
             mut req: axum::http::Request<axum::body::Body>,
             next: axum::middleware::Next| async move {
                req.extensions_mut().insert(auth);
                next.run(req).await
            },
        ))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            api::observe::request_id_middleware,
        ))
        .with_state(app_state);

    let addr = cfg.server_address()?;
    info!("labledger-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Creates the configured bootstrap administrator unless the account
/// already exists.
async fn seed_bootstrap_admin(
    cfg: &api::config::AppConfig,
    store: &Arc<dyn api::store::RecordStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(email), Some(password)) = (
        cfg.bootstrap_admin_email.as_ref(),
        cfg.bootstrap_admin_password.as_ref(),
    ) else {
        return Ok(());
    };

    if store.find_user_by_email(email).await?.is_some() {
        return Ok(());
    }

    let password_hash = api::auth::hash_password(password).map_err(|e| e.to_string())?;
    store
        .upsert_user(
            api::models::UserRecord {
                id: uuid::Uuid::new_v4().to_string(),
                email: email.clone(),
                password_hash,
            },
            api::models::UserProfile {
                name: "Administrator".to_string(),
                role: "admin".to_string(),
            },
        )
        .await?;
    info!(%email, "seeded bootstrap administrator account");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
