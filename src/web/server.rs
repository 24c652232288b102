use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::row::Replenishment;
use crate::repository::InventoryRepository;
use crate::source::fetch::SourceError;
use crate::source::Snapshot;

/// Shared application state
pub struct AppState {
    pub repo: InventoryRepository,
}

/// Error body returned to clients. Detail goes to the server log only.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

/// Map a load failure to a safe 5xx response: generic message out, detail to
/// the log.
fn source_error_response(err: &SourceError) -> Response {
    tracing::error!("source error: {err}");
    let (status, error_type) = match err {
        SourceError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_configured"),
        _ => (StatusCode::BAD_GATEWAY, "source_unavailable"),
    };
    (
        status,
        Json(ErrorResponse {
            error: "stock data unavailable".to_string(),
            error_type: error_type.to_string(),
        }),
    )
        .into_response()
}

#[derive(Deserialize)]
struct RefParams {
    #[serde(rename = "ref")]
    reference: String,
}

#[derive(Deserialize)]
struct RefColorParams {
    #[serde(rename = "ref")]
    reference: String,
    color: String,
}

#[derive(Deserialize)]
struct TripleParams {
    #[serde(rename = "ref")]
    reference: String,
    color: String,
    size: String,
}

#[derive(Serialize)]
struct StockResponse {
    stock: u32,
}

#[derive(Serialize)]
struct SnapshotStatus {
    loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dropped: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    positional_fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SnapshotStatus {
    fn from_loaded(snapshot: Option<Arc<Snapshot>>) -> Self {
        match snapshot {
            Some(s) => Self {
                loaded: true,
                rows: Some(s.rows),
                dropped: Some(s.dropped),
                positional_fallback: Some(s.positional_fallback),
                loaded_at: Some(s.loaded_at),
            },
            None => Self {
                loaded: false,
                rows: None,
                dropped: None,
                positional_fallback: None,
                loaded_at: None,
            },
        }
    }
}

#[derive(Serialize)]
struct StatusResponse {
    stock: SnapshotStatus,
    replenishment: SnapshotStatus,
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server
/// fails to start.
pub fn run(args: ServeArgs, repo: InventoryRepository) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, repo).await })
}

/// Create the application router with all routes and middleware configured.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
#[must_use]
pub fn create_router(repo: InventoryRepository) -> Router {
    let state = Arc::new(AppState { repo });

    // IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .unwrap();

    Router::new()
        .route("/api/references", get(references_handler))
        .route("/api/colors", get(colors_handler))
        .route("/api/sizes", get(sizes_handler))
        .route("/api/stock", get(stock_handler))
        .route("/api/replenishment", get(replenishment_handler))
        .route("/api/status", get(status_handler))
        .route("/api/reload", post(reload_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // The browser UI is hosted elsewhere; answers must be
                // readable cross-origin, like the relay the UI fetched from
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("access-control-allow-origin"),
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(100)),
        )
}

async fn run_server(args: ServeArgs, repo: InventoryRepository) -> anyhow::Result<()> {
    let app = create_router(repo);

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting stocklens web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn references_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.repo.list_references().await {
        Ok(refs) => Json(refs).into_response(),
        Err(err) => source_error_response(&err),
    }
}

async fn colors_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RefParams>,
) -> Response {
    match state.repo.list_colors(&params.reference).await {
        Ok(colors) => Json(colors).into_response(),
        Err(err) => source_error_response(&err),
    }
}

async fn sizes_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RefColorParams>,
) -> Response {
    match state.repo.list_sizes(&params.reference, &params.color).await {
        Ok(sizes) => Json(sizes).into_response(),
        Err(err) => source_error_response(&err),
    }
}

async fn stock_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TripleParams>,
) -> Response {
    match state
        .repo
        .get_stock(&params.reference, &params.color, &params.size)
        .await
    {
        Ok(stock) => Json(StockResponse { stock }).into_response(),
        Err(err) => source_error_response(&err),
    }
}

/// Replenishment answers serialize as the object or JSON `null`: "nothing
/// scheduled" is a distinct fact from a zero quantity.
async fn replenishment_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TripleParams>,
) -> Response {
    match state
        .repo
        .get_replenishment(&params.reference, &params.color, &params.size)
        .await
    {
        Ok(rep) => Json::<Option<Replenishment>>(rep).into_response(),
        Err(err) => source_error_response(&err),
    }
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        stock: SnapshotStatus::from_loaded(state.repo.stock_loaded()),
        replenishment: SnapshotStatus::from_loaded(state.repo.reappro_loaded()),
    })
}

async fn reload_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.repo.reset();
    Json(serde_json::json!({ "status": "reloaded" }))
}
