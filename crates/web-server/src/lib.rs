// In crates/web-server/src/lib.rs

use app_config::ServerSettings;
use axum::{Router, extract::State, response::Json, routing::get};
use plan_types::{PlanResponse, PlanViewer};
use std::time::Duration;
use tokio::net::TcpListener;

pub mod error;
pub mod fixtures;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
///
/// Immutable and cheap to clone, so every request gets its own copy.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Artificial latency applied before each plan response.
    pub response_delay: Duration,
}

impl AppState {
    pub fn new(response_delay: Duration) -> Self {
        Self { response_delay }
    }

    async fn simulate_latency(&self) {
        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }
    }
}

/// Creates the main application router with all routes and middleware.
///
/// # Arguments
///
/// * `app_state`: The shared `AppState` holding the configured response delay.
///
/// # Returns
///
/// The configured `axum::Router`.
pub fn create_router(app_state: AppState) -> Router {
    // The plan endpoints are public mock data, so any origin may read them.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/plan", get(get_plan_handler))
        .route("/plan/v2", get(get_plan_viewer_handler));

    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /api/plan`.
async fn get_plan_handler(State(state): State<AppState>) -> Json<PlanResponse> {
    state.simulate_latency().await;

    let plan = fixtures::legacy::plan_response();
    tracing::debug!(
        transactions = plan.transactions.len(),
        investments = plan.investments.len(),
        "Serving legacy plan"
    );
    Json(plan)
}

/// The handler for `GET /api/plan/v2`.
async fn get_plan_viewer_handler(State(state): State<AppState>) -> Result<Json<PlanViewer>> {
    state.simulate_latency().await;

    let viewer = fixtures::viewer::plan_viewer()?;
    let funds: usize = viewer.asset_allocation.iter().map(|n| n.fund_count()).sum();
    tracing::debug!(plan_id = %viewer.plan_id, funds, "Serving plan viewer");
    Ok(Json(viewer))
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router.
/// It will run forever until the process is terminated.
pub async fn run(settings: ServerSettings) -> Result<()> {
    let app_state = AppState::new(settings.response_delay());
    let app = create_router(app_state);

    let address = settings.address();
    tracing::info!(
        delay_ms = settings.response_delay_ms,
        "Web server listening on {}",
        address
    );

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)?;

    Ok(())
}
