//! REST API over the application service.
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | `POST` | `/games` | `201` with the new game |
//! | `GET` | `/games/{game_id}` | `200` with the game |
//! | `POST` | `/games/{game_id}/mark` | `200` with the updated game |
//! | `GET` | `/health` | `200` |
//!
//! Rejected marks answer `400` with the rejection JSON, unknown games `404`
//! with `{"error":"GAME_NOT_FOUND"}`.

use crate::application::{Application, GameRecord};
use crate::repository::StoreError;
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tictactoe_rules::Mark;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

/// Error returned by handlers, rendered as a JSON body with a status code.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// The application reported a failure.
    #[display("{}", _0)]
    Store(StoreError),
    /// A blocking task panicked or was cancelled.
    #[display("Task failed: {}", _0)]
    Task(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Store(StoreError::Rejected(rejection)) => {
                debug!(%rejection, "Rejected mark");
                (StatusCode::BAD_REQUEST, json!(rejection))
            }
            ApiError::Store(StoreError::NotFound { id }) => {
                debug!(game_id = %id, "Game not found");
                (StatusCode::NOT_FOUND, json!({"error": "GAME_NOT_FOUND"}))
            }
            ApiError::Store(StoreError::AlreadyExists { id }) => {
                warn!(game_id = %id, "Generated id collided with an existing game");
                (StatusCode::CONFLICT, json!({"error": "GAME_ALREADY_EXISTS"}))
            }
            ApiError::Store(err @ StoreError::InvalidState { .. }) => {
                error!(error = %err, "Refused to store an inconsistent game");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "INTERNAL_ERROR"}))
            }
            ApiError::Store(StoreError::Storage(err)) => {
                error!(error = %err, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "INTERNAL_ERROR"}))
            }
            ApiError::Task(err) => {
                error!(error = %err, "Blocking task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "INTERNAL_ERROR"}))
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Runs a synchronous application call on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Task(e.to_string()))?
        .map_err(ApiError::from)
}

/// Builds the API router with request logging.
pub fn router(app: Arc<Application>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/games", post(create_game))
        .route("/games/{game_id}", get(get_game))
        .route("/games/{game_id}/mark", post(add_mark))
        .with_state(app)
        .layer(
            ServiceBuilder::new()
                .map_request(|req: Request<Body>| {
                    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                    req
                })
                .map_response(|res: Response| {
                    debug!(status = %res.status(), "Response sent");
                    res
                }),
        )
}

/// Serves `router` on `addr` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an I/O error if the address can't be bound.
#[instrument(skip(router))]
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "Server ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

#[instrument(skip(app))]
async fn create_game(
    State(app): State<Arc<Application>>,
) -> Result<(StatusCode, Json<GameRecord>), ApiError> {
    let game = run_blocking(move || app.new_game()).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

#[instrument(skip(app))]
async fn get_game(
    State(app): State<Arc<Application>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameRecord>, ApiError> {
    let game = run_blocking(move || app.get_game(&game_id)).await?;
    Ok(Json(game))
}

#[instrument(skip(app))]
async fn add_mark(
    State(app): State<Arc<Application>>,
    Path(game_id): Path<String>,
    Json(mark): Json<Mark>,
) -> Result<Json<GameRecord>, ApiError> {
    let game = run_blocking(move || app.add_mark(&game_id, mark)).await?;
    Ok(Json(game))
}
