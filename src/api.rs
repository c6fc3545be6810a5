// CashCard Service - HTTP API
//
// Routes:
//   GET /cashcard/:id  -> 200 {"id":..,"amount":..} | 404
//   GET /health        -> 200 {"status":"ok"}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::cashcard::CashCard;
use crate::error::CashCardError;
use crate::store::CashCardStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CashCardStore>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for CashCardError {
    fn into_response(self) -> Response {
        let status = match &self {
            CashCardError::NotFound(_) => StatusCode::NOT_FOUND,
            CashCardError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            CashCardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /cashcard/:id - Fetch one cash card
async fn get_cash_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CashCard>, CashCardError> {
    // Ids are never negative, so skip the lookup
    if id < 0 {
        return Err(CashCardError::NotFound(id));
    }

    match state.store.find(id) {
        Ok(Some(card)) => {
            debug!(id, "cash card found");
            Ok(Json(card))
        }
        Ok(None) => {
            debug!(id, "cash card not found");
            Err(CashCardError::NotFound(id))
        }
        Err(e) => {
            warn!(id, error = %e, "cash card lookup failed");
            Err(e)
        }
    }
}

/// Build the application router around an explicit store
pub fn router(store: Arc<dyn CashCardStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/health", get(health_check))
        .route("/cashcard/:id", get(get_cash_card))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
