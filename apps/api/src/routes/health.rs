use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

pub const HOME_MESSAGE: &str = "NextGen Teacher Evaluation Prediction API";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub model_loaded: bool,
}

/// GET /
/// Human-readable service description.
pub async fn home_handler() -> Json<Value> {
    Json(json!({ "message": HOME_MESSAGE }))
}

/// GET /health
/// Machine-readable status: model version and whether the artifact loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        version: state.adapter.version().to_string(),
        model_loaded: state.adapter.model_loaded(),
    })
}
