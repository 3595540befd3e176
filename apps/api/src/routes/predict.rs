use std::sync::Arc;

use anyhow::Context;
use axum::{extract::FromRequest, extract::State, Json};

use crate::errors::AppError;
use crate::inference::PredictionResult;
use crate::schema::PredictRequest;
use crate::state::AppState;

/// `axum::Json` with rejections rendered through `AppError`, so schema
/// violations share the service's error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidatedJson<T>(pub T);

/// POST /predict
///
/// Normalizes the three fields, builds the model row and runs inference on the
/// blocking pool. Any failure past validation is a 500 with the error envelope.
pub async fn predict_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PredictRequest>,
) -> Result<Json<PredictionResult>, AppError> {
    let expose = state.config.expose_error_details;
    let adapter = Arc::clone(&state.adapter);
    let normalizer = Arc::clone(&state.normalizer);

    let outcome = tokio::task::spawn_blocking(move || {
        let row = request.get_preprocessed(&normalizer);
        tracing::debug!(?row, "Preprocessed prediction input");
        adapter.predict_output(&row)
    })
    .await
    .context("prediction task failed")
    .map_err(|e| AppError::internal(e, expose))?;

    let prediction = outcome.map_err(|e| AppError::inference(e, expose))?;
    Ok(Json(prediction))
}
