use std::sync::Arc;

use crate::config::Config;
use crate::inference::InferenceAdapter;
use crate::preprocess::TextNormalizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; read-only afterwards.
    pub adapter: Arc<InferenceAdapter>,
    pub normalizer: Arc<TextNormalizer>,
    pub config: Config,
}
