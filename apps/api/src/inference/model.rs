use std::path::PathBuf;

use thiserror::Error;

use crate::schema::NormalizedRow;

/// Errors raised while turning a row into a prediction.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model artifact is not loaded")]
    ModelNotLoaded,

    #[error("input row does not match the model's columns: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("model returned score {0}, outside the 0-10 evaluation scale")]
    ScoreOutOfRange(i64),

    #[error("model failed: {0}")]
    Model(String),
}

/// Errors raised while loading a model artifact at startup.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("model columns {actual:?} do not match request columns {expected:?}")]
    ColumnContract {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

/// A pre-trained classifier treated as an opaque prediction function.
///
/// Implementations must be immutable after construction: the adapter shares one
/// instance across all request handlers without locking.
pub trait Model: Send + Sync {
    /// Input columns, in the order the model was trained with.
    fn columns(&self) -> &[String];

    /// Predicts the label for a single row whose columns equal `columns()`.
    fn predict(&self, row: &NormalizedRow) -> Result<i64, InferenceError>;
}
