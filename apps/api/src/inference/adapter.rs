//! Inference Adapter — owns the loaded model and maps raw labels to response payloads.
//!
//! Built once in `main` and shared through `AppState`; tests construct it
//! directly around a fake `Model`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::linear::LinearTextModel;
use super::model::{InferenceError, Model, ModelLoadError};
use crate::schema::{NormalizedRow, COLUMNS};

// ────────────────────────────────────────────────────────────────────────────
// Response policy
// ────────────────────────────────────────────────────────────────────────────

/// How a raw model label is rendered to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// `{"predicted_category": <label>}`
    #[default]
    Category,
    /// Label read as a 0–10 score with a qualitative tier and sentence.
    Score,
}

impl FromStr for ResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "score" => Ok(Self::Score),
            other => Err(format!(
                "unknown response format '{other}' (expected 'category' or 'score')"
            )),
        }
    }
}

impl fmt::Display for ResponsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Score => write!(f, "score"),
        }
    }
}

/// Qualitative band of a 0–10 evaluation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvaluationTier {
    #[serde(rename = "perfect match")]
    PerfectMatch,
    #[serde(rename = "strong candidate")]
    StrongCandidate,
    #[serde(rename = "meets basic requirements")]
    MeetsBasicRequirements,
    #[serde(rename = "does not meet requirements")]
    BelowRequirements,
}

impl EvaluationTier {
    /// 10 → perfect, 8–9 → strong, 6–7 → basic, below 6 → below requirements.
    pub fn from_score(score: u8) -> Self {
        match score {
            10.. => Self::PerfectMatch,
            8..=9 => Self::StrongCandidate,
            6..=7 => Self::MeetsBasicRequirements,
            _ => Self::BelowRequirements,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PerfectMatch => "perfect match",
            Self::StrongCandidate => "strong candidate",
            Self::MeetsBasicRequirements => "meets basic requirements",
            Self::BelowRequirements => "does not meet requirements",
        }
    }
}

/// Body of a successful `/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResult {
    Category {
        predicted_category: i64,
    },
    Evaluation {
        score: u8,
        evaluation: EvaluationTier,
        message: String,
    },
}

impl PredictionResult {
    fn from_label(label: i64, policy: ResponsePolicy) -> Result<Self, InferenceError> {
        match policy {
            ResponsePolicy::Category => Ok(Self::Category {
                predicted_category: label,
            }),
            ResponsePolicy::Score => {
                let score = u8::try_from(label)
                    .ok()
                    .filter(|s| *s <= 10)
                    .ok_or(InferenceError::ScoreOutOfRange(label))?;
                let evaluation = EvaluationTier::from_score(score);
                Ok(Self::Evaluation {
                    score,
                    evaluation,
                    message: format!("Candidate scored {score}/10: {}.", evaluation.label()),
                })
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Adapter
// ────────────────────────────────────────────────────────────────────────────

pub struct InferenceAdapter {
    model: Option<Arc<dyn Model>>,
    version: String,
    policy: ResponsePolicy,
}

impl InferenceAdapter {
    /// Wraps an already-constructed model. `None` yields an adapter that
    /// reports `model_loaded = false` and refuses every prediction.
    pub fn new(
        model: Option<Arc<dyn Model>>,
        version: impl Into<String>,
        policy: ResponsePolicy,
    ) -> Self {
        Self {
            model,
            version: version.into(),
            policy,
        }
    }

    /// Loads the JSON artifact at `path` and checks its columns against the
    /// request schema before accepting it.
    pub fn load(
        path: &Path,
        version: impl Into<String>,
        policy: ResponsePolicy,
    ) -> Result<Self, ModelLoadError> {
        let model = LinearTextModel::from_path(path)?;
        check_column_contract(&model)?;
        info!(
            "Loaded model '{}' from {} ({} classes)",
            model.name(),
            path.display(),
            model.classes().len()
        );
        Ok(Self::new(Some(Arc::new(model)), version, policy))
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Runs the model on one row and renders the label per the response policy.
    /// The row's columns are checked before the model is called.
    pub fn predict_output(&self, row: &NormalizedRow) -> Result<PredictionResult, InferenceError> {
        let model = self.model.as_ref().ok_or(InferenceError::ModelNotLoaded)?;

        if !row.matches_columns(model.columns()) {
            return Err(InferenceError::ShapeMismatch {
                expected: model.columns().to_vec(),
                actual: row.columns().map(str::to_string).collect(),
            });
        }

        let label = model.predict(row)?;
        PredictionResult::from_label(label, self.policy)
    }
}

/// The model's declared columns must equal the request schema's, names and order.
pub fn check_column_contract(model: &dyn Model) -> Result<(), ModelLoadError> {
    let actual = model.columns();
    let matches = actual.len() == COLUMNS.len()
        && actual.iter().zip(COLUMNS).all(|(a, e)| a == e);
    if matches {
        Ok(())
    } else {
        Err(ModelLoadError::ColumnContract {
            expected: COLUMNS.iter().map(|c| c.to_string()).collect(),
            actual: actual.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::testing::{row_for, FailingModel, FixedModel};
    use crate::schema::JOB_POST_COLUMN;
    use serde_json::json;

    fn adapter(label: i64, policy: ResponsePolicy) -> (InferenceAdapter, Arc<FixedModel>) {
        let model = Arc::new(FixedModel::new(label));
        let adapter = InferenceAdapter::new(Some(model.clone()), "1.0.0", policy);
        (adapter, model)
    }

    #[test]
    fn test_category_policy_returns_label_verbatim() {
        let (adapter, _) = adapter(3, ResponsePolicy::Category);
        let result = adapter.predict_output(&row_for("a", "b", "c")).unwrap();
        assert_eq!(result, PredictionResult::Category { predicted_category: 3 });
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"predicted_category": 3}));
    }

    #[test]
    fn test_score_policy_tiers_cover_whole_scale() {
        let expected = [
            (0, "does not meet requirements"),
            (5, "does not meet requirements"),
            (6, "meets basic requirements"),
            (7, "meets basic requirements"),
            (8, "strong candidate"),
            (9, "strong candidate"),
            (10, "perfect match"),
        ];
        for (score, tier) in expected {
            let (adapter, _) = adapter(score, ResponsePolicy::Score);
            let value = serde_json::to_value(adapter.predict_output(&row_for("", "", "")).unwrap())
                .unwrap();
            assert_eq!(value["score"], json!(score));
            assert_eq!(value["evaluation"], json!(tier));
            assert_eq!(
                value["message"],
                json!(format!("Candidate scored {score}/10: {tier}."))
            );
        }
    }

    #[test]
    fn test_score_policy_rejects_out_of_range_labels() {
        for label in [-1, 11, 250] {
            let (adapter, _) = adapter(label, ResponsePolicy::Score);
            let err = adapter.predict_output(&row_for("", "", "")).unwrap_err();
            assert!(matches!(err, InferenceError::ScoreOutOfRange(l) if l == label));
        }
    }

    #[test]
    fn test_shape_mismatch_fails_before_model_is_called() {
        let (adapter, model) = adapter(1, ResponsePolicy::Category);
        let short = NormalizedRow::new().with_cell(JOB_POST_COLUMN, "teacher");

        let err = adapter.predict_output(&short).unwrap_err();
        match err {
            InferenceError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, COLUMNS);
                assert_eq!(actual, vec![JOB_POST_COLUMN.to_string()]);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_missing_model_reports_not_loaded() {
        let adapter = InferenceAdapter::new(None, "1.0.0", ResponsePolicy::Category);
        assert!(!adapter.model_loaded());
        let err = adapter.predict_output(&row_for("", "", "")).unwrap_err();
        assert!(matches!(err, InferenceError::ModelNotLoaded));
    }

    #[test]
    fn test_model_errors_propagate() {
        let adapter = InferenceAdapter::new(
            Some(Arc::new(FailingModel::default())),
            "1.0.0",
            ResponsePolicy::Category,
        );
        let err = adapter.predict_output(&row_for("", "", "")).unwrap_err();
        assert_eq!(err.to_string(), "model failed: corrupted weights");
    }

    #[test]
    fn test_version_and_loaded_flag_are_injected() {
        let (adapter, _) = adapter(1, ResponsePolicy::Score);
        assert!(adapter.model_loaded());
        assert_eq!(adapter.version(), "1.0.0");
        assert_eq!(adapter.policy(), ResponsePolicy::Score);
    }

    #[test]
    fn test_column_contract_rejects_renamed_column() {
        let model = FixedModel::with_columns(1, &["Job Post", "Qualification", "Expertise/Area of Intrest"]);
        let err = check_column_contract(&model).unwrap_err();
        assert!(matches!(err, ModelLoadError::ColumnContract { .. }));
        assert!(check_column_contract(&FixedModel::new(1)).is_ok());
    }

    #[test]
    fn test_load_rejects_artifact_with_wrong_columns() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"columns": ["Job Post", "Qualification"], "classes": [1], "intercepts": [0.0]}"#,
        )
        .unwrap();
        let err = InferenceAdapter::load(file.path(), "1.0.0", ResponsePolicy::Category)
            .err()
            .unwrap();
        assert!(matches!(err, ModelLoadError::ColumnContract { .. }));
    }

    #[test]
    fn test_bundled_artifact_loads_and_predicts() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/model.json");
        let adapter = InferenceAdapter::load(&path, "1.0.0", ResponsePolicy::Score).unwrap();
        assert!(adapter.model_loaded());

        let result = adapter
            .predict_output(&row_for("mathematics teacher", "phd mathematics", "algebra"))
            .unwrap();
        assert!(matches!(result, PredictionResult::Evaluation { .. }));
    }

    #[test]
    fn test_response_policy_parsing() {
        assert_eq!("category".parse::<ResponsePolicy>().unwrap(), ResponsePolicy::Category);
        assert_eq!(" Score ".parse::<ResponsePolicy>().unwrap(), ResponsePolicy::Score);
        assert!("label".parse::<ResponsePolicy>().is_err());
        assert_eq!(ResponsePolicy::Score.to_string(), "score");
    }
}
