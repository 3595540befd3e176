//! Bag-of-words linear classifier stored as a JSON artifact.
//!
//! Artifact layout:
//! ```json
//! {
//!   "name": "teacher-eval-bow",
//!   "columns": ["Job Post", "Qualification", "Expertise/Area of Interest"],
//!   "classes": [4, 7, 9, 10],
//!   "intercepts": [0.4, 0.1, -0.2, -0.6],
//!   "weights": { "Qualification": { "phd": [-0.5, 0.0, 0.3, 0.9] } }
//! }
//! ```
//! Each class scores `intercept + Σ weights[column][token]` over every token of
//! every column; the highest-scoring class wins, ties going to the earlier class.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use super::model::{InferenceError, Model, ModelLoadError};
use crate::schema::NormalizedRow;

#[derive(Debug, Clone, Deserialize)]
pub struct LinearTextModel {
    #[serde(default)]
    name: Option<String>,
    columns: Vec<String>,
    classes: Vec<i64>,
    intercepts: Vec<f64>,
    #[serde(default)]
    weights: HashMap<String, HashMap<String, Vec<f64>>>,
}

impl LinearTextModel {
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|source| ModelLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    #[cfg(test)]
    pub fn from_json(json: &str) -> Result<Self, ModelLoadError> {
        let model: Self = serde_json::from_str(json).map_err(|source| ModelLoadError::Parse {
            path: "<inline>".into(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.classes.is_empty() {
            return Err(ModelLoadError::Invalid("no classes declared".to_string()));
        }
        if self.intercepts.len() != self.classes.len() {
            return Err(ModelLoadError::Invalid(format!(
                "{} intercepts for {} classes",
                self.intercepts.len(),
                self.classes.len()
            )));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(ModelLoadError::Invalid(format!("duplicate column '{column}'")));
            }
        }

        for (column, table) in &self.weights {
            if !seen.contains(column.as_str()) {
                return Err(ModelLoadError::Invalid(format!(
                    "weights reference undeclared column '{column}'"
                )));
            }
            for (token, weights) in table {
                if weights.len() != self.classes.len() {
                    return Err(ModelLoadError::Invalid(format!(
                        "token '{token}' in '{column}' has {} weights for {} classes",
                        weights.len(),
                        self.classes.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Model for LinearTextModel {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict(&self, row: &NormalizedRow) -> Result<i64, InferenceError> {
        let mut scores = self.intercepts.clone();

        for (column, text) in row.iter() {
            let Some(table) = self.weights.get(column) else {
                continue;
            };
            for token in text.split_whitespace() {
                if let Some(weights) = table.get(token) {
                    for (score, weight) in scores.iter_mut().zip(weights) {
                        *score += weight;
                    }
                }
            }
        }

        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        self.classes
            .get(best)
            .copied()
            .ok_or_else(|| InferenceError::Model("model has no classes".to_string()))
    }
}
