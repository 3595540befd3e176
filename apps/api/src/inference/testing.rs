//! Fake models for adapter and route tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::model::{InferenceError, Model};
use crate::schema::{NormalizedRow, COLUMNS, EXPERTISE_COLUMN, JOB_POST_COLUMN, QUALIFICATION_COLUMN};

pub fn schema_columns() -> Vec<String> {
    COLUMNS.iter().map(|c| c.to_string()).collect()
}

pub fn row_for(job_post: &str, qualification: &str, expertise: &str) -> NormalizedRow {
    NormalizedRow::new()
        .with_cell(JOB_POST_COLUMN, job_post)
        .with_cell(QUALIFICATION_COLUMN, qualification)
        .with_cell(EXPERTISE_COLUMN, expertise)
}

/// Always predicts the same label and counts how often it was asked.
pub struct FixedModel {
    label: i64,
    columns: Vec<String>,
    calls: AtomicUsize,
}

impl FixedModel {
    pub fn new(label: i64) -> Self {
        Self {
            label,
            columns: schema_columns(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_columns(label: i64, columns: &[&str]) -> Self {
        Self {
            label,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Model for FixedModel {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict(&self, _row: &NormalizedRow) -> Result<i64, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label)
    }
}

/// Predicts the number of tokens across all columns, so distinct inputs get
/// distinguishable outputs.
pub struct TokenCountModel {
    columns: Vec<String>,
}

impl Default for TokenCountModel {
    fn default() -> Self {
        Self {
            columns: schema_columns(),
        }
    }
}

impl Model for TokenCountModel {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict(&self, row: &NormalizedRow) -> Result<i64, InferenceError> {
        let tokens: usize = row
            .iter()
            .map(|(_, text)| text.split_whitespace().count())
            .sum();
        Ok(tokens as i64)
    }
}

/// Simulates a corrupted artifact.
pub struct FailingModel {
    columns: Vec<String>,
}

impl Default for FailingModel {
    fn default() -> Self {
        Self {
            columns: schema_columns(),
        }
    }
}

impl Model for FailingModel {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict(&self, _row: &NormalizedRow) -> Result<i64, InferenceError> {
        Err(InferenceError::Model("corrupted weights".to_string()))
    }
}
