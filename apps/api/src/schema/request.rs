use serde::Deserialize;

use crate::preprocess::TextNormalizer;
use crate::schema::{NormalizedRow, EXPERTISE_COLUMN, JOB_POST_COLUMN, QUALIFICATION_COLUMN};

/// Body of `POST /predict`. All three fields are required strings; empty
/// strings are accepted. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    /// Job post the candidate is applying for.
    pub job_post: String,
    /// Candidate's qualification.
    pub qualification: String,
    /// Candidate's area of expertise / interest.
    pub expertise: String,
}

impl PredictRequest {
    /// Normalizes each field independently into the model's input row.
    pub fn get_preprocessed(&self, normalizer: &TextNormalizer) -> NormalizedRow {
        NormalizedRow::new()
            .with_cell(JOB_POST_COLUMN, normalizer.normalize(Some(self.job_post.as_str())))
            .with_cell(QUALIFICATION_COLUMN, normalizer.normalize(Some(self.qualification.as_str())))
            .with_cell(EXPERTISE_COLUMN, normalizer.normalize(Some(self.expertise.as_str())))
    }
}
