//! The single-row table handed to the model.

/// Column names the model artifact was trained with. Order matters.
pub const JOB_POST_COLUMN: &str = "Job Post";
pub const QUALIFICATION_COLUMN: &str = "Qualification";
pub const EXPERTISE_COLUMN: &str = "Expertise/Area of Interest";

pub const COLUMNS: [&str; 3] = [JOB_POST_COLUMN, QUALIFICATION_COLUMN, EXPERTISE_COLUMN];

/// Ordered `(column, normalized text)` cells of one model input row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    cells: Vec<(String, String)>,
}

impl NormalizedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.push((column.into(), value.into()));
        self
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// True when column names and order match `expected` exactly.
    pub fn matches_columns<S: AsRef<str>>(&self, expected: &[S]) -> bool {
        self.cells.len() == expected.len()
            && self
                .columns()
                .zip(expected)
                .all(|(actual, expected)| actual == expected.as_ref())
    }
}
