pub mod request;
pub mod row;

pub use request::PredictRequest;
pub use row::{NormalizedRow, COLUMNS, EXPERTISE_COLUMN, JOB_POST_COLUMN, QUALIFICATION_COLUMN};
