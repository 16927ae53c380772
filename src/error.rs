use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GanttError {
    #[error("Work item {item_id}: invalid {field} date '{value}'")]
    InvalidDate {
        item_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Work item {item_id}: no planned end or due date")]
    MissingEndDate { item_id: String },

    #[error("Work item {item_id}: start {start} is after end {end}")]
    InvertedRange {
        item_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("An interaction on work item {item_id} is already in progress")]
    SessionActive { item_id: String },

    #[error("Import failed: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GanttError>;
