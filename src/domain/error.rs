// Analytics error types
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("invalid {field} range: {min} to {max}")]
    InvalidRange {
        field: &'static str,
        min: String,
        max: String,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown sort key: {0}")]
    InvalidSortKey(String),

    #[error("unknown report type: {0}")]
    InvalidReportType(String),

    #[error("unknown export format: {0}")]
    InvalidExportFormat(String),

    #[error("restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

impl AnalyticsError {
    pub fn invalid_range<T: ToString>(field: &'static str, min: T, max: T) -> Self {
        Self::InvalidRange {
            field,
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}
