//! Error types for the dashboard library.

use thiserror::Error;

use crate::types::Dataset;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The data source could not be reached or the body could not be read
    #[error("failed to fetch {dataset}: {message}")]
    Fetch { dataset: Dataset, message: String },

    #[error("fetching {dataset} returned HTTP {status}")]
    Status { dataset: Dataset, status: u16 },

    #[error("no URL configured for {0}")]
    MissingSource(Dataset),

    /// The ledger holds no parseable date, so time windows have no reference point
    #[error("no valid dates found in commit ledger")]
    NoValidDates,

    #[error("active developer series is not valid JSON: {0}")]
    SeriesFormat(#[from] serde_json::Error),

    #[error("unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },
}

impl DashboardError {
    pub fn fetch(dataset: Dataset, err: impl std::fmt::Display) -> Self {
        DashboardError::Fetch {
            dataset,
            message: err.to_string(),
        }
    }
}
