//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing the commit ledger, the active developer series and the views
//! derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// One row of the commit ledger.
///
/// Records are immutable once parsed and are only ever read by the
/// aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitRecord {
    /// Calendar day the commits were made on
    pub date: NaiveDate,
    /// Developer identifier (a GitHub login)
    pub developer: String,
    /// Repository identifier in `owner/name` form
    pub repository: String,
    /// Number of commits for this developer, repository and day
    pub commit_count: u64,
}

/// A single point of the active developer time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDevPoint {
    pub date: NaiveDate,
    pub active_dev_count: u64,
}

/// Total commits for one developer within the active filter scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeveloperTotal {
    pub developer: String,
    pub total_commits: u64,
}

/// Total commits for one developer in one repository within the active filter scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeveloperRepoTotal {
    pub developer: String,
    pub repository: String,
    pub total_commits: u64,
}

/// The two projections produced by the aggregation engine.
///
/// Both lists are sorted descending by `total_commits`, ties kept in the
/// order the key was first encountered in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub dev_totals: Vec<DeveloperTotal>,
    pub dev_repo_totals: Vec<DeveloperRepoTotal>,
}

impl Aggregates {
    pub fn is_empty(&self) -> bool {
        self.dev_totals.is_empty() && self.dev_repo_totals.is_empty()
    }

    /// Sum of all commits in scope.
    pub fn total_commits(&self) -> u64 {
        self.dev_totals
            .iter()
            .map(|d| d.total_commits)
            .fold(0, u64::saturating_add)
    }
}

/// Named time windows, relative to the most recent date in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[default]
    #[serde(rename = "last30d")]
    Last30Days,
    #[serde(rename = "last90d")]
    Last90Days,
    #[serde(rename = "last1y")]
    LastYear,
    #[serde(rename = "allTime")]
    AllTime,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Last30Days,
        TimeWindow::Last90Days,
        TimeWindow::LastYear,
        TimeWindow::AllTime,
    ];

    /// Number of days to look back from the reference date, `None` for all time.
    pub fn lookback_days(self) -> Option<u64> {
        match self {
            TimeWindow::Last30Days => Some(30),
            TimeWindow::Last90Days => Some(90),
            TimeWindow::LastYear => Some(365),
            TimeWindow::AllTime => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Last30Days => "last30d",
            TimeWindow::Last90Days => "last90d",
            TimeWindow::LastYear => "last1y",
            TimeWindow::AllTime => "allTime",
        }
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Last30Days => "30 Days",
            TimeWindow::Last90Days => "90 Days",
            TimeWindow::LastYear => "1 Year",
            TimeWindow::AllTime => "All Time",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashboardError::UnknownOption {
                kind: "time window",
                value: s.to_string(),
            })
    }
}

/// Ecosystem segment of a repository. `All` is the pseudo-category that
/// disables repository filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoCategory {
    #[default]
    All,
    Foundation,
    Core,
    Ecosystem,
}

impl RepoCategory {
    pub const ALL: [RepoCategory; 4] = [
        RepoCategory::All,
        RepoCategory::Foundation,
        RepoCategory::Core,
        RepoCategory::Ecosystem,
    ];

    /// Whether a repository classified as `category` passes this filter.
    pub fn admits(self, category: RepoCategory) -> bool {
        self == RepoCategory::All || self == category
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepoCategory::All => "all",
            RepoCategory::Foundation => "foundation",
            RepoCategory::Core => "core",
            RepoCategory::Ecosystem => "ecosystem",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepoCategory::All => "All Repos",
            RepoCategory::Foundation => "Foundation",
            RepoCategory::Core => "Core",
            RepoCategory::Ecosystem => "Ecosystem",
        }
    }
}

impl fmt::Display for RepoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepoCategory {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepoCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashboardError::UnknownOption {
                kind: "repository category",
                value: s.to_string(),
            })
    }
}

/// Columns of the developer/repository detail table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "dev")]
    Developer,
    #[serde(rename = "repo")]
    Repository,
    #[default]
    #[serde(rename = "commits")]
    Commits,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Developer => "dev",
            SortKey::Repository => "repo",
            SortKey::Commits => "commits",
        }
    }
}

impl FromStr for SortKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dev" => Ok(SortKey::Developer),
            "repo" => Ok(SortKey::Repository),
            "commits" => Ok(SortKey::Commits),
            other => Err(DashboardError::UnknownOption {
                kind: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Arrow shown next to the active column header
    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DashboardError::UnknownOption {
                kind: "sort order",
                value: other.to_string(),
            }),
        }
    }
}

/// The two remote datasets the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    ActiveDevs,
    CommitLedger,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::ActiveDevs => f.write_str("active developer series"),
            Dataset::CommitLedger => f.write_str("commit ledger"),
        }
    }
}
