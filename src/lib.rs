//! # Developer Activity Dashboard Library
//!
//! `devboard` turns two remote datasets into the views of a contributor
//! activity dashboard: a daily active developer series and a commit ledger
//! of `(date, developer, repository, commits)` rows.
//!
//! ## Features
//!
//! - Parse the commit ledger CSV and the active developer JSON series
//! - Filter commits by time window and repository category
//! - Aggregate commits per developer and per developer and repository
//! - Rank developers with ranks that survive search narrowing
//! - Sort the detail table by developer, repository or commit count
//! - Select a date range of the active developer chart with a slider
//!
//! ## Example
//!
//! ```
//! use devboard::analysis::{Aggregator, Ledger};
//! use devboard::types::{RepoCategory, TimeWindow};
//!
//! let csv = "date,dev,repo,commits\n2024-03-01,alice,algorand/go-algorand,5\n";
//! let ledger = Ledger::from_csv(csv).unwrap();
//! let result = Aggregator::default().aggregate_ledger(&ledger, TimeWindow::Last30Days, RepoCategory::Core);
//! assert_eq!(result.dev_totals[0].total_commits, 5);
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as DashboardApp;
pub use error::{DashboardError, Result};
