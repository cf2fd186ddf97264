pub mod aggregate;
pub mod classify;
pub mod ledger;
pub mod ranking;
pub mod series;
pub mod window;


pub use aggregate::Aggregator;
pub use classify::RepoClassifier;
pub use ledger::{parse_ledger_csv, Ledger};
pub use ranking::{detail_view, ranked_view, RankIndex, RankedDeveloper, SortState};
pub use series::{load_series, ActiveDevSeries};
pub use window::{DenyList, WindowFilter};
