use eframe::App as EApp;
use egui::TextureHandle;
use log::debug;
use std::sync::{Arc, Mutex};

use crate::analysis::{detail_view, ranked_view, ActiveDevSeries, Aggregator, Ledger, RankedDeveloper, SortState};
use crate::config::Config;
use crate::error::DashboardError;
use crate::plotting::{ThemeMode, ThemeTokens};
use crate::types::{ActiveDevPoint, Aggregates, DeveloperRepoTotal, RepoCategory, SortKey, TimeWindow};

/// Loading status of one remote dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Headline numbers for the current filter scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeSummary {
    pub developers: usize,
    pub total_commits: u64,
}

/// Main application state
///
/// The canonical datasets are written once when their fetch completes.
/// Every control setter recomputes `aggregates` from the canonical ledger
/// for the current scope.
#[derive(Clone)]
pub struct App {
    pub active_devs: LoadState<ActiveDevSeries>,
    pub ledger: LoadState<Ledger>,
    aggregator: Aggregator,
    time_window: TimeWindow,
    repo_category: RepoCategory,
    search: String,
    sort: SortState,
    chart_position: f64,
    theme_mode: ThemeMode,
    aggregates: Aggregates,
    pub chart_texture: Option<TextureHandle>,
    pub update_needed: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            active_devs: LoadState::Loading,
            ledger: LoadState::Loading,
            aggregator: config.filters.aggregator(),
            time_window: config.filters.default_window,
            repo_category: config.filters.default_category,
            search: String::new(),
            sort: SortState::default(),
            chart_position: config.chart.default_position,
            theme_mode: ThemeMode::from_dark(config.ui.dark_mode),
            aggregates: Aggregates::default(),
            chart_texture: None,
            update_needed: true,
        }
    }

    /// Store the outcome of the ledger fetch.
    pub fn apply_ledger(&mut self, result: Result<Ledger, DashboardError>) {
        self.ledger = match result {
            Ok(ledger) => LoadState::Ready(ledger),
            Err(DashboardError::NoValidDates) => {
                LoadState::Failed("No valid dates found in commit data.".to_string())
            }
            Err(e) => {
                debug!("Ledger load failed: {}", e);
                LoadState::Failed("Error fetching commit data.".to_string())
            }
        };
        self.recompute();
    }

    /// Store the outcome of the active developer fetch.
    pub fn apply_active_devs(&mut self, result: Result<ActiveDevSeries, DashboardError>) {
        self.active_devs = match result {
            Ok(series) => LoadState::Ready(series),
            Err(e) => {
                debug!("Active developer load failed: {}", e);
                LoadState::Failed("Error fetching data. Please check your URL and try again.".to_string())
            }
        };
        self.update_needed = true;
    }

    fn recompute(&mut self) {
        self.aggregates = match self.ledger.ready() {
            Some(ledger) => self
                .aggregator
                .aggregate_ledger(ledger, self.time_window, self.repo_category),
            None => Aggregates::default(),
        };
        debug!(
            "Recomputed scope {}/{}: {} developers, {} pairs",
            self.time_window,
            self.repo_category,
            self.aggregates.dev_totals.len(),
            self.aggregates.dev_repo_totals.len()
        );
    }

    pub fn set_time_window(&mut self, window: TimeWindow) {
        self.time_window = window;
        self.recompute();
    }

    pub fn set_repo_category(&mut self, category: RepoCategory) {
        self.repo_category = category;
        self.recompute();
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Header click on the detail table.
    pub fn select_sort_key(&mut self, key: SortKey) {
        self.sort.select(key);
    }

    pub fn set_chart_position(&mut self, position: f64) {
        if position != self.chart_position {
            self.chart_position = position;
            self.update_needed = true;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        self.update_needed = true;
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn repo_category(&self) -> RepoCategory {
        self.repo_category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn chart_position(&self) -> f64 {
        self.chart_position
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn theme(&self) -> &'static ThemeTokens {
        self.theme_mode.tokens()
    }

    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    /// Leaderboard rows narrowed by the search box, ranks taken from the full ranking.
    pub fn leaderboard(&self) -> Vec<RankedDeveloper> {
        ranked_view(&self.aggregates.dev_totals, &self.search)
    }

    /// Top three of the unfiltered ranking.
    pub fn podium(&self) -> Vec<RankedDeveloper> {
        let mut top = ranked_view(&self.aggregates.dev_totals, "");
        top.truncate(3);
        top
    }

    /// Developer/repository rows narrowed by the search box and sorted.
    pub fn detail_rows(&self) -> Vec<DeveloperRepoTotal> {
        detail_view(&self.aggregates.dev_repo_totals, &self.search, self.sort)
    }

    /// Active developer points inside the chart slider's range.
    pub fn visible_series(&self) -> Vec<ActiveDevPoint> {
        self.active_devs
            .ready()
            .map(|series| series.select(self.chart_position))
            .unwrap_or_default()
    }

    pub fn summary(&self) -> ScopeSummary {
        ScopeSummary {
            developers: self.aggregates.dev_totals.len(),
            total_commits: self.aggregates.total_commits(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx);
        } else {
            log::error!("Failed to acquire app lock in update");
        }
    }
}
