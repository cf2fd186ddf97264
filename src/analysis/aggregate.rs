use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use crate::analysis::classify::RepoClassifier;
use crate::analysis::ledger::{max_date, Ledger};
use crate::analysis::window::{DenyList, WindowFilter};
use crate::types::{
    Aggregates, CommitRecord, DeveloperRepoTotal, DeveloperTotal, RepoCategory, TimeWindow,
};

/// The aggregation engine.
///
/// Turns the canonical commit ledger into per-developer and
/// per-developer-per-repository totals for one filter scope. Every call
/// starts from the records it is given; nothing is carried over between
/// scopes.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    deny: DenyList,
    classifier: RepoClassifier,
}

impl Aggregator {
    pub fn new(deny: DenyList, classifier: RepoClassifier) -> Self {
        Self { deny, classifier }
    }

    pub fn classifier(&self) -> &RepoClassifier {
        &self.classifier
    }

    pub fn deny_list(&self) -> &DenyList {
        &self.deny
    }

    /// Aggregate a canonical ledger for a window and repository category.
    pub fn aggregate_ledger(
        &self,
        ledger: &Ledger,
        window: TimeWindow,
        category: RepoCategory,
    ) -> Aggregates {
        self.aggregate_with_reference(ledger.records(), Some(ledger.max_date()), window, category)
    }

    /// Aggregate raw records, taking the reference date from the records themselves.
    pub fn aggregate(
        &self,
        records: &[CommitRecord],
        window: TimeWindow,
        category: RepoCategory,
    ) -> Aggregates {
        self.aggregate_with_reference(records, max_date(records), window, category)
    }

    /// Aggregate against an explicit reference date.
    ///
    /// A missing reference date yields empty projections.
    pub fn aggregate_with_reference(
        &self,
        records: &[CommitRecord],
        reference: Option<NaiveDate>,
        window: TimeWindow,
        category: RepoCategory,
    ) -> Aggregates {
        let in_window = WindowFilter::new(window, reference, &self.deny);

        let mut by_dev = Totals::default();
        let mut by_dev_repo = Totals::default();
        let mut surviving = 0usize;

        for record in records {
            if !in_window.contains(record) {
                continue;
            }
            if category != RepoCategory::All
                && !category.admits(self.classifier.classify(&record.repository))
            {
                continue;
            }
            surviving += 1;
            by_dev.add((record.developer.as_str(), None), record.commit_count);
            by_dev_repo.add(
                (record.developer.as_str(), Some(record.repository.as_str())),
                record.commit_count,
            );
        }

        debug!(
            "Aggregated {} of {} records for window={} category={}",
            surviving,
            records.len(),
            window,
            category
        );

        Aggregates {
            dev_totals: by_dev
                .into_sorted()
                .into_iter()
                .map(|((developer, _), total_commits)| DeveloperTotal {
                    developer: developer.to_string(),
                    total_commits,
                })
                .collect(),
            dev_repo_totals: by_dev_repo
                .into_sorted()
                .into_iter()
                .map(|((developer, repository), total_commits)| DeveloperRepoTotal {
                    developer: developer.to_string(),
                    repository: repository.unwrap_or_default().to_string(),
                    total_commits,
                })
                .collect(),
        }
    }
}

type GroupKey<'r> = (&'r str, Option<&'r str>);

/// Running sums that remember the order keys were first seen in.
#[derive(Default)]
struct Totals<'r> {
    index: HashMap<GroupKey<'r>, usize>,
    entries: Vec<(GroupKey<'r>, u64)>,
}

impl<'r> Totals<'r> {
    fn add(&mut self, key: GroupKey<'r>, commits: u64) {
        match self.index.get(&key) {
            Some(&slot) => {
                let total = &mut self.entries[slot].1;
                *total = total.saturating_add(commits);
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, commits));
            }
        }
    }

    /// Descending by total; `sort_by` is stable so ties stay in first-seen order.
    fn into_sorted(mut self) -> Vec<(GroupKey<'r>, u64)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(date: &str, developer: &str, repository: &str, commit_count: u64) -> CommitRecord {
        CommitRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            developer: developer.to_string(),
            repository: repository.to_string(),
            commit_count,
        }
    }

    #[test]
    fn test_groups_by_developer_and_pair() {
        let records = vec![
            record("2024-01-01", "alice", "foo/bar", 3),
            record("2024-01-02", "bob", "foo/bar", 10),
            record("2024-01-03", "alice", "foo/baz", 4),
            record("2024-01-04", "alice", "foo/bar", 1),
        ];
        let result = Aggregator::default().aggregate(&records, TimeWindow::AllTime, RepoCategory::All);

        assert_eq!(
            result.dev_totals,
            vec![
                DeveloperTotal { developer: "bob".to_string(), total_commits: 10 },
                DeveloperTotal { developer: "alice".to_string(), total_commits: 8 },
            ]
        );
        assert_eq!(
            result.dev_repo_totals,
            vec![
                DeveloperRepoTotal {
                    developer: "bob".to_string(),
                    repository: "foo/bar".to_string(),
                    total_commits: 10,
                },
                DeveloperRepoTotal {
                    developer: "alice".to_string(),
                    repository: "foo/bar".to_string(),
                    total_commits: 4,
                },
                DeveloperRepoTotal {
                    developer: "alice".to_string(),
                    repository: "foo/baz".to_string(),
                    total_commits: 4,
                },
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            record("2024-01-01", "carol", "x/a", 2),
            record("2024-01-01", "alice", "x/a", 2),
            record("2024-01-01", "bob", "x/a", 2),
        ];
        let result = Aggregator::default().aggregate(&records, TimeWindow::AllTime, RepoCategory::All);
        let order: Vec<&str> = result.dev_totals.iter().map(|d| d.developer.as_str()).collect();
        assert_eq!(order, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn test_category_filter() {
        let records = vec![
            record("2024-01-01", "alice", "algorand/go-algorand", 3),
            record("2024-01-01", "alice", "algorandfoundation/tools", 5),
            record("2024-01-01", "bob", "someone/wallet", 7),
        ];
        let aggregator = Aggregator::default();

        let core = aggregator.aggregate(&records, TimeWindow::AllTime, RepoCategory::Core);
        assert_eq!(core.total_commits(), 3);

        let foundation = aggregator.aggregate(&records, TimeWindow::AllTime, RepoCategory::Foundation);
        assert_eq!(foundation.total_commits(), 5);

        let ecosystem = aggregator.aggregate(&records, TimeWindow::AllTime, RepoCategory::Ecosystem);
        assert_eq!(ecosystem.dev_totals.len(), 1);
        assert_eq!(ecosystem.dev_totals[0].developer, "bob");
    }

    #[test]
    fn test_empty_input() {
        let result = Aggregator::default().aggregate(&[], TimeWindow::Last30Days, RepoCategory::All);
        assert!(result.is_empty());
        assert_eq!(result, Aggregates::default());
    }

    #[test]
    fn test_missing_reference_yields_empty_projection() {
        let records = vec![record("2024-01-01", "alice", "foo/bar", 3)];
        let result = Aggregator::default().aggregate_with_reference(
            &records,
            None,
            TimeWindow::AllTime,
            RepoCategory::All,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_custom_deny_list() {
        let records = vec![
            record("2024-01-01", "ci-bot", "foo/bar", 50),
            record("2024-01-01", "alice", "foo/bar", 1),
        ];
        let aggregator = Aggregator::new(DenyList::new(["ci-bot"]), RepoClassifier::default());
        let result = aggregator.aggregate(&records, TimeWindow::AllTime, RepoCategory::All);
        assert_eq!(result.dev_totals.len(), 1);
        assert_eq!(result.dev_totals[0].developer, "alice");
    }

    #[test]
    fn test_huge_counts_saturate() {
        let records = vec![
            record("2024-01-01", "alice", "foo/bar", u64::MAX),
            record("2024-01-02", "alice", "foo/bar", u64::MAX),
            record("2024-01-02", "bob", "foo/bar", 1),
        ];
        let result = Aggregator::default().aggregate(&records, TimeWindow::AllTime, RepoCategory::All);
        assert_eq!(result.dev_totals[0].total_commits, u64::MAX);
        assert_eq!(result.dev_repo_totals[0].total_commits, u64::MAX);
        assert_eq!(result.total_commits(), u64::MAX);
    }
}
