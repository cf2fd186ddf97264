use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{DeveloperRepoTotal, DeveloperTotal, SortKey, SortOrder};

/// Column and direction of the developer/repository table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Header click: the same column flips direction, a new column starts descending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.toggled();
        } else {
            self.key = key;
            self.order = SortOrder::Desc;
        }
    }

    fn compare(&self, a: &DeveloperRepoTotal, b: &DeveloperRepoTotal) -> Ordering {
        let ordering = match self.key {
            SortKey::Developer => compare_identifiers(&a.developer, &b.developer),
            SortKey::Repository => compare_identifiers(&a.repository, &b.repository),
            SortKey::Commits => a.total_commits.cmp(&b.total_commits),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Case-insensitive first, so `Alice` and `alice` sit together.
fn compare_identifiers(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorted copy of the detail projection. Equal rows keep their incoming order.
pub fn sort_dev_repo_totals(rows: &[DeveloperRepoTotal], sort: SortState) -> Vec<DeveloperRepoTotal> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted
}

/// Case-insensitive substring match on a developer identifier.
///
/// A blank query matches everyone.
pub fn matches_search(developer: &str, query: &str) -> bool {
    let needle = query.trim();
    needle.is_empty() || developer.to_lowercase().contains(&needle.to_lowercase())
}

/// Narrow the detail rows by developer search, then sort.
pub fn detail_view(rows: &[DeveloperRepoTotal], query: &str, sort: SortState) -> Vec<DeveloperRepoTotal> {
    let narrowed: Vec<DeveloperRepoTotal> = rows
        .iter()
        .filter(|row| matches_search(&row.developer, query))
        .cloned()
        .collect();
    sort_dev_repo_totals(&narrowed, sort)
}

/// A leaderboard row with its position in the unfiltered ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDeveloper {
    pub rank: usize,
    pub developer: String,
    pub total_commits: u64,
}

/// 1-based positions of every developer in the full `dev_totals` ordering.
///
/// Built before any search narrowing so a developer keeps the same rank
/// whatever is typed in the search box.
#[derive(Debug, Clone, Default)]
pub struct RankIndex {
    ranks: HashMap<String, usize>,
}

impl RankIndex {
    pub fn new(dev_totals: &[DeveloperTotal]) -> Self {
        let ranks = dev_totals
            .iter()
            .enumerate()
            .map(|(position, total)| (total.developer.clone(), position + 1))
            .collect();
        Self { ranks }
    }

    pub fn rank_of(&self, developer: &str) -> Option<usize> {
        self.ranks.get(developer).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Search-narrowed leaderboard that keeps the unfiltered ranks.
pub fn ranked_view(dev_totals: &[DeveloperTotal], query: &str) -> Vec<RankedDeveloper> {
    let index = RankIndex::new(dev_totals);
    dev_totals
        .iter()
        .filter(|total| matches_search(&total.developer, query))
        .map(|total| RankedDeveloper {
            rank: index.rank_of(&total.developer).unwrap_or_default(),
            developer: total.developer.clone(),
            total_commits: total.total_commits,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(developer: &str, repository: &str, total_commits: u64) -> DeveloperRepoTotal {
        DeveloperRepoTotal {
            developer: developer.to_string(),
            repository: repository.to_string(),
            total_commits,
        }
    }

    fn total(developer: &str, total_commits: u64) -> DeveloperTotal {
        DeveloperTotal {
            developer: developer.to_string(),
            total_commits,
        }
    }

    #[test]
    fn test_select_toggles_and_resets() {
        let mut sort = SortState::default();
        assert_eq!(sort, SortState::new(SortKey::Commits, SortOrder::Desc));

        sort.select(SortKey::Commits);
        assert_eq!(sort.order, SortOrder::Asc);

        sort.select(SortKey::Developer);
        assert_eq!(sort, SortState::new(SortKey::Developer, SortOrder::Desc));

        sort.select(SortKey::Developer);
        assert_eq!(sort, SortState::new(SortKey::Developer, SortOrder::Asc));
    }

    #[test]
    fn test_sort_by_each_key() {
        let rows = vec![row("bob", "z/z", 5), row("Alice", "a/a", 1), row("carol", "m/m", 9)];

        let by_dev = sort_dev_repo_totals(&rows, SortState::new(SortKey::Developer, SortOrder::Asc));
        let names: Vec<&str> = by_dev.iter().map(|r| r.developer.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "carol"]);

        let by_repo = sort_dev_repo_totals(&rows, SortState::new(SortKey::Repository, SortOrder::Desc));
        let repos: Vec<&str> = by_repo.iter().map(|r| r.repository.as_str()).collect();
        assert_eq!(repos, vec!["z/z", "m/m", "a/a"]);

        let by_commits = sort_dev_repo_totals(&rows, SortState::new(SortKey::Commits, SortOrder::Asc));
        let commits: Vec<u64> = by_commits.iter().map(|r| r.total_commits).collect();
        assert_eq!(commits, vec![1, 5, 9]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = vec![row("alice", "x/1", 3), row("alice", "x/2", 3), row("alice", "x/3", 3)];
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let sorted = sort_dev_repo_totals(&rows, SortState::new(SortKey::Commits, order));
            assert_eq!(sorted, rows);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        assert!(matches_search("AliceSmith", "cesm"));
        assert!(matches_search("alice", "  "));
        assert!(!matches_search("alice", "bob"));
    }

    #[test]
    fn test_detail_view_filters_then_sorts() {
        let rows = vec![row("alice", "x/a", 1), row("bob", "x/b", 7), row("alina", "x/c", 4)];
        let view = detail_view(&rows, "ALI", SortState::default());
        assert_eq!(view, vec![row("alina", "x/c", 4), row("alice", "x/a", 1)]);
    }

    #[test]
    fn test_ranks_survive_search() {
        let totals = vec![total("carol", 30), total("alice", 20), total("bob", 10)];
        let view = ranked_view(&totals, "bo");
        assert_eq!(
            view,
            vec![RankedDeveloper {
                rank: 3,
                developer: "bob".to_string(),
                total_commits: 10,
            }]
        );

        let full = ranked_view(&totals, "");
        let ranks: Vec<usize> = full.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_rank_index_lookup() {
        let index = RankIndex::new(&[total("carol", 30), total("alice", 20)]);
        assert_eq!(index.rank_of("alice"), Some(2));
        assert_eq!(index.rank_of("nobody"), None);
        assert_eq!(index.len(), 2);
    }
}
