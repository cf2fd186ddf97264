use crate::types::RepoCategory;

/// Owner namespaces of the foundation and developer relations organisations.
pub const FOUNDATION_PREFIXES: &[&str] = &["algorandfoundation/", "algorand-devrel/"];
/// Owner namespace of the core protocol organisation.
pub const CORE_PREFIXES: &[&str] = &["algorand/"];

/// Maps `owner/name` repository identifiers to an ecosystem segment.
///
/// Foundation prefixes are checked before core prefixes; anything matching
/// neither is ecosystem. `classify` never returns [`RepoCategory::All`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoClassifier {
    foundation_prefixes: Vec<String>,
    core_prefixes: Vec<String>,
}

impl RepoClassifier {
    pub fn new(foundation_prefixes: Vec<String>, core_prefixes: Vec<String>) -> Self {
        Self {
            foundation_prefixes,
            core_prefixes,
        }
    }

    pub fn classify(&self, repository: &str) -> RepoCategory {
        let matches = |prefixes: &[String]| prefixes.iter().any(|p| repository.starts_with(p.as_str()));

        if matches(&self.foundation_prefixes) {
            RepoCategory::Foundation
        } else if matches(&self.core_prefixes) {
            RepoCategory::Core
        } else {
            RepoCategory::Ecosystem
        }
    }
}

impl Default for RepoClassifier {
    fn default() -> Self {
        Self::new(
            FOUNDATION_PREFIXES.iter().map(|p| p.to_string()).collect(),
            CORE_PREFIXES.iter().map(|p| p.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_table() {
        let classifier = RepoClassifier::default();
        assert_eq!(classifier.classify("algorand/go-algorand"), RepoCategory::Core);
        assert_eq!(classifier.classify("algorandfoundation/tools"), RepoCategory::Foundation);
        assert_eq!(classifier.classify("algorand-devrel/examples"), RepoCategory::Foundation);
        assert_eq!(classifier.classify("someoneelse/wallet"), RepoCategory::Ecosystem);
    }

    #[test]
    fn test_prefix_requires_owner_separator() {
        let classifier = RepoClassifier::default();
        // "algorand/" must not match the longer owner names
        assert_eq!(classifier.classify("algorandlabs/sdk"), RepoCategory::Ecosystem);
        assert_eq!(classifier.classify("algorand"), RepoCategory::Ecosystem);
    }

    #[test]
    fn test_foundation_wins_over_core() {
        let classifier = RepoClassifier::new(vec!["shared/".to_string()], vec!["shared/".to_string()]);
        assert_eq!(classifier.classify("shared/repo"), RepoCategory::Foundation);
    }
}
