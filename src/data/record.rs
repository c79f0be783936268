//! Repository Record Module
//! Strongly-typed row of the GitHub repository dataset.

use serde::Serialize;

/// Literal string the raw CSV uses for a missing value.
pub const NULL_SENTINEL: &str = "NULL";

/// Numeric columns of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Stars,
    Forks,
    Issues,
    PullRequests,
    Contributors,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Stars,
        Metric::Forks,
        Metric::Issues,
        Metric::PullRequests,
        Metric::Contributors,
    ];

    /// Column name in the source CSV.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Stars => "stars_count",
            Metric::Forks => "forks_count",
            Metric::Issues => "issues_count",
            Metric::PullRequests => "pull_requests",
            Metric::Contributors => "contributors",
        }
    }

    /// Human readable label for axes and tables.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Stars => "Stars",
            Metric::Forks => "Forks",
            Metric::Issues => "Issues",
            Metric::PullRequests => "Pull Requests",
            Metric::Contributors => "Contributors",
        }
    }
}

/// One repository row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoRecord {
    pub repository: String,
    pub name: String,
    pub language: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub issues: Option<u64>,
    pub pull_requests: Option<u64>,
    pub contributors: Option<u64>,
}

impl RepoRecord {
    /// Build a record from its identifier, deriving the short name.
    pub fn new(repository: impl Into<String>, language: Option<String>) -> Self {
        let repository = repository.into();
        let name = short_name(&repository).to_string();
        Self {
            repository,
            name,
            language,
            stars: None,
            forks: None,
            issues: None,
            pull_requests: None,
            contributors: None,
        }
    }

    /// Set a metric value, builder style.
    pub fn with_metric(mut self, metric: Metric, value: Option<u64>) -> Self {
        *self.metric_mut(metric) = value;
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Stars => self.stars,
            Metric::Forks => self.forks,
            Metric::Issues => self.issues,
            Metric::PullRequests => self.pull_requests,
            Metric::Contributors => self.contributors,
        }
    }

    fn metric_mut(&mut self, metric: Metric) -> &mut Option<u64> {
        match metric {
            Metric::Stars => &mut self.stars,
            Metric::Forks => &mut self.forks,
            Metric::Issues => &mut self.issues,
            Metric::PullRequests => &mut self.pull_requests,
            Metric::Contributors => &mut self.contributors,
        }
    }
}

/// Substring after the final '/', or the whole identifier when there is none.
pub fn short_name(identifier: &str) -> &str {
    identifier
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(identifier)
}

/// Map the raw null marker to an absent value.
pub fn absent_if_sentinel(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != NULL_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_takes_text_after_last_slash() {
        assert_eq!(short_name("rust-lang/rust"), "rust");
        assert_eq!(short_name("a/b/c"), "c");
        assert_eq!(short_name("standalone"), "standalone");
        assert_eq!(short_name("owner/"), "");
    }

    #[test]
    fn new_record_derives_name() {
        let record = RepoRecord::new("tokio-rs/tokio", Some("Rust".to_string()));
        assert_eq!(record.name, "tokio");
        assert_eq!(record.language.as_deref(), Some("Rust"));
        assert!(Metric::ALL.iter().all(|m| record.metric(*m).is_none()));
    }

    #[test]
    fn with_metric_sets_only_that_field() {
        let record = RepoRecord::new("a/b", None)
            .with_metric(Metric::Forks, Some(3))
            .with_metric(Metric::Contributors, Some(7));
        assert_eq!(record.metric(Metric::Forks), Some(3));
        assert_eq!(record.metric(Metric::Contributors), Some(7));
        assert_eq!(record.metric(Metric::Stars), None);
    }

    #[test]
    fn sentinel_becomes_absent() {
        assert_eq!(absent_if_sentinel(Some("NULL")), None);
        assert_eq!(absent_if_sentinel(Some("Go")), Some("Go"));
        assert_eq!(absent_if_sentinel(Some("null")), Some("null"));
        assert_eq!(absent_if_sentinel(None), None);
    }
}
