//! Data Processor Module
//! Language filtering and selector values.

use crate::data::record::RepoRecord;
use serde::Serialize;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Selector value that disables filtering.
pub const ALL_LANGUAGES: &str = "All";

/// Language selection from the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum LanguageFilter {
    #[default]
    All,
    Language(String),
}

impl LanguageFilter {
    pub fn matches(&self, record: &RepoRecord) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Language(lang) => record.language.as_deref() == Some(lang.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, LanguageFilter::All)
    }
}

impl FromStr for LanguageFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_LANGUAGES {
            LanguageFilter::All
        } else {
            LanguageFilter::Language(s.to_string())
        })
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => f.write_str(ALL_LANGUAGES),
            LanguageFilter::Language(lang) => f.write_str(lang),
        }
    }
}

impl From<LanguageFilter> for String {
    fn from(filter: LanguageFilter) -> Self {
        filter.to_string()
    }
}

/// Handles filtering operations over loaded records.
pub struct DataProcessor;

impl DataProcessor {
    /// Records whose language matches the filter, in original order.
    pub fn filter_by_language(records: &[RepoRecord], filter: &LanguageFilter) -> Vec<RepoRecord> {
        if filter.is_all() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Selector values: "All" followed by sorted distinct languages.
    pub fn language_options(records: &[RepoRecord]) -> Vec<String> {
        let languages: BTreeSet<&str> = records
            .iter()
            .filter_map(|r| r.language.as_deref())
            .collect();

        std::iter::once(ALL_LANGUAGES)
            .chain(languages)
            .map(str::to_string)
            .collect()
    }
}
