//! Render Model Module
//! Pure mapping from (dataset, selection) to everything the dashboard draws.

use crate::data::{DataProcessor, Dataset, LanguageFilter, Metric, RepoRecord};
use crate::stats::{CategoryShare, CorrelationMatrix, GroupMeans, MetricSummary, StatsCalculator};
use serde::Serialize;
use thiserror::Error;

/// Raised instead of a panel that needs a specific language while "All" is selected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Select a specific language to see the {panel} panel")]
pub struct EmptySelectionWarning {
    pub panel: &'static str,
}

/// User-controlled inputs of one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub language: LanguageFilter,
    pub top_n: usize,
    pub table_rows: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            language: LanguageFilter::All,
            top_n: 10,
            table_rows: 100,
        }
    }
}

/// Stars against forks for one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
}

/// Panel content for a single selected language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageDetail {
    pub language: String,
    pub record_count: usize,
    pub summary: Vec<MetricSummary>,
    pub top_by_stars: Vec<RepoRecord>,
    pub top_by_contributors: Vec<RepoRecord>,
}

/// Everything the presenter needs, already aggregated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardModel {
    pub selection: Selection,
    pub total_records: usize,
    pub filtered_records: usize,
    pub language_options: Vec<String>,
    pub top_by_stars: Vec<RepoRecord>,
    pub top_by_forks: Vec<RepoRecord>,
    pub scatter: Vec<ScatterPoint>,
    pub correlation: CorrelationMatrix,
    pub language_means: Vec<GroupMeans>,
    /// Computed over the unfiltered dataset.
    pub language_distribution: Vec<CategoryShare>,
    pub language_detail: Result<LanguageDetail, EmptySelectionWarning>,
    pub table: Vec<RepoRecord>,
}

impl DashboardModel {
    pub fn build(dataset: &Dataset, selection: &Selection) -> Self {
        let all = dataset.records();
        let filtered = DataProcessor::filter_by_language(all, &selection.language);
        let n = selection.top_n;

        tracing::debug!(
            language = %selection.language,
            top_n = n,
            rows = filtered.len(),
            "Rebuilding dashboard model"
        );

        let scatter = filtered
            .iter()
            .filter_map(|r| {
                Some(ScatterPoint {
                    name: r.name.clone(),
                    stars: r.stars?,
                    forks: r.forks?,
                })
            })
            .collect();

        Self {
            selection: selection.clone(),
            total_records: all.len(),
            filtered_records: filtered.len(),
            language_options: DataProcessor::language_options(all),
            top_by_stars: StatsCalculator::top_n_by_metric(&filtered, Metric::Stars, n),
            top_by_forks: StatsCalculator::top_n_by_metric(&filtered, Metric::Forks, n),
            scatter,
            correlation: StatsCalculator::correlation_matrix(&filtered),
            language_means: StatsCalculator::group_means(&filtered, n),
            language_distribution: StatsCalculator::distribution(all, n),
            language_detail: Self::language_detail(&filtered, &selection.language, n),
            table: filtered.iter().take(selection.table_rows).cloned().collect(),
        }
    }

    fn language_detail(
        filtered: &[RepoRecord],
        language: &LanguageFilter,
        n: usize,
    ) -> Result<LanguageDetail, EmptySelectionWarning> {
        let LanguageFilter::Language(language) = language else {
            return Err(EmptySelectionWarning {
                panel: "language detail",
            });
        };

        Ok(LanguageDetail {
            language: language.clone(),
            record_count: filtered.len(),
            summary: StatsCalculator::summarize(filtered),
            top_by_stars: StatsCalculator::top_n_by_metric(filtered, Metric::Stars, n),
            top_by_contributors: StatsCalculator::top_n_by_metric(
                filtered,
                Metric::Contributors,
                n,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let repo = |id: &str, lang: &str, stars, forks| {
            RepoRecord::new(id, Some(lang.to_string()))
                .with_metric(Metric::Stars, Some(stars))
                .with_metric(Metric::Forks, forks)
        };
        Dataset::new(
            "memory.csv",
            vec![
                repo("a/b", "Go", 10, Some(2)),
                repo("c/d", "Go", 5, None),
                repo("e/f", "Rust", 20, Some(8)),
            ],
        )
    }

    fn select(language: &str) -> Selection {
        Selection {
            language: language.parse().unwrap(),
            ..Selection::default()
        }
    }

    #[test]
    fn all_selection_covers_full_dataset() {
        let model = DashboardModel::build(&dataset(), &select("All"));
        assert_eq!(model.total_records, 3);
        assert_eq!(model.filtered_records, 3);
        assert_eq!(model.language_options, ["All", "Go", "Rust"]);
        assert_eq!(model.top_by_stars[0].name, "f");
        assert_eq!(model.scatter.len(), 2);
        assert_eq!(model.table.len(), 3);
        assert_eq!(
            model.language_detail,
            Err(EmptySelectionWarning {
                panel: "language detail"
            })
        );
    }

    #[test]
    fn language_selection_narrows_panels_but_not_distribution() {
        let model = DashboardModel::build(&dataset(), &select("Go"));
        assert_eq!(model.filtered_records, 2);
        assert_eq!(model.top_by_stars.len(), 2);
        assert_eq!(model.language_means.len(), 1);
        assert_eq!(model.language_distribution.len(), 2);

        let detail = model.language_detail.unwrap();
        assert_eq!(detail.language, "Go");
        assert_eq!(detail.record_count, 2);
        assert_eq!(detail.top_by_stars[0].repository, "a/b");
    }

    #[test]
    fn top_n_and_table_rows_are_respected() {
        let selection = Selection {
            top_n: 1,
            table_rows: 2,
            ..Selection::default()
        };
        let model = DashboardModel::build(&dataset(), &selection);
        assert_eq!(model.top_by_stars.len(), 1);
        assert_eq!(model.top_by_forks[0].repository, "e/f");
        assert_eq!(model.language_distribution.len(), 1);
        assert_eq!(model.table.len(), 2);
    }

    #[test]
    fn empty_dataset_builds_empty_model() {
        let model = DashboardModel::build(&Dataset::new("empty.csv", Vec::new()), &select("All"));
        assert_eq!(model.total_records, 0);
        assert!(model.top_by_stars.is_empty());
        assert!(model.language_means.is_empty());
        assert!(model.language_distribution.is_empty());
        assert_eq!(model.language_options, ["All"]);
    }

    #[test]
    fn model_serializes_to_json() {
        let model = DashboardModel::build(&dataset(), &select("Rust"));
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["selection"]["language"], "Rust");
        assert_eq!(json["language_detail"]["Ok"]["record_count"], 1);
    }
}
