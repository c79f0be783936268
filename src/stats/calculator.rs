//! Statistics Calculator Module
//! Rankings, per-language means, language distribution and metric correlation.

use crate::data::{Metric, RepoRecord};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

/// Mean of every metric, absent when no record has a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricMeans {
    pub stars: Option<f64>,
    pub forks: Option<f64>,
    pub issues: Option<f64>,
    pub pull_requests: Option<f64>,
    pub contributors: Option<f64>,
}

impl MetricMeans {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Stars => self.stars,
            Metric::Forks => self.forks,
            Metric::Issues => self.issues,
            Metric::PullRequests => self.pull_requests,
            Metric::Contributors => self.contributors,
        }
    }

    fn from_records(records: &[&RepoRecord]) -> Self {
        let mean = |metric| StatsCalculator::mean_of(records.iter().copied(), metric);
        Self {
            stars: mean(Metric::Stars),
            forks: mean(Metric::Forks),
            issues: mean(Metric::Issues),
            pull_requests: mean(Metric::PullRequests),
            contributors: mean(Metric::Contributors),
        }
    }
}

/// Means for one language group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans {
    pub language: String,
    pub count: usize,
    pub means: MetricMeans,
}

/// Share of records belonging to one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub language: String,
    pub count: usize,
    pub percentage: f64,
}

/// Totals and mean of one metric over a set of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    /// Records with a value for this metric.
    pub present: usize,
    pub total: u64,
    pub mean: Option<f64>,
}

/// Pearson correlation between every pair of metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: Metric, col: Metric) -> Option<f64> {
        let i = self.metrics.iter().position(|m| *m == row)?;
        let j = self.metrics.iter().position(|m| *m == col)?;
        self.values[i][j]
    }
}

/// Aggregations over repository records. All operations are pure and
/// return an empty result for empty input.
pub struct StatsCalculator;

impl StatsCalculator {
    /// First `n` records by `metric`, descending. Stable on ties; records
    /// without a value sort after every record with one.
    pub fn top_n_by_metric(records: &[RepoRecord], metric: Metric, n: usize) -> Vec<RepoRecord> {
        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| Reverse(r.metric(metric)));
        sorted.truncate(n);
        sorted
    }

    /// Per-language means, top `n` groups by mean stars.
    pub fn group_means(records: &[RepoRecord], n: usize) -> Vec<GroupMeans> {
        let mut groups: BTreeMap<&str, Vec<&RepoRecord>> = BTreeMap::new();
        for record in records {
            if let Some(language) = record.language.as_deref() {
                groups.entry(language).or_default().push(record);
            }
        }

        let mut result: Vec<GroupMeans> = groups
            .into_iter()
            .map(|(language, members)| GroupMeans {
                language: language.to_string(),
                count: members.len(),
                means: MetricMeans::from_records(&members),
            })
            .collect();

        // Groups arrive sorted by name, so the stable sort keeps name order on ties.
        result.sort_by(|a, b| Self::cmp_desc(a.means.stars, b.means.stars));
        result.truncate(n);
        result
    }

    /// Record count per language, top `n` by count. Percentages are taken
    /// against every record passed in, including those without a language.
    pub fn distribution(records: &[RepoRecord], n: usize) -> Vec<CategoryShare> {
        let total = records.len();
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for language in records.iter().filter_map(|r| r.language.as_deref()) {
            *counts.entry(language).or_default() += 1;
        }

        let mut shares: Vec<CategoryShare> = counts
            .into_iter()
            .map(|(language, count)| CategoryShare {
                language: language.to_string(),
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect();

        shares.sort_by_key(|s| Reverse(s.count));
        shares.truncate(n);
        shares
    }

    /// Totals and means for every metric. Totals saturate at `u64::MAX`.
    pub fn summarize(records: &[RepoRecord]) -> Vec<MetricSummary> {
        Metric::ALL
            .iter()
            .map(|&metric| {
                let values: Vec<u64> = records.iter().filter_map(|r| r.metric(metric)).collect();
                MetricSummary {
                    metric,
                    present: values.len(),
                    total: values.iter().fold(0u64, |acc, v| acc.saturating_add(*v)),
                    mean: Self::mean_of(records.iter(), metric),
                }
            })
            .collect()
    }

    /// Pearson correlation matrix over complete pairs of each two metrics.
    pub fn correlation_matrix(records: &[RepoRecord]) -> CorrelationMatrix {
        let metrics = Metric::ALL.to_vec();
        let values = metrics
            .iter()
            .map(|&row| {
                metrics
                    .iter()
                    .map(|&col| Self::pearson(records, row, col))
                    .collect()
            })
            .collect();

        CorrelationMatrix { metrics, values }
    }

    fn pearson(records: &[RepoRecord], a: Metric, b: Metric) -> Option<f64> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = records
            .iter()
            .filter_map(|r| Some((r.metric(a)? as f64, r.metric(b)? as f64)))
            .unzip();

        if xs.len() < 2 {
            return None;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 || sx.is_nan() || sy.is_nan() {
            return None;
        }

        let r = xs.iter().covariance(ys.iter()) / (sx * sy);
        Some(r.clamp(-1.0, 1.0))
    }

    fn mean_of<'a>(records: impl Iterator<Item = &'a RepoRecord>, metric: Metric) -> Option<f64> {
        let values: Vec<f64> = records
            .filter_map(|r| r.metric(metric))
            .map(|v| v as f64)
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().mean())
        }
    }

    /// Descending order with absent values last.
    fn cmp_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: &str, lang: Option<&str>, stars: Option<u64>) -> RepoRecord {
        RepoRecord::new(id, lang.map(str::to_string)).with_metric(Metric::Stars, stars)
    }

    fn example() -> Vec<RepoRecord> {
        vec![
            repo("a/b", Some("Go"), Some(10)),
            repo("c/d", Some("Go"), Some(5)),
            repo("e/f", Some("Rust"), Some(20)),
        ]
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn top_one_by_stars() {
        let top = StatsCalculator::top_n_by_metric(&example(), Metric::Stars, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].repository, "e/f");
    }

    #[test]
    fn top_n_is_stable_and_puts_missing_last() {
        let records = vec![
            repo("x/1", None, None),
            repo("x/2", None, Some(3)),
            repo("x/3", None, Some(7)),
            repo("x/4", None, Some(3)),
        ];
        let top = StatsCalculator::top_n_by_metric(&records, Metric::Stars, 10);
        let ids: Vec<&str> = top.iter().map(|r| r.repository.as_str()).collect();
        assert_eq!(ids, ["x/3", "x/2", "x/4", "x/1"]);
    }

    #[test]
    fn top_n_is_idempotent() {
        let once = StatsCalculator::top_n_by_metric(&example(), Metric::Stars, 2);
        let twice = StatsCalculator::top_n_by_metric(&once, Metric::Stars, 5);
        assert_eq!(once, twice);
    }

    #[test]
    fn group_mean_for_go() {
        let means = StatsCalculator::group_means(&example(), 10);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].language, "Rust");
        assert_eq!(means[1].language, "Go");
        assert_eq!(means[1].count, 2);
        assert!(approx(means[1].means.stars.unwrap(), 7.5));
        assert_eq!(means[1].means.forks, None);
    }

    #[test]
    fn group_means_skip_missing_language_and_values() {
        let records = vec![
            repo("a/1", Some("C"), Some(4)),
            repo("a/2", Some("C"), None),
            repo("a/3", None, Some(100)),
            repo("a/4", Some("Zig"), None),
        ];
        let means = StatsCalculator::group_means(&records, 1);
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].language, "C");
        assert_eq!(means[0].count, 2);
        assert!(approx(means[0].means.get(Metric::Stars).unwrap(), 4.0));
    }

    #[test]
    fn distribution_percentages() {
        let shares = StatsCalculator::distribution(&example(), 10);
        assert_eq!(shares[0].language, "Go");
        assert_eq!(shares[0].count, 2);
        assert!(approx(shares[0].percentage, 200.0 / 3.0));
        assert_eq!(shares[1].language, "Rust");
        assert!(approx(shares[1].percentage, 100.0 / 3.0));
    }

    #[test]
    fn distribution_counts_unlabelled_records_in_total() {
        let mut records = example();
        records.push(repo("g/h", None, None));
        let shares = StatsCalculator::distribution(&records, 1);
        assert_eq!(shares.len(), 1);
        assert!(approx(shares[0].percentage, 50.0));
        let sum: f64 = StatsCalculator::distribution(&records, 10)
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert!(sum <= 100.0 + 1e-9);
    }

    #[test]
    fn distribution_shares_never_exceed_whole() {
        // One language per record, then two records per language, plus a few unlabelled.
        for total in 1..=40usize {
            for unlabelled in 0..3usize {
                let mut records: Vec<RepoRecord> = (0..total)
                    .map(|i| repo(&format!("r/{i}"), Some(format!("L{}", i / 2).as_str()), None))
                    .collect();
                records.extend((0..unlabelled).map(|i| repo(&format!("u/{i}"), None, None)));
                let len = records.len() as f64;

                let shares = StatsCalculator::distribution(&records, usize::MAX);
                let sum: f64 = shares.iter().map(|s| s.percentage).sum();
                assert!(sum <= 100.0 + 1e-9, "total {total}: sum {sum}");
                for share in &shares {
                    assert!(approx(share.percentage, share.count as f64 / len * 100.0));
                }

                let counted: usize = shares.iter().map(|s| s.count).sum();
                assert_eq!(counted, total);
            }
        }
    }

    #[test]
    fn nine_single_languages_sum_to_whole() {
        let records: Vec<RepoRecord> = (0..9)
            .map(|i| repo(&format!("r/{i}"), Some(format!("L{i}").as_str()), None))
            .collect();
        let sum: f64 = StatsCalculator::distribution(&records, 9)
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_results() {
        assert!(StatsCalculator::top_n_by_metric(&[], Metric::Forks, 3).is_empty());
        assert!(StatsCalculator::group_means(&[], 3).is_empty());
        assert!(StatsCalculator::distribution(&[], 3).is_empty());
        let matrix = StatsCalculator::correlation_matrix(&[]);
        assert!(matrix.values.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn summarize_totals_and_means() {
        let summary = StatsCalculator::summarize(&example());
        let stars = summary.iter().find(|s| s.metric == Metric::Stars).unwrap();
        assert_eq!(stars.present, 3);
        assert_eq!(stars.total, 35);
        assert!(approx(stars.mean.unwrap(), 35.0 / 3.0));
        let forks = summary.iter().find(|s| s.metric == Metric::Forks).unwrap();
        assert_eq!(forks.present, 0);
        assert_eq!(forks.mean, None);
    }

    #[test]
    fn summary_total_saturates_on_huge_counts() {
        let records = vec![
            repo("a/b", Some("Go"), Some(u64::MAX - 1)),
            repo("c/d", Some("Go"), Some(10_000_000_000_000_000_000)),
        ];
        let summary = StatsCalculator::summarize(&records);
        let stars = summary.iter().find(|s| s.metric == Metric::Stars).unwrap();
        assert_eq!(stars.present, 2);
        assert_eq!(stars.total, u64::MAX);
        assert!(stars.mean.unwrap() > 1e19);
    }

    #[test]
    fn correlation_of_linear_metrics() {
        let records: Vec<RepoRecord> = (1..=5)
            .map(|i| {
                repo(&format!("r/{i}"), None, Some(i))
                    .with_metric(Metric::Forks, Some(i * 2))
                    .with_metric(Metric::Issues, Some(10 - i))
                    .with_metric(Metric::Contributors, Some(1))
            })
            .collect();

        let matrix = StatsCalculator::correlation_matrix(&records);
        assert!(approx(matrix.get(Metric::Stars, Metric::Stars).unwrap(), 1.0));
        assert!(approx(matrix.get(Metric::Stars, Metric::Forks).unwrap(), 1.0));
        assert!(approx(matrix.get(Metric::Stars, Metric::Issues).unwrap(), -1.0));
        // Constant or absent columns have no correlation.
        assert_eq!(matrix.get(Metric::Stars, Metric::Contributors), None);
        assert_eq!(matrix.get(Metric::Stars, Metric::PullRequests), None);
    }
}
