//! Statistics module - aggregations over repository records

mod calculator;

pub use calculator::{
    CategoryShare, CorrelationMatrix, GroupMeans, MetricMeans, MetricSummary, StatsCalculator,
};
