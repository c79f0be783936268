//! CSV Data Loader Module
//! Reads the repository CSV with Polars and converts it into typed records.

use crate::data::record::{absent_if_sentinel, Metric, RepoRecord, NULL_SENTINEL};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column holding the "owner/name" identifier.
pub const REPOSITORY_COLUMN: &str = "repositories";
/// Column holding the primary language.
pub const LANGUAGE_COLUMN: &str = "language";

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row} has no repository identifier")]
    MissingIdentifier { row: usize },
}

/// Loaded, read-only dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    records: Vec<RepoRecord>,
}

impl Dataset {
    pub fn new(path: impl Into<PathBuf>, records: Vec<RepoRecord>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[RepoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the CSV at `path` into a dataset.
    pub fn load_csv(path: &Path) -> Result<Dataset, DataLoadError> {
        let df = Self::read_frame(path)?;
        let records = Self::records_from_frame(&df)?;
        tracing::info!(
            path = %path.display(),
            rows = records.len(),
            "Loaded repository dataset"
        );
        Ok(Dataset::new(path, records))
    }

    /// Read the raw CSV, treating the sentinel as null in every column.
    pub fn read_frame(path: &Path) -> Result<DataFrame, DataLoadError> {
        if !path.is_file() {
            return Err(DataLoadError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_null_values(Some(NullValues::AllColumnsSingle(NULL_SENTINEL.into())))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        tracing::debug!(
            rows = df.height(),
            columns = df.width(),
            "Parsed CSV frame"
        );
        Ok(df)
    }

    /// Convert a frame with the expected columns into records.
    pub fn records_from_frame(df: &DataFrame) -> Result<Vec<RepoRecord>, DataLoadError> {
        let repositories = Self::string_column(df, REPOSITORY_COLUMN)?;
        let languages = Self::string_column(df, LANGUAGE_COLUMN)?;

        let mut metrics = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            metrics.push((metric, Self::count_column(df, metric.column())?));
        }

        let mut records = Vec::with_capacity(df.height());
        for (row, (repository, language)) in repositories.into_iter().zip(languages).enumerate() {
            let repository = repository.ok_or(DataLoadError::MissingIdentifier { row })?;
            let mut record = RepoRecord::new(repository, language);
            for (metric, values) in &metrics {
                record = record.with_metric(*metric, values[row]);
            }
            records.push(record);
        }

        Ok(records)
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, DataLoadError> {
        df.column(name)
            .map_err(|_| DataLoadError::MissingColumn(name.to_string()))
    }

    fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DataLoadError> {
        let casted = Self::column(df, name)?.cast(&DataType::String)?;
        let values = casted
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| absent_if_sentinel(v).map(str::to_string))
            .collect();
        Ok(values)
    }

    /// Counts must be non-negative whole numbers; anything else loads as absent.
    /// Integer columns are cast straight to `UInt64` so large values stay exact.
    fn count_column(df: &DataFrame, name: &str) -> Result<Vec<Option<u64>>, DataLoadError> {
        let column = Self::column(df, name)?;
        let dtype = column.dtype();

        let values = if dtype.is_integer() {
            let casted = column.cast(&DataType::UInt64)?;
            casted.as_materialized_series().u64()?.into_iter().collect()
        } else if dtype.is_float() {
            let casted = column.cast(&DataType::Float64)?;
            casted
                .as_materialized_series()
                .f64()?
                .into_iter()
                .map(|v| v.and_then(whole_count))
                .collect()
        } else {
            let casted = column.cast(&DataType::String)?;
            casted
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_count))
                .collect()
        };
        Ok(values)
    }
}

/// 2^64 as a float; every finite value below it converts exactly.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

fn whole_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < U64_LIMIT)
        .then_some(value as u64)
}

fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim();
    text.parse::<u64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(whole_count))
}
