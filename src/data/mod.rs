//! Data module - CSV loading, caching and filtering

mod cache;
mod loader;
mod processor;
mod record;

pub use cache::DatasetCache;
pub use loader::{DataLoadError, DataLoader, Dataset};
pub use processor::{DataProcessor, LanguageFilter, ALL_LANGUAGES};
pub use record::{short_name, Metric, RepoRecord, NULL_SENTINEL};
