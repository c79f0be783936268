//! Headless rendering: the dashboard model as JSON, no window.

use crate::charts::{DashboardModel, Selection};
use crate::config::Config;
use crate::data::DatasetCache;
use anyhow::Context;

/// Load the configured dataset and serialize the model for `selection`.
pub fn render_json(config: &Config, selection: &Selection) -> anyhow::Result<String> {
    let mut cache = DatasetCache::new();
    let dataset = cache
        .get_or_load(&config.data.path)
        .with_context(|| format!("loading dataset {}", config.data.path.display()))?;

    let model = DashboardModel::build(&dataset, selection);
    serde_json::to_string_pretty(&model).context("serializing dashboard model")
}
