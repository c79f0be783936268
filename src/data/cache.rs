//! Dataset cache keyed by resource path.

use crate::data::loader::{DataLoadError, DataLoader, Dataset};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Holds at most one loaded dataset. A request for a different path
/// replaces it; a request for the same path never touches the file.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(PathBuf, Arc<Dataset>)>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on a miss.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, DataLoadError> {
        if let Some((cached_path, dataset)) = &self.entry {
            if cached_path == path {
                tracing::debug!(path = %path.display(), "Dataset cache hit");
                return Ok(Arc::clone(dataset));
            }
            tracing::info!(
                old = %cached_path.display(),
                new = %path.display(),
                "Dataset path changed, invalidating cache"
            );
            self.entry = None;
        }

        let dataset = Arc::new(DataLoader::load_csv(path)?);
        self.loads += 1;
        self.entry = Some((path.to_path_buf(), Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Drop the cached dataset so the next request re-reads the file.
    pub fn invalidate(&mut self) {
        if let Some((path, _)) = self.entry.take() {
            tracing::info!(path = %path.display(), "Dataset cache invalidated");
        }
    }

    pub fn cached_path(&self) -> Option<&Path> {
        self.entry.as_ref().map(|(path, _)| path.as_path())
    }

    /// Number of times the cache has read a file.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "repositories,language,stars_count,forks_count,issues_count,pull_requests,contributors";

    fn write_csv(dir: &TempDir, file: &str, rows: &[&str]) -> PathBuf {
        let path = dir.path().join(file);
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.push('\n');
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn same_path_is_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "a.csv", &["a/b,Go,1,1,1,1,1"]);
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(&path).unwrap();
        // A rewrite is not observed until the cache is invalidated.
        write_csv(&dir, "a.csv", &["a/b,Go,1,1,1,1,1", "c/d,Go,1,1,1,1,1"]);
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn different_path_reloads() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", &["a/b,Go,1,1,1,1,1"]);
        let b = write_csv(&dir, "b.csv", &["x/y,Rust,1,1,1,1,1", "z/w,C,1,1,1,1,1"]);
        let mut cache = DatasetCache::new();

        assert_eq!(cache.get_or_load(&a).unwrap().len(), 1);
        assert_eq!(cache.get_or_load(&b).unwrap().len(), 2);
        assert_eq!(cache.cached_path(), Some(b.as_path()));
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn invalidate_forces_reread() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "a.csv", &["a/b,Go,1,1,1,1,1"]);
        let mut cache = DatasetCache::new();
        cache.get_or_load(&path).unwrap();

        write_csv(&dir, "a.csv", &["a/b,Go,1,1,1,1,1", "c/d,Go,1,1,1,1,1"]);
        cache.invalidate();
        assert!(cache.cached_path().is_none());
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 2);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let dir = TempDir::new().unwrap();
        let good = write_csv(&dir, "a.csv", &["a/b,Go,1,1,1,1,1"]);
        let mut cache = DatasetCache::new();
        cache.get_or_load(&good).unwrap();

        assert!(cache.get_or_load(&dir.path().join("missing.csv")).is_err());
        assert!(cache.cached_path().is_none());
    }
}
