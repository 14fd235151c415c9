// ── Runtime store configuration ──
//
// Describes *where* the backend lives and *where* snapshots are kept.
// Never touches config files: the CLI builds a `StoreConfig` from its
// profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Where persisted snapshots live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CacheLocation {
    /// In-process only; nothing survives a restart.
    #[default]
    Memory,
    /// One JSON file per collection under this directory.
    Directory(PathBuf),
}

/// Configuration for a single `DataStore`.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API root, e.g. `http://localhost:3000/api/`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub cache: CacheLocation,
}

impl StoreConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: fruithub_api::DEFAULT_TIMEOUT,
            cache: CacheLocation::Memory,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheLocation) -> Self {
        self.cache = cache;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Url::parse("http://localhost:3000/api/").expect("static URL is valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_five_second_timeout_in_memory() {
        let config = StoreConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.cache, CacheLocation::Memory);
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/api/");
    }
}
