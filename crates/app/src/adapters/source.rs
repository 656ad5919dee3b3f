use anyhow::{Context, Result};
use cinedex_core::domain::Movie;
use cinedex_core::ports::CatalogSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The fixed remote catalog location.
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/DonH-ITS/jsonfiles/main/moviesemoji.json";

/// Catalog source backed by a one-shot HTTP fetch and a sticky file cache.
///
/// Offline-first: once the cache file exists, `load` reads it and never
/// fetches again. `refresh` is the explicit way to bypass and rewrite it.
pub struct HttpCatalogSource {
    url: String,
    cache_path: PathBuf,
}

impl HttpCatalogSource {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::with_url(data_dir, DEFAULT_CATALOG_URL)
    }

    pub fn with_url<P: AsRef<Path>>(data_dir: P, url: &str) -> Self {
        Self {
            url: url.to_string(),
            cache_path: data_dir.as_ref().join("movies.json"),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn fetch_remote(&self) -> Result<String> {
        info!("Fetching catalog from {}", self.url);
        let response = reqwest::blocking::get(&self.url)
            .with_context(|| format!("Failed to fetch catalog from {}", self.url))?
            .error_for_status()
            .context("Catalog fetch returned an error status")?;
        response.text().context("Failed to read catalog response body")
    }

    /// Write the raw payload verbatim as the cache artifact. A cache write
    /// failure is not fatal to the load that fetched it.
    fn write_cache(&self, payload: &str) {
        if let Some(parent) = self.cache_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create cache directory: {}", e);
                return;
            }
        }
        match fs::write(&self.cache_path, payload) {
            Ok(()) => info!("Catalog cached at {}", self.cache_path.display()),
            Err(e) => warn!("Failed to write catalog cache: {}", e),
        }
    }

    fn parse(payload: &str) -> Result<Vec<Movie>> {
        serde_json::from_str(payload).context("Failed to parse catalog JSON")
    }
}

impl CatalogSource for HttpCatalogSource {
    fn load(&self) -> Result<Vec<Movie>> {
        if self.cache_path.exists() {
            let payload = fs::read_to_string(&self.cache_path).with_context(|| {
                format!("Failed to read catalog cache: {}", self.cache_path.display())
            })?;
            return Self::parse(&payload);
        }

        let payload = self.fetch_remote()?;
        self.write_cache(&payload);
        Self::parse(&payload)
    }

    fn refresh(&self) -> Result<Vec<Movie>> {
        let payload = self.fetch_remote()?;
        self.write_cache(&payload);
        Self::parse(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // An address nothing listens on, so any accidental fetch fails fast.
    const DEAD_URL: &str = "http://127.0.0.1:9/catalog.json";

    const SAMPLE: &str = r#"[
        {"title": "Heat", "year": 1995, "genre": ["Action", "Crime"],
         "director": "Michael Mann", "rating": 8.3, "emoji": "🔫"}
    ]"#;

    #[test]
    fn test_existing_cache_suppresses_fetch() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let source = HttpCatalogSource::with_url(temp_dir.path(), DEAD_URL);
        fs::write(source.cache_path(), SAMPLE)?;

        // The URL is unreachable; this only succeeds if the cache is used
        let movies = source.load()?;
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Heat");
        Ok(())
    }

    #[test]
    fn test_load_without_cache_or_network_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = HttpCatalogSource::with_url(temp_dir.path(), DEAD_URL);
        assert!(source.load().is_err());
        // And no cache artifact appears from the failed attempt
        assert!(!source.cache_path().exists());
    }

    #[test]
    fn test_malformed_cache_is_an_error_not_a_panic() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let source = HttpCatalogSource::with_url(temp_dir.path(), DEAD_URL);
        fs::write(source.cache_path(), "not json at all")?;

        assert!(source.load().is_err());
        Ok(())
    }
}
