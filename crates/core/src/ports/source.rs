use crate::domain::Movie;
use anyhow::Result;

/// Port for resolving the movie catalog.
///
/// Both methods are blocking - callers should run them in `spawn_blocking`.
pub trait CatalogSource: Send + Sync {
    /// Resolve the catalog: local cache if present, otherwise fetch from the
    /// remote source and persist the payload as the cache. Once the cache
    /// exists, `load` never touches the network again (sticky cache).
    fn load(&self) -> Result<Vec<Movie>>;

    /// Bypass the cache: fetch from the remote source and overwrite the
    /// cache with the fresh payload.
    fn refresh(&self) -> Result<Vec<Movie>>;
}
