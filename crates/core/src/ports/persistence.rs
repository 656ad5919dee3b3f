use crate::domain::{HistoryEntry, Movie};
use anyhow::Result;

/// Per-user favorites persistence.
///
/// The stored shape is a JSON array of the currently-favorited movie records
/// (the full catalog schema, not a delta), one file per user. Blocking -
/// callers should run these in `spawn_blocking`.
pub trait FavoritesStore: Send + Sync {
    /// Load the favorited movies for `user`. A missing file is an empty set.
    fn load(&self, user: &str) -> Result<Vec<Movie>>;

    /// Persist the full set of currently-favorited movies for `user`.
    fn save(&self, user: &str, favorites: &[Movie]) -> Result<()>;
}

/// Per-user history persistence. Whole-log serialization on every save;
/// acceptable because logs are user-scale.
pub trait HistoryStore: Send + Sync {
    /// Load the activity log for `user`, in insertion order. A missing file
    /// is an empty log.
    fn load(&self, user: &str) -> Result<Vec<HistoryEntry>>;

    /// Persist the whole log for `user`, in insertion order.
    fn save(&self, user: &str, entries: &[HistoryEntry]) -> Result<()>;
}
