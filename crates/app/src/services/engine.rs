use std::sync::Arc;

use cinedex_core::app::{
    compute_statistics, filter_catalog, sort_movies, SortField, Statistics, TimeWindow, ViewQuery,
};
use cinedex_core::domain::{
    genre_stats, group_by_day, validate_user_name, GenreStat, HistoryAction, HistoryEntry,
    HistoryGroup, Movie, MovieKey,
};
use cinedex_core::error::EngineError;
use cinedex_core::ports::{
    keys, CatalogSource, Clock, FavoritesStore, HistoryStore, SettingsStore, DEFAULT_USER,
};
use tokio::task;
use tracing::{error, info, warn};

/// Lifecycle of the engine's authoritative catalog.
///
/// Mutating and view-deriving calls are rejected until the catalog is Ready,
/// so a toggle or search can never race a load and target a catalog that is
/// about to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EngineState::Uninitialized => "Uninitialized",
            EngineState::Loading => "Loading",
            EngineState::Ready => "Ready",
            EngineState::Failed => "Failed",
        };
        write!(f, "{}", s)
    }
}

/// The catalog state & persistence engine.
///
/// Owns the authoritative movie list and the filtered/sorted view derived
/// from it, persists favorites and history per user, and aggregates
/// statistics. Construct one instance at the composition root and pass it by
/// reference; there is no ambient singleton.
///
/// Ports are injected; all port I/O is blocking and driven through
/// `spawn_blocking`, so port completion happens-before each method returns.
/// Persistence failures are logged and degrade to empty or stale state - no
/// method here fails on I/O.
pub struct CatalogEngine {
    // Ports (dependency injection)
    source: Arc<dyn CatalogSource>,
    favorites_store: Arc<dyn FavoritesStore>,
    history_store: Arc<dyn HistoryStore>,
    settings: Arc<dyn SettingsStore>,
    clock: Arc<dyn Clock>,

    state: EngineState,
    user: String,

    // The authoritative catalog and the view derived from it
    catalog: Vec<Movie>,
    view: Vec<Movie>,
    query: ViewQuery,
    sort_field: SortField,
    sort_ascending: bool,

    // Activity history (insertion order) and its projections
    history: Vec<HistoryEntry>,
    grouped_history: Vec<HistoryGroup>,
    genre_stats: Vec<GenreStat>,
}

impl CatalogEngine {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        favorites_store: Arc<dyn FavoritesStore>,
        history_store: Arc<dyn HistoryStore>,
        settings: Arc<dyn SettingsStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let user = settings.get_string(keys::USER_NAME, DEFAULT_USER);
        let sort_field =
            SortField::from_setting(&settings.get_string(keys::SORT_OPTION, "Rating"));
        let sort_ascending = settings.get_bool(keys::SORT_ASCENDING, false);

        Self {
            source,
            favorites_store,
            history_store,
            settings,
            clock,
            state: EngineState::Uninitialized,
            user,
            catalog: Vec::new(),
            view: Vec::new(),
            query: ViewQuery::default(),
            sort_field,
            sort_ascending,
            history: Vec::new(),
            grouped_history: Vec::new(),
            genre_stats: Vec::new(),
        }
    }

    // -- accessors -----------------------------------------------------------

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// The authoritative catalog, after loading and favorite-patching.
    pub fn catalog(&self) -> &[Movie] {
        &self.catalog
    }

    /// The filtered-and-sorted view. Fully recomputed by every filter or
    /// sort operation - treat it as replaced wholesale, never diffed.
    pub fn view(&self) -> &[Movie] {
        &self.view
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    /// The raw activity log, in insertion order.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History grouped by calendar day, newest day first.
    pub fn grouped_history(&self) -> &[HistoryGroup] {
        &self.grouped_history
    }

    pub fn genre_stats(&self) -> &[GenreStat] {
        &self.genre_stats
    }

    // -- loading -------------------------------------------------------------

    /// Load the catalog (cache-or-fetch). Fails soft: on source failure the
    /// engine logs, keeps an empty catalog, and transitions to `Failed`;
    /// calling `load` again retries.
    pub async fn load(&mut self) {
        self.run_load(false).await;
    }

    /// Bypass the sticky cache, fetch fresh, and rewrite the cache.
    pub async fn force_refresh(&mut self) {
        self.run_load(true).await;
    }

    async fn run_load(&mut self, refresh: bool) {
        self.state = EngineState::Loading;

        let source = Arc::clone(&self.source);
        let result =
            task::spawn_blocking(move || if refresh { source.refresh() } else { source.load() })
                .await;

        let movies = match result {
            Ok(Ok(movies)) => movies,
            Ok(Err(e)) => {
                error!("Catalog load failed: {:#}", e);
                self.catalog.clear();
                self.view.clear();
                self.state = EngineState::Failed;
                return;
            }
            Err(e) => {
                error!("Catalog load task panicked: {}", e);
                self.catalog.clear();
                self.view.clear();
                self.state = EngineState::Failed;
                return;
            }
        };

        info!("Loaded {} movies into the catalog", movies.len());
        self.catalog = movies;

        // Patch favorites before stamping, so a DateAdded persisted with a
        // favorite is restored rather than regressed by the fresh stamp.
        let favorites = self.load_favorites().await;
        self.patch_favorites(&favorites);

        let now = self.clock.now();
        for movie in &mut self.catalog {
            movie.stamp_date_added(now);
        }

        self.history = self.load_history().await;
        self.rebuild_history_projections();
        self.recompute_view();
        self.state = EngineState::Ready;
    }

    async fn load_favorites(&self) -> Vec<Movie> {
        let store = Arc::clone(&self.favorites_store);
        let user = self.user.clone();
        match task::spawn_blocking(move || store.load(&user)).await {
            Ok(Ok(favorites)) => favorites,
            Ok(Err(e)) => {
                warn!("Failed to load favorites for {}: {:#}", self.user, e);
                Vec::new()
            }
            Err(e) => {
                warn!("Favorites load task panicked: {}", e);
                Vec::new()
            }
        }
    }

    async fn load_history(&self) -> Vec<HistoryEntry> {
        let store = Arc::clone(&self.history_store);
        let user = self.user.clone();
        match task::spawn_blocking(move || store.load(&user)).await {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => {
                warn!("Failed to load history for {}: {:#}", self.user, e);
                Vec::new()
            }
            Err(e) => {
                warn!("History load task panicked: {}", e);
                Vec::new()
            }
        }
    }

    /// Apply persisted favorite flags onto the catalog, matching by the
    /// (title, year) key.
    fn patch_favorites(&mut self, favorites: &[Movie]) {
        for movie in &mut self.catalog {
            movie.is_favorite = false;
        }
        for favorite in favorites {
            let key = favorite.key();
            if let Some(movie) = self.catalog.iter_mut().find(|m| m.key() == key) {
                movie.is_favorite = true;
                if movie.date_added.is_none() {
                    movie.date_added = favorite.date_added;
                }
            }
        }
    }

    // -- filter/sort pipeline ------------------------------------------------

    /// Replace the free-text query and optional director filter, then
    /// recompute the view.
    pub fn apply_search(
        &mut self,
        text: &str,
        director: Option<&str>,
    ) -> Result<(), EngineError> {
        self.ensure_ready()?;
        self.query.search = text.to_string();
        self.query.director = director.map(|d| d.to_string());
        self.recompute_view();
        Ok(())
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) -> Result<(), EngineError> {
        self.ensure_ready()?;
        self.query.favorites_only = favorites_only;
        self.recompute_view();
        Ok(())
    }

    pub fn sort_by(&mut self, field: SortField) -> Result<(), EngineError> {
        self.ensure_ready()?;
        self.sort_field = field;
        self.recompute_view();
        Ok(())
    }

    pub fn toggle_sort_order(&mut self) -> Result<(), EngineError> {
        self.ensure_ready()?;
        self.sort_ascending = !self.sort_ascending;
        self.recompute_view();
        Ok(())
    }

    /// Derive the view from the authoritative catalog: filter, stable sort,
    /// persist the resolved sort choice.
    fn recompute_view(&mut self) {
        self.view = filter_catalog(&self.catalog, &self.query);
        sort_movies(&mut self.view, self.sort_field, self.sort_ascending);

        self.settings
            .set_string(keys::SORT_OPTION, self.sort_field.as_str());
        self.settings
            .set_bool(keys::SORT_ASCENDING, self.sort_ascending);
    }

    // -- favorites -----------------------------------------------------------

    /// Flip the favorite flag on the movie matching `key`, persist the full
    /// favorite set, and record a Favorited/Unfavorited history entry.
    /// Returns the new flag value. Involutive: toggling twice restores the
    /// original state and appends exactly two entries.
    pub async fn toggle_favorite(&mut self, key: &MovieKey) -> Result<bool, EngineError> {
        self.ensure_ready()?;

        let now = self.clock.now();
        let (entry, now_favorite) = {
            let movie = self
                .catalog
                .iter_mut()
                .find(|m| m.key() == *key)
                .ok_or_else(|| EngineError::MovieNotFound {
                    title: key.title.clone(),
                    year: key.year,
                })?;
            movie.is_favorite = !movie.is_favorite;
            let action = if movie.is_favorite {
                HistoryAction::Favorited
            } else {
                HistoryAction::Unfavorited
            };
            (HistoryEntry::snapshot(movie, action, now), movie.is_favorite)
        };

        info!("{} {}", entry.action, key);
        self.recompute_view();

        // Optimistic persistence: a save failure is logged, the in-memory
        // flag is not rolled back.
        self.save_favorites().await;
        self.append_history(entry).await;

        Ok(now_favorite)
    }

    async fn save_favorites(&self) {
        let favorites: Vec<Movie> = self
            .catalog
            .iter()
            .filter(|m| m.is_favorite)
            .cloned()
            .collect();
        let store = Arc::clone(&self.favorites_store);
        let user = self.user.clone();

        match task::spawn_blocking(move || store.save(&user, &favorites)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Failed to save favorites for {}: {:#}", self.user, e),
            Err(e) => error!("Favorites save task panicked: {}", e),
        }
    }

    // -- history -------------------------------------------------------------

    /// Record that the user viewed the movie matching `key`.
    pub async fn record_viewed(&mut self, key: &MovieKey) -> Result<(), EngineError> {
        self.ensure_ready()?;

        let now = self.clock.now();
        let movie = self
            .catalog
            .iter()
            .find(|m| m.key() == *key)
            .ok_or_else(|| EngineError::MovieNotFound {
                title: key.title.clone(),
                year: key.year,
            })?;
        let entry = HistoryEntry::snapshot(movie, HistoryAction::Viewed, now);

        self.append_history(entry).await;
        Ok(())
    }

    /// Empty the log and its projections, then persist an empty array.
    pub async fn clear_history(&mut self) -> Result<(), EngineError> {
        self.ensure_ready()?;

        self.history.clear();
        self.grouped_history.clear();
        self.genre_stats.clear();
        self.persist_history().await;
        info!("History cleared for {}", self.user);
        Ok(())
    }

    /// Append one entry, rebuild the day-grouped and genre-stat projections,
    /// and persist the whole log. The write has been attempted by the time
    /// this returns.
    async fn append_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        self.rebuild_history_projections();
        self.persist_history().await;
    }

    async fn persist_history(&self) {
        let entries = self.history.clone();
        let store = Arc::clone(&self.history_store);
        let user = self.user.clone();

        match task::spawn_blocking(move || store.save(&user, &entries)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Failed to save history for {}: {:#}", self.user, e),
            Err(e) => error!("History save task panicked: {}", e),
        }
    }

    fn rebuild_history_projections(&mut self) {
        let today = self.clock.now().date_naive();
        self.grouped_history = group_by_day(&self.history, today);
        self.genre_stats = genre_stats(&self.history);
    }

    // -- statistics ----------------------------------------------------------

    /// Time-windowed aggregates over the authoritative catalog, evaluated
    /// against the clock at call time.
    pub fn statistics(&self, window: TimeWindow) -> Result<Statistics, EngineError> {
        self.ensure_ready()?;
        Ok(compute_statistics(&self.catalog, window, self.clock.now()))
    }

    // -- users ---------------------------------------------------------------

    /// Switch the logged-in user: validate, persist the name, and reload
    /// that user's favorites and history against the current catalog.
    pub async fn set_user(&mut self, name: &str) -> Result<(), EngineError> {
        let name = validate_user_name(name)?;
        self.settings.set_string(keys::USER_NAME, &name);
        self.user = name;
        info!("User switched to {}", self.user);

        if self.state == EngineState::Ready {
            let favorites = self.load_favorites().await;
            self.patch_favorites(&favorites);
            self.history = self.load_history().await;
            self.rebuild_history_projections();
            self.recompute_view();
        }
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), EngineError> {
        if self.state == EngineState::Ready {
            Ok(())
        } else {
            Err(EngineError::NotReady {
                state: self.state.to_string(),
            })
        }
    }
}
