/// Settings store keys consumed or produced by the engine and its UI
/// collaborators, with their documented defaults.
pub mod keys {
    /// Sort field for the view (default "Rating").
    pub const SORT_OPTION: &str = "SortOption";
    /// Sort direction for the view (default false = descending).
    pub const SORT_ASCENDING: &str = "SortAscending";
    /// Logged-in user name (default "guest").
    pub const USER_NAME: &str = "UserName";
    /// Display glyph for the user (default "🎬").
    pub const USER_EMOJI: &str = "UserEmoji";
    /// UI theme; consumed by the presentation layer only.
    pub const APP_THEME: &str = "AppTheme";
    /// UI animations toggle (default true); presentation layer only.
    pub const ANIMATIONS_ENABLED: &str = "AnimationsEnabled";
}

pub const DEFAULT_USER: &str = "guest";
pub const DEFAULT_USER_EMOJI: &str = "🎬";

/// String-keyed settings store with typed defaults.
///
/// A thin key-value surface over whatever preference mechanism the host
/// provides; reads fall back to the supplied default on any failure.
pub trait SettingsStore: Send + Sync {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&self, key: &str, value: &str);

    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn set_bool(&self, key: &str, value: bool);

    fn remove(&self, key: &str);
}
