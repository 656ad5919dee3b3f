//! The filter/sort pipeline: pure functions deriving the displayed view from
//! the authoritative catalog. Every call recomputes the view wholesale from
//! the full catalog - filters never compose destructively against a previous
//! view.

use std::cmp::Ordering;

use crate::domain::Movie;

/// Sort field for the displayed view. The resolved field is persisted to the
/// settings store as its `as_str` form so the choice survives restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Rating,
    Year,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Rating => "Rating",
            SortField::Year => "Year",
            SortField::Title => "Title",
        }
    }

    /// Parse a persisted setting value; unrecognized values fall back to the
    /// default (Rating) rather than erroring.
    pub fn from_setting(s: &str) -> SortField {
        match s {
            "Year" => SortField::Year,
            "Title" => SortField::Title,
            _ => SortField::Rating,
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The current filter inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewQuery {
    /// Free-text query matched against title, director, decimal year, and
    /// the comma-joined genre string.
    pub search: String,
    /// Extra director-only filter.
    pub director: Option<String>,
    /// Keep only favorited movies.
    pub favorites_only: bool,
}

/// Filter the authoritative catalog down to the view, preserving catalog
/// order. Steps apply in a fixed order: favorites-only, then free text, then
/// the director filter.
pub fn filter_catalog(catalog: &[Movie], query: &ViewQuery) -> Vec<Movie> {
    let mut view: Vec<Movie> = catalog.to_vec();

    if query.favorites_only {
        view.retain(|m| m.is_favorite);
    }

    let search = query.search.trim().to_lowercase();
    if !search.is_empty() {
        view.retain(|m| {
            m.title.to_lowercase().contains(&search)
                || m.director.to_lowercase().contains(&search)
                || m.year.to_string().contains(&search)
                || m.genre_string().to_lowercase().contains(&search)
        });
    }

    if let Some(director) = &query.director {
        let director = director.trim().to_lowercase();
        if !director.is_empty() {
            view.retain(|m| m.director.to_lowercase().contains(&director));
        }
    }

    view
}

/// Sort the view in place. The sort is stable and uses no secondary key, so
/// ties keep the order of the filtered sequence.
pub fn sort_movies(movies: &mut [Movie], field: SortField, ascending: bool) {
    movies.sort_by(|a, b| {
        let ord = match field {
            SortField::Rating => a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal),
            SortField::Year => a.year.cmp(&b.year),
            SortField::Title => a.title.cmp(&b.title),
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}
