//! Time-windowed statistics over the authoritative catalog. Pure and
//! read-only: windows are evaluated against the clock at query time, never
//! cached.

use chrono::{DateTime, Duration, Utc};

use crate::domain::Movie;

/// Bound on `DateAdded` for statistics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    AllTime,
    LastMonth,
    LastYear,
}

impl TimeWindow {
    /// Inclusive lower bound on `DateAdded`, or `None` for all time.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeWindow::AllTime => None,
            TimeWindow::LastMonth => Some(now - Duration::days(30)),
            TimeWindow::LastYear => Some(now - Duration::days(365)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::AllTime => "All Time",
            TimeWindow::LastMonth => "Last Month",
            TimeWindow::LastYear => "Last Year",
        }
    }
}

/// Aggregates over one time window of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub favorite_count: usize,
    pub top_genre: String,
    pub average_rating: f64,
    pub top_director: String,
}

/// Compute statistics over the catalog restricted to `window`.
///
/// Top genre groups by comma-joined genre-string equality (not per-genre
/// decomposition); ties for both top genre and top director go to the value
/// first encountered in catalog order. An empty windowed set yields an
/// average of exactly 0 and "N/A" for both top values.
pub fn compute_statistics(catalog: &[Movie], window: TimeWindow, now: DateTime<Utc>) -> Statistics {
    let cutoff = window.cutoff(now);
    let windowed: Vec<&Movie> = catalog
        .iter()
        .filter(|m| match cutoff {
            None => true,
            Some(cutoff) => m.date_added.is_some_and(|added| added >= cutoff),
        })
        .collect();

    let favorite_count = windowed.iter().filter(|m| m.is_favorite).count();

    let average_rating = if windowed.is_empty() {
        0.0
    } else {
        windowed.iter().map(|m| m.rating).sum::<f64>() / windowed.len() as f64
    };

    let top_genre = most_frequent(windowed.iter().map(|m| m.genre_string()));
    let top_director = most_frequent(windowed.iter().map(|m| m.director.clone()));

    Statistics {
        favorite_count,
        top_genre,
        average_rating,
        top_director,
    }
}

/// Most frequent value, ties broken by first encounter. "N/A" when empty.
fn most_frequent(values: impl Iterator<Item = String>) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (value, n) in counts {
        match &best {
            // Strictly greater, so the first-encountered value wins ties
            Some((_, best_n)) if n <= *best_n => {}
            _ => best = Some((value, n)),
        }
    }

    best.map(|(v, _)| v).unwrap_or_else(|| "N/A".to_string())
}
