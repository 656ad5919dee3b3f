use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a movie for favorites matching.
///
/// Favorite membership is matched by the (title, year) pair, not by a
/// synthetic id or object identity: the catalog may be reloaded or rebuilt,
/// and a favorites file written against an older catalog instance must still
/// match. The match is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieKey {
    pub title: String,
    pub year: i32,
}

impl std::fmt::Display for MovieKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.year)
    }
}

/// A single catalog record.
///
/// The serde shape matches the remote catalog JSON (`title`, `year`, `genre`,
/// `director`, `rating`, `emoji`); `IsFavorite` and `DateAdded` are engine
/// additions that default when absent from source data, so raw remote
/// payloads and older favorites files both parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub genre: Vec<String>,
    pub director: String,
    pub rating: f64,
    #[serde(default)]
    pub emoji: String,
    #[serde(rename = "IsFavorite", default)]
    pub is_favorite: bool,
    #[serde(rename = "DateAdded", default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Movie {
    /// The (title, year) identity used for favorites matching.
    pub fn key(&self) -> MovieKey {
        MovieKey {
            title: self.title.clone(),
            year: self.year,
        }
    }

    /// Genres joined with ", " - the form used for searching and for
    /// top-genre grouping.
    pub fn genre_string(&self) -> String {
        self.genre.join(", ")
    }

    /// Stamp `DateAdded` if it has never been set.
    ///
    /// Set exactly once, at first load; later reloads must not regress it.
    pub fn stamp_date_added(&mut self, now: DateTime<Utc>) {
        if self.date_added.is_none() {
            self.date_added = Some(now);
        }
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.emoji, self.title, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn movie(title: &str, year: i32) -> Movie {
        Movie {
            title: title.to_string(),
            year,
            genre: vec!["Action".to_string(), "Sci-Fi".to_string()],
            director: "Someone".to_string(),
            rating: 7.5,
            emoji: "🎬".to_string(),
            is_favorite: false,
            date_added: None,
        }
    }

    #[test]
    fn test_genre_string_joins_with_comma_space() {
        assert_eq!(movie("Dune", 2021).genre_string(), "Action, Sci-Fi");

        let mut empty = movie("Dune", 2021);
        empty.genre.clear();
        assert_eq!(empty.genre_string(), "");
    }

    #[test]
    fn test_key_matches_by_title_and_year() {
        let a = movie("Dune", 2021);
        let mut b = movie("Dune", 2021);
        b.director = "Someone Else".to_string();
        b.rating = 1.0;
        assert_eq!(a.key(), b.key());

        let remake = movie("Dune", 1984);
        assert_ne!(a.key(), remake.key());
    }

    #[test]
    fn test_date_added_stamped_exactly_once() {
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let mut m = movie("Dune", 2021);
        m.stamp_date_added(first);
        assert_eq!(m.date_added, Some(first));

        // A reload must not regress the original stamp
        m.stamp_date_added(later);
        assert_eq!(m.date_added, Some(first));
    }

    #[test]
    fn test_parses_raw_catalog_record() {
        let json = r#"{
            "title": "The Matrix",
            "year": 1999,
            "genre": ["Action", "Sci-Fi"],
            "director": "The Wachowskis",
            "rating": 8.7,
            "emoji": "🕶️"
        }"#;

        let m: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(m.title, "The Matrix");
        assert_eq!(m.year, 1999);
        assert!(!m.is_favorite);
        assert!(m.date_added.is_none());
    }
}
