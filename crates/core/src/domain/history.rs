use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::movie::Movie;

/// What the user did with a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryAction {
    Viewed,
    Favorited,
    Unfavorited,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HistoryAction::Viewed => "Viewed",
            HistoryAction::Favorited => "Favorited",
            HistoryAction::Unfavorited => "Unfavorited",
        };
        write!(f, "{}", s)
    }
}

/// One activity log record. Immutable once created; removed only by a
/// full-log clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub emoji: String,
    pub action: HistoryAction,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Snapshot the movie's current fields together with the action.
    pub fn snapshot(movie: &Movie, action: HistoryAction, timestamp: DateTime<Utc>) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year,
            genre: movie.genre.clone(),
            emoji: movie.emoji.clone(),
            action,
            timestamp,
        }
    }

    pub fn genre_string(&self) -> String {
        self.genre.join(", ")
    }
}

/// One calendar day of history. A read-only projection, recomputed from the
/// log on every append or clear, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryGroup {
    /// "Today", "Yesterday", or an ISO `yyyy-MM-dd` date.
    pub label: String,
    pub entries: Vec<HistoryEntry>,
}

/// Per-genre activity aggregate: one emoji glyph per historical entry that
/// referenced the genre, in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreStat {
    pub genre: String,
    pub emoji_bar: String,
    pub count: usize,
}

/// Group history entries by the calendar day (UTC) of their timestamp.
///
/// Days are ordered newest first; entries within a day newest first. The
/// current day is labeled "Today", one day prior "Yesterday", anything older
/// by its ISO date.
pub fn group_by_day(entries: &[HistoryEntry], today: NaiveDate) -> Vec<HistoryGroup> {
    let mut days: Vec<(NaiveDate, Vec<HistoryEntry>)> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.date_naive();
        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, bucket)) => bucket.push(entry.clone()),
            None => days.push((date, vec![entry.clone()])),
        }
    }

    days.sort_by(|(a, _), (b, _)| b.cmp(a));

    days.into_iter()
        .map(|(date, mut bucket)| {
            bucket.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            HistoryGroup {
                label: day_label(date, today),
                entries: bucket,
            }
        })
        .collect()
}

fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today - Duration::days(1) {
        "Yesterday".to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Aggregate history entries into per-genre stats.
///
/// Every entry contributes one (genre, emoji) pair per genre it lists; pairs
/// are grouped by genre and ordered by descending pair count, ties keeping
/// first-encounter order. Each genre's emoji glyphs are concatenated in the
/// order they were encountered.
pub fn genre_stats(entries: &[HistoryEntry]) -> Vec<GenreStat> {
    let mut stats: Vec<GenreStat> = Vec::new();

    for entry in entries {
        for genre in &entry.genre {
            match stats.iter_mut().find(|s| s.genre == *genre) {
                Some(stat) => {
                    stat.emoji_bar.push_str(&entry.emoji);
                    stat.count += 1;
                }
                None => stats.push(GenreStat {
                    genre: genre.clone(),
                    emoji_bar: entry.emoji.clone(),
                    count: 1,
                }),
            }
        }
    }

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(title: &str, genres: &[&str], emoji: &str, ts: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            title: title.to_string(),
            year: 2000,
            genre: genres.iter().map(|g| g.to_string()).collect(),
            emoji: emoji.to_string(),
            action: HistoryAction::Viewed,
            timestamp: ts,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_grouping_labels_today_yesterday_then_iso() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let entries = vec![
            entry("Old", &["Drama"], "🎭", at(2024, 1, 1, 10)),
            entry("Recent", &["Action"], "🔥", at(2026, 8, 29, 9)),
            entry("Prior", &["Comedy"], "😂", at(2026, 8, 28, 20)),
        ];

        let groups = group_by_day(&entries, today);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Yesterday", "2024-01-01"]);
    }

    #[test]
    fn test_entries_within_a_day_newest_first() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let entries = vec![
            entry("Morning", &[], "", at(2026, 8, 29, 8)),
            entry("Evening", &[], "", at(2026, 8, 29, 21)),
            entry("Noon", &[], "", at(2026, 8, 29, 12)),
        ];

        let groups = group_by_day(&entries, today);
        assert_eq!(groups.len(), 1);
        let titles: Vec<&str> = groups[0].entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Evening", "Noon", "Morning"]);
    }

    #[test]
    fn test_genre_stats_emoji_bar_and_ordering() {
        let ts = at(2026, 8, 29, 10);
        let entries = vec![
            entry("A", &["Action"], "🔥", ts),
            entry("B", &["Action"], "💥", ts),
            entry("C", &["Comedy"], "😂", ts),
        ];

        let stats = genre_stats(&entries);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].genre, "Action");
        assert_eq!(stats[0].emoji_bar, "🔥💥");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].genre, "Comedy");
    }

    #[test]
    fn test_genre_stats_multi_genre_entry_counts_each_genre() {
        let ts = at(2026, 8, 29, 10);
        let entries = vec![entry("A", &["Action", "Sci-Fi"], "🚀", ts)];

        let stats = genre_stats(&entries);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].emoji_bar, "🚀");
        assert_eq!(stats[1].emoji_bar, "🚀");
    }

    #[test]
    fn test_action_serializes_as_plain_name() {
        let json = serde_json::to_string(&HistoryAction::Unfavorited).unwrap();
        assert_eq!(json, "\"Unfavorited\"");
        let back: HistoryAction = serde_json::from_str("\"Viewed\"").unwrap();
        assert_eq!(back, HistoryAction::Viewed);
    }
}
