use anyhow::{bail, Result};
use cinedex_core::app::{SortField, TimeWindow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "cinedex")]
#[command(about = "Personal movie catalog - search, favorites, history, and statistics")]
pub struct CliArgs {
    /// Data directory (cache, favorites, history, settings)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Act as this user (persisted for later runs)
    #[arg(long)]
    pub user: Option<String>,

    /// Bypass the sticky cache and re-fetch the catalog
    #[arg(long)]
    pub refresh: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CliCommand {
    /// List the catalog view
    List {
        /// Free-text search (title, director, year, genres)
        #[arg(long)]
        search: Option<String>,
        /// Director-only filter
        #[arg(long)]
        director: Option<String>,
        /// Show favorites only
        #[arg(long)]
        favorites: bool,
        /// Sort field: Rating, Year, or Title
        #[arg(long)]
        sort: Option<String>,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Toggle a movie's favorite flag
    Favorite { title: String, year: i32 },
    /// Record that a movie was viewed
    View { title: String, year: i32 },
    /// Show the day-grouped activity history and genre stats
    History,
    /// Show catalog statistics
    Stats {
        /// Time window: all, month, or year
        #[arg(long, default_value = "all")]
        window: String,
    },
    /// Clear the activity history
    ClearHistory,
}

/// Parse a `--sort` value; unknown names are an error at the CLI edge (the
/// settings path, by contrast, falls back to the default silently).
pub fn parse_sort_field(s: &str) -> Result<SortField> {
    match s {
        "Rating" | "rating" => Ok(SortField::Rating),
        "Year" | "year" => Ok(SortField::Year),
        "Title" | "title" => Ok(SortField::Title),
        other => bail!("Unknown sort field: {} (expected Rating, Year, or Title)", other),
    }
}

pub fn parse_window(s: &str) -> Result<TimeWindow> {
    match s {
        "all" => Ok(TimeWindow::AllTime),
        "month" => Ok(TimeWindow::LastMonth),
        "year" => Ok(TimeWindow::LastYear),
        other => bail!("Unknown time window: {} (expected all, month, or year)", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list_defaults() {
        let args = CliArgs::parse_from(["cinedex", "list"]);
        assert_eq!(args.data_dir, None);
        assert_eq!(args.user, None);
        assert!(!args.refresh);
        assert_eq!(
            args.command,
            CliCommand::List {
                search: None,
                director: None,
                favorites: false,
                sort: None,
                asc: false,
            }
        );
    }

    #[test]
    fn test_cli_parse_list_with_filters() {
        let args = CliArgs::parse_from([
            "cinedex",
            "--user",
            "alice",
            "list",
            "--search",
            "matrix",
            "--director",
            "mann",
            "--favorites",
            "--sort",
            "Year",
            "--asc",
        ]);
        assert_eq!(args.user, Some("alice".to_string()));
        assert_eq!(
            args.command,
            CliCommand::List {
                search: Some("matrix".to_string()),
                director: Some("mann".to_string()),
                favorites: true,
                sort: Some("Year".to_string()),
                asc: true,
            }
        );
    }

    #[test]
    fn test_cli_parse_favorite_with_year() {
        let args = CliArgs::parse_from(["cinedex", "favorite", "Heat", "1995"]);
        assert_eq!(
            args.command,
            CliCommand::Favorite {
                title: "Heat".to_string(),
                year: 1995,
            }
        );
    }

    #[test]
    fn test_cli_parse_refresh_and_data_dir() {
        let args =
            CliArgs::parse_from(["cinedex", "--data-dir", "/tmp/cd", "--refresh", "history"]);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/cd")));
        assert!(args.refresh);
        assert_eq!(args.command, CliCommand::History);
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!(parse_sort_field("Rating").unwrap(), SortField::Rating);
        assert_eq!(parse_sort_field("year").unwrap(), SortField::Year);
        assert!(parse_sort_field("director").is_err());
    }

    #[test]
    fn test_parse_window() {
        assert_eq!(parse_window("all").unwrap(), TimeWindow::AllTime);
        assert_eq!(parse_window("month").unwrap(), TimeWindow::LastMonth);
        assert_eq!(parse_window("year").unwrap(), TimeWindow::LastYear);
        assert!(parse_window("decade").is_err());
    }
}
