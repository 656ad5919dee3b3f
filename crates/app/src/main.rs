//! cinedex binary - the composition root.
//!
//! Wires the file/HTTP adapters into a `CatalogEngine` instance, runs one
//! CLI command against it, and prints plain text.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use cinedex::adapters::persistence::JsonFileStore;
use cinedex::adapters::settings::FileSettingsStore;
use cinedex::adapters::source::HttpCatalogSource;
use cinedex::adapters::default_data_dir;
use cinedex::cli::{parse_sort_field, parse_window, CliArgs, CliCommand};
use cinedex::services::{CatalogEngine, EngineState};
use cinedex_core::domain::MovieKey;
use cinedex_core::ports::SystemClock;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with env filter
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => default_data_dir()
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".cinedex")),
    };
    info!("Using data directory {}", data_dir.display());

    let source = Arc::new(HttpCatalogSource::new(&data_dir));
    let files = Arc::new(JsonFileStore::new(&data_dir));
    let settings = Arc::new(FileSettingsStore::new(&data_dir));
    let clock = Arc::new(SystemClock);

    let mut engine =
        CatalogEngine::new(source, files.clone(), files, settings, clock);

    if let Some(user) = &args.user {
        engine.set_user(user).await?;
    }

    if args.refresh {
        engine.force_refresh().await;
    } else {
        engine.load().await;
    }

    if engine.state() == EngineState::Failed {
        eprintln!("Warning: catalog could not be loaded (no cache, fetch failed)");
    }

    match args.command {
        CliCommand::List {
            search,
            director,
            favorites,
            sort,
            asc,
        } => {
            if let Some(sort) = sort {
                engine.sort_by(parse_sort_field(&sort)?)?;
            }
            if asc && !engine.sort_ascending() {
                engine.toggle_sort_order()?;
            }
            engine.set_favorites_only(favorites)?;
            engine.apply_search(search.as_deref().unwrap_or(""), director.as_deref())?;

            println!(
                "{} of {} movies (sorted by {} {})",
                engine.view().len(),
                engine.catalog().len(),
                engine.sort_field(),
                if engine.sort_ascending() { "ascending" } else { "descending" },
            );
            for movie in engine.view() {
                let star = if movie.is_favorite { "★" } else { " " };
                println!(
                    "{} {:>4.1}  {}  [{}] - {}",
                    star,
                    movie.rating,
                    movie,
                    movie.genre_string(),
                    movie.director,
                );
            }
        }

        CliCommand::Favorite { title, year } => {
            let key = MovieKey { title, year };
            let now_favorite = engine.toggle_favorite(&key).await?;
            if now_favorite {
                println!("Favorited {}", key);
            } else {
                println!("Unfavorited {}", key);
            }
        }

        CliCommand::View { title, year } => {
            let key = MovieKey { title, year };
            engine.record_viewed(&key).await?;
            println!("Recorded viewing of {}", key);
        }

        CliCommand::History => {
            if engine.grouped_history().is_empty() {
                println!("No history for {}", engine.user());
            }
            for group in engine.grouped_history() {
                println!("{}", group.label);
                for entry in &group.entries {
                    println!(
                        "  {} {} ({}) - {} at {}",
                        entry.emoji,
                        entry.title,
                        entry.year,
                        entry.action,
                        entry.timestamp.format("%H:%M"),
                    );
                }
            }
            if !engine.genre_stats().is_empty() {
                println!("Genres:");
                for stat in engine.genre_stats() {
                    println!("  {:<12} {}", stat.genre, stat.emoji_bar);
                }
            }
        }

        CliCommand::Stats { window } => {
            let window = parse_window(&window)?;
            let stats = engine.statistics(window)?;
            println!("Statistics ({})", window.as_str());
            println!("  Favorites:      {}", stats.favorite_count);
            println!("  Top genre:      {}", stats.top_genre);
            println!("  Average rating: {:.1}", stats.average_rating);
            println!("  Top director:   {}", stats.top_director);
        }

        CliCommand::ClearHistory => {
            engine.clear_history().await?;
            println!("History cleared for {}", engine.user());
        }
    }

    Ok(())
}
