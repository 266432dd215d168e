//! cinetrack command line.
//!
//! Drives the watchlist, collections and preferences stored in the local
//! SQLite database, and prints statistics for a metadata snapshot.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use cinetrack::app::App;
use cinetrack::config::AppConfig;
use cinetrack::logging;
use cinetrack::managers::collection_manager::CollectionManagerTrait;
use cinetrack::managers::watchlist_manager::WatchlistManagerTrait;
use cinetrack::services::preference_engine::PreferenceEngineTrait;
use cinetrack::types::metadata::MetadataIndex;
use cinetrack::types::preferences::{AccentColor, ViewMode};
use cinetrack::types::watchlist::{WatchFilter, WatchlistEntry};

#[derive(Parser)]
#[command(name = "cinetrack")]
#[command(about = "Personal watchlist, collections and viewing statistics")]
#[command(version)]
struct Cli {
    /// SQLite database file (overrides config and CINETRACK_DB)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bookmarked titles
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Named groups of titles
    Collections {
        #[command(subcommand)]
        cmd: CollectionCommands,
    },
    /// Display preferences
    Prefs {
        #[command(subcommand)]
        cmd: PrefCommands,
    },
    /// Aggregate statistics over the watchlist
    Stats {
        /// JSON object mapping title id to `{ "runtime": n, "genres": [{ "name": ".." }] }`
        #[arg(long, value_name = "FILE")]
        metadata: Option<PathBuf>,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List entries
    List {
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,
    },
    /// Bookmark a title, or remove it if already bookmarked
    Toggle { id: u64 },
    /// Flip the watched flag of a bookmarked title
    Watched { id: u64 },
    /// Rate a bookmarked title from 1 to 10
    Rate { id: u64, rating: u8 },
    /// Set or clear (when TEXT is omitted) the notes of a bookmarked title
    Note { id: u64, text: Option<String> },
    /// Record when a bookmarked title was watched (RFC 3339)
    WatchedOn { id: u64, date: DateTime<Utc> },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Watched,
    Unwatched,
}

impl From<FilterArg> for WatchFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => WatchFilter::All,
            FilterArg::Watched => WatchFilter::Watched,
            FilterArg::Unwatched => WatchFilter::Unwatched,
        }
    }
}

#[derive(Subcommand)]
enum CollectionCommands {
    List,
    Create { name: String },
    Delete { id: String },
    Rename { id: String, name: String },
    /// Add a title to a collection
    Add { id: String, title: u64 },
    /// Remove a title from a collection
    Remove { id: String, title: u64 },
}

#[derive(Subcommand)]
enum PrefCommands {
    Show,
    Dark {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    Accent {
        #[arg(value_enum)]
        color: AccentArg,
    },
    View {
        #[arg(value_enum)]
        mode: ViewArg,
    },
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum AccentArg {
    Cyan,
    Purple,
    Green,
    Red,
    Orange,
}

impl From<AccentArg> for AccentColor {
    fn from(arg: AccentArg) -> Self {
        match arg {
            AccentArg::Cyan => AccentColor::Cyan,
            AccentArg::Purple => AccentColor::Purple,
            AccentArg::Green => AccentColor::Green,
            AccentArg::Red => AccentColor::Red,
            AccentArg::Orange => AccentColor::Orange,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Grid,
    List,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::List => ViewMode::List,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())
        .context("failed to load config")?
        .with_env_overrides();
    logging::init_logging(cli.verbose, &config.log_filter);

    let db_path = cli.db.unwrap_or_else(|| config.resolved_database_path());
    let mut app = App::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    match cli.command {
        Commands::Watchlist { cmd } => run_watchlist(&mut app, cmd),
        Commands::Collections { cmd } => run_collections(&mut app, cmd),
        Commands::Prefs { cmd } => run_prefs(&mut app, cmd),
        Commands::Stats { metadata, json } => run_stats(&app, metadata, json),
    }
}

fn print_entry(entry: &WatchlistEntry) {
    let mark = if entry.watched { "x" } else { " " };
    let rating = entry
        .rating
        .map(|r| format!("{}/10", r))
        .unwrap_or_else(|| "-".to_string());
    print!(
        "[{}] {:>8}  rating {:>5}  added {}",
        mark,
        entry.title_id,
        rating,
        entry.added_at.format("%Y-%m-%d")
    );
    if let Some(date) = entry.watched_date {
        print!("  watched {}", date.format("%Y-%m-%d"));
    }
    if let Some(notes) = &entry.notes {
        print!("  \"{}\"", notes);
    }
    println!();
}

fn run_watchlist(app: &mut App, cmd: WatchlistCommands) -> Result<()> {
    match cmd {
        WatchlistCommands::List { filter } => {
            let entries = app.watchlist().list_filtered(filter.into());
            for entry in &entries {
                print_entry(entry);
            }
            println!(
                "{} shown, {} watched, {} unwatched",
                entries.len(),
                app.watchlist().watched_count(),
                app.watchlist().unwatched_count()
            );
        }
        WatchlistCommands::Toggle { id } => {
            if app.toggle_bookmark(id)? {
                println!("Added {} to watchlist", id);
            } else {
                println!("Removed {} from watchlist", id);
            }
        }
        WatchlistCommands::Watched { id } => match app.toggle_watched(id)? {
            Some(true) => println!("Marked {} as watched", id),
            Some(false) => println!("Marked {} as unwatched", id),
            None => println!("{} is not on the watchlist", id),
        },
        WatchlistCommands::Rate { id, rating } => {
            if !app.set_rating(id, rating)? {
                println!("{} is not on the watchlist", id);
            }
        }
        WatchlistCommands::Note { id, text } => {
            if !app.watchlist_mut().set_notes(id, text.as_deref())? {
                println!("{} is not on the watchlist", id);
            }
        }
        WatchlistCommands::WatchedOn { id, date } => {
            if !app.watchlist_mut().set_watched_date(id, Some(date))? {
                println!("{} is not on the watchlist", id);
            }
        }
    }
    Ok(())
}

fn run_collections(app: &mut App, cmd: CollectionCommands) -> Result<()> {
    match cmd {
        CollectionCommands::List => {
            for c in app.list_collections() {
                println!("{}  {}  ({} titles)", c.id, c.name, c.title_ids.len());
            }
        }
        CollectionCommands::Create { name } => {
            let c = app.create_collection(&name)?;
            println!("Created collection {} ({})", c.name, c.id);
        }
        CollectionCommands::Delete { id } => {
            if !app.delete_collection(&id)? {
                println!("No collection {}", id);
            }
        }
        CollectionCommands::Rename { id, name } => {
            if !app.collections_mut().rename(&id, &name)? {
                println!("No collection {}", id);
            }
        }
        CollectionCommands::Add { id, title } => {
            if !app.collections_mut().add_title(&id, title)? {
                println!("Nothing changed");
            }
        }
        CollectionCommands::Remove { id, title } => {
            if !app.collections_mut().remove_title(&id, title)? {
                println!("Nothing changed");
            }
        }
    }
    Ok(())
}

fn run_prefs(app: &mut App, cmd: PrefCommands) -> Result<()> {
    match cmd {
        PrefCommands::Show => {}
        PrefCommands::Dark { enabled } => app.set_dark_mode(enabled)?,
        PrefCommands::Accent { color } => app.set_accent_color(color.into())?,
        PrefCommands::View { mode } => app.set_view_mode(mode.into())?,
        PrefCommands::Reset => app.preferences_mut().reset()?,
    }
    let prefs = app.get_preferences();
    println!("dark mode:    {}", prefs.dark_mode);
    println!("accent color: {}", prefs.accent_color);
    println!("view mode:    {}", prefs.view_mode);
    Ok(())
}

fn run_stats(app: &App, metadata: Option<PathBuf>, json: bool) -> Result<()> {
    let index: MetadataIndex = match metadata {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => MetadataIndex::new(),
    };

    let stats = app.compute_statistics(&index);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    if stats.total_count == 0 {
        println!("No statistics yet: the watchlist is empty.");
        return Ok(());
    }

    println!(
        "Titles: {} ({} watched, {} to go, {}% complete)",
        stats.total_count, stats.watched_count, stats.unwatched_count, stats.completion_percentage
    );
    println!(
        "Watch time: {}h {}m",
        stats.watch_time.hours, stats.watch_time.minutes
    );
    println!("Average rating: {}", stats.average_rating_display());
    println!("Watched this month: {}", stats.watched_this_month);

    if !stats.genre_frequency.is_empty() {
        println!("Top genres:");
        for g in &stats.genre_frequency {
            println!("  {:<20} {}", g.name, g.count);
        }
    }
    if !stats.monthly_histogram.is_empty() {
        println!("By month:");
        for m in &stats.monthly_histogram {
            println!("  {:<5} {}", m.month, m.count);
        }
    }
    if !stats.top_rated.is_empty() {
        println!("Top rated:");
        for e in &stats.top_rated {
            println!("  {:>8}  {}/10", e.title_id, e.rating.unwrap_or_default());
        }
    }
    Ok(())
}
