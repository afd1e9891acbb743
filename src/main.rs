mod app;
mod cards;
mod catalog;
mod config;
mod controller;
mod detail;
mod genre;
mod logging;
mod query;
mod ui;

#[cfg(test)]
mod query_properties;
#[cfg(test)]
mod test_support;

use app::App;
use cards::Card;
use catalog::Catalog;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use detail::{DetailContent, NO_SEASONS, SeasonsView};
use genre::GenreIndex;
use logging::LogTarget;
use query::{GenreFilter, GenreFilterError, Query, SortMode, run_query};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Browse a podcast catalog in the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dataset JSON file (defaults to the bundled catalog)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive explorer (default)
    Run,
    /// Print the podcasts matching a query
    List {
        /// Case-insensitive title search
        #[arg(short, long, default_value = "")]
        search: String,
        /// Genre id, genre title, or "all"
        #[arg(short, long, default_value = "all")]
        genre: String,
        /// "title" or "recency" (defaults to the configured sort)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Print the genre index
    Genres,
    /// Print the details of one podcast
    Show {
        /// Podcast id
        id: String,
    },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| fail(e.user_message()));

    let target = match command {
        Commands::Run => logging::log_file_path().map(LogTarget::File).unwrap_or(LogTarget::Stderr),
        _ => LogTarget::Stderr,
    };
    let default_filter = match (&command, &config.log_filter) {
        (Commands::Run, Some(filter)) => filter.clone(),
        (Commands::Run, None) => "info".to_string(),
        _ => "warn".to_string(),
    };
    if let Err(e) = logging::init_tracing(&target, &default_filter) {
        eprintln!("Warning: {e}");
    }

    let data = cli.data.or_else(|| config.data.clone());
    let catalog = match &data {
        Some(path) => Catalog::from_path(path),
        None => Catalog::bundled(),
    }
    .unwrap_or_else(|e| fail(e.user_message()));
    info!(
        source = %data.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "bundled".into()),
        podcasts = catalog.podcasts.len(),
        genres = catalog.genres.len(),
        "catalog loaded"
    );

    let now = Utc::now();

    match command {
        Commands::Run => run_tui(catalog, config.default_sort, now)?,
        Commands::List { search, genre, sort } => {
            let genres = GenreIndex::build(&catalog.genres);
            let genre = resolve_genre(&genre, &genres).unwrap_or_else(|e| fail(e));
            let query = Query {
                search,
                genre,
                sort: sort.as_deref().map(SortMode::parse).unwrap_or(config.default_sort),
            };
            for line in list_lines(&catalog, &genres, &query, now) {
                println!("{line}");
            }
        }
        Commands::Genres => {
            for genre in GenreIndex::build(&catalog.genres).iter() {
                println!("{}\t{}", genre.id, genre.title);
            }
        }
        Commands::Show { id } => {
            let genres = GenreIndex::build(&catalog.genres);
            let (Some(index), Some(podcast)) = (catalog.position(&id), catalog.podcast(&id)) else {
                fail(format!("no podcast with id {id}"));
            };
            let content = DetailContent::build(index, podcast, &catalog, &genres);
            for line in show_lines(&content) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Accept a numeric id or "all", then fall back to a genre title.
fn resolve_genre(value: &str, genres: &GenreIndex) -> Result<GenreFilter, GenreFilterError> {
    GenreFilter::parse(value).or_else(|err| match genres.resolve_title(value) {
        Some(id) => Ok(GenreFilter::Only(id)),
        None => {
            warn!(selector = value, "unknown genre selector");
            Err(err)
        }
    })
}

fn list_lines(catalog: &Catalog, genres: &GenreIndex, query: &Query, now: DateTime<Utc>) -> Vec<String> {
    let results = run_query(&catalog.podcasts, query);
    if results.is_empty() {
        return vec![ui::NO_RESULTS.to_string()];
    }
    results
        .into_iter()
        .map(|i| {
            let card = Card::from_podcast(i, &catalog.podcasts[i], genres, now);
            format!(
                "{}\t{}\t{}\t{}",
                card.title,
                card.genres,
                card.seasons_label(),
                card.updated
            )
        })
        .collect()
}

fn show_lines(content: &DetailContent) -> Vec<String> {
    let mut lines = vec![
        content.title.clone(),
        format!("Genres: {}", content.genres.join(", ")),
        format!("Last updated: {}", content.updated),
        String::new(),
    ];
    match &content.seasons {
        SeasonsView::Unavailable => lines.push(NO_SEASONS.to_string()),
        SeasonsView::Listed(seasons) => {
            for season in seasons {
                lines.push(format!("{}\t{}", season.label, season.episodes_label()));
            }
        }
    }
    lines
}

fn run_tui(catalog: Catalog, sort: SortMode, now: DateTime<Utc>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(catalog, sort, now);

    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

    app.update_viewport(terminal.get_frame().area());
    app.init();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    if let Err(e) = result {
        fail(e);
    }
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            app.update_viewport(frame.area());
            ui::render(app, frame);
        })?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(Duration::from_millis(250))? {
            controller::handle_event(app, event::read()?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_updated;
    use crate::test_support::scenario_catalog;

    fn now() -> DateTime<Utc> {
        parse_updated("2024-03-01").unwrap()
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["podcast-explorer", "list", "--search", "alp", "--sort", "title"]).unwrap();
        match cli.command {
            Some(Commands::List { search, genre, sort }) => {
                assert_eq!(search, "alp");
                assert_eq!(genre, "all");
                assert_eq!(sort.as_deref(), Some("title"));
            }
            _ => panic!("expected list"),
        }

        let cli = Cli::try_parse_from(["podcast-explorer", "--data", "x.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_resolve_genre_forms() {
        let catalog = scenario_catalog();
        let genres = GenreIndex::build(&catalog.genres);
        assert_eq!(resolve_genre("all", &genres).unwrap(), GenreFilter::All);
        assert_eq!(resolve_genre("2", &genres).unwrap(), GenreFilter::Only(2));
        assert_eq!(resolve_genre("comedy", &genres).unwrap(), GenreFilter::Only(2));
        assert!(resolve_genre("Jazz", &genres).is_err());
    }

    #[test]
    fn test_list_lines() {
        let catalog = scenario_catalog();
        let genres = GenreIndex::build(&catalog.genres);
        let lines = list_lines(&catalog, &genres, &Query::default(), now());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Beta\tComedy, Unknown\t"));
        assert!(lines[1].starts_with("Alpha\tNews\t2 seasons\t"));

        let query = Query {
            search: "zzz".into(),
            ..Query::default()
        };
        assert_eq!(list_lines(&catalog, &genres, &query, now()), vec![ui::NO_RESULTS]);
    }

    #[test]
    fn test_show_lines() {
        let catalog = scenario_catalog();
        let genres = GenreIndex::build(&catalog.genres);

        let alpha = DetailContent::build(0, &catalog.podcasts[0], &catalog, &genres);
        let lines = show_lines(&alpha);
        assert_eq!(lines[0], "Alpha");
        assert_eq!(lines[1], "Genres: News");
        assert!(lines.iter().any(|l| l == "Season 1\t10 episodes"));

        let beta = DetailContent::build(1, &catalog.podcasts[1], &catalog, &genres);
        assert_eq!(show_lines(&beta).last().unwrap(), NO_SEASONS);
    }
}
