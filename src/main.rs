// src/main.rs
//
// Terminal front end: drives the view-state holders and prints their state.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use cinehub::db::{get_database_stats, verify_database_integrity};
use cinehub::domain::{CatalogSnapshot, DiscoverFilter, LocalEntity, SavedFlag};
use cinehub::view_models::{
    FeedState, LoadOutcome, MovieFeed, PersonFeed, SearchOutcome, TvFeed,
};
use cinehub::{AppConfig, AppState};

#[derive(Parser)]
#[command(name = "cinehub", about = "Browse TMDB movies, shows and people")]
struct Cli {
    /// Print state as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Language for this run only, e.g. pt-BR
    #[arg(long, global = true)]
    language: Option<String>,

    /// Region for this run only, e.g. BR
    #[arg(long, global = true)]
    region: Option<String>,

    /// Use this database file instead of the configured one
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse a movie list
    Movies {
        #[arg(value_enum, default_value = "popular")]
        list: MovieListArg,
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Discover only: TMDB genre id
        #[arg(long)]
        genre: Option<i64>,
        /// Discover only: e.g. vote_average.desc
        #[arg(long)]
        sort_by: Option<String>,
    },
    /// Browse a TV list
    Shows {
        #[arg(value_enum, default_value = "popular")]
        list: TvListArg,
        #[arg(long, default_value_t = 1)]
        pages: u32,
        #[arg(long)]
        genre: Option<i64>,
        #[arg(long)]
        sort_by: Option<String>,
    },
    /// Popular people
    People {
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Search movies, shows or people
    Search {
        #[arg(value_enum)]
        kind: SearchKind,
        query: String,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Movie detail
    Movie { id: i64 },
    /// Show detail
    Show { id: i64 },
    /// Episodes of one season
    Season { id: i64, number: i64 },
    /// Person detail
    Person { id: i64 },
    /// Genre list for the discover filter
    Genres {
        #[arg(value_enum)]
        kind: SavedKind,
    },
    /// Toggle the favorite flag of a movie or show
    Favorite {
        #[arg(value_enum)]
        kind: SavedKind,
        id: i64,
    },
    /// Toggle the watch-list flag of a movie or show
    Watchlist {
        #[arg(value_enum)]
        kind: SavedKind,
        id: i64,
    },
    /// Saved movies and shows
    MySpace,
    /// Persist the language (and optionally region) in the config file
    SetLanguage {
        language: String,
        #[arg(long)]
        region: Option<String>,
    },
    /// Local database statistics
    Db,
}

impl Command {
    /// Commands that only touch the local database or config file
    fn is_local(&self) -> bool {
        matches!(
            self,
            Command::MySpace | Command::Db | Command::SetLanguage { .. }
        )
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MovieListArg {
    Discover,
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl From<MovieListArg> for MovieFeed {
    fn from(arg: MovieListArg) -> Self {
        match arg {
            MovieListArg::Discover => MovieFeed::Discover,
            MovieListArg::Popular => MovieFeed::Popular,
            MovieListArg::TopRated => MovieFeed::TopRated,
            MovieListArg::NowPlaying => MovieFeed::NowPlaying,
            MovieListArg::Upcoming => MovieFeed::Upcoming,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TvListArg {
    Discover,
    Popular,
    TopRated,
    AiringToday,
    OnTheAir,
}

impl From<TvListArg> for TvFeed {
    fn from(arg: TvListArg) -> Self {
        match arg {
            TvListArg::Discover => TvFeed::Discover,
            TvListArg::Popular => TvFeed::Popular,
            TvListArg::TopRated => TvFeed::TopRated,
            TvListArg::AiringToday => TvFeed::AiringToday,
            TvListArg::OnTheAir => TvFeed::OnTheAir,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchKind {
    Movie,
    Tv,
    Person,
}

#[derive(Clone, Copy, ValueEnum)]
enum SavedKind {
    Movie,
    Tv,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Only touches the config file, so it runs before bootstrap
    if let Command::SetLanguage { language, region } = &cli.command {
        return set_language(language, region.as_deref());
    }

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(path) = &cli.database {
        config.database_path = Some(path.clone());
    }
    if !cli.command.is_local() {
        config.require_api_key()?;
    }
    let state = AppState::bootstrap(config).context("Failed to start CineHub")?;
    if let Some(language) = &cli.language {
        state.locale.set_language(language.as_str());
    }
    if let Some(region) = &cli.region {
        state.locale.set_region(region.as_str());
    }
    log::info!(
        "CineHub ready ({} / {})",
        state.locale.language(),
        state.locale.region()
    );

    run(&cli, &state).await
}

async fn run(cli: &Cli, state: &AppState) -> Result<()> {
    match &cli.command {
        Command::Movies {
            list,
            pages,
            genre,
            sort_by,
        } => {
            let feed = MovieFeed::from(*list);
            if feed == MovieFeed::Discover {
                state
                    .movies
                    .set_discover_filter(discover_filter(*genre, sort_by.as_deref()));
            }
            for _ in 0..*pages {
                if !keep_paging(state.movies.load_more(feed).await) {
                    break;
                }
            }
            print_feed(cli, &state.movies.feed(feed).snapshot(), |m| {
                format!("{:>8}  {} ({})", m.id, m.title, year(m.release_year()))
            })?;
            report(state.movies.error())
        }
        Command::Shows {
            list,
            pages,
            genre,
            sort_by,
        } => {
            let feed = TvFeed::from(*list);
            if feed == TvFeed::Discover {
                state
                    .shows
                    .set_discover_filter(discover_filter(*genre, sort_by.as_deref()));
            }
            for _ in 0..*pages {
                if !keep_paging(state.shows.load_more(feed).await) {
                    break;
                }
            }
            print_feed(cli, &state.shows.feed(feed).snapshot(), |s| {
                format!("{:>8}  {} ({})", s.id, s.name, year(s.first_air_year()))
            })?;
            report(state.shows.error())
        }
        Command::People { pages } => {
            for _ in 0..*pages {
                if !keep_paging(state.people.load_more(PersonFeed::Popular).await) {
                    break;
                }
            }
            print_feed(cli, &state.people.feed(PersonFeed::Popular).snapshot(), |p| {
                format!(
                    "{:>8}  {} [{}]",
                    p.id,
                    p.name,
                    p.known_for_department.as_deref().unwrap_or("-")
                )
            })?;
            report(state.people.error())
        }
        Command::Search { kind, query, pages } => search(cli, state, *kind, query, *pages).await,
        Command::Movie { id } => {
            state.movies.open(*id).await;
            let detail = state.movies.detail();
            if cli.json {
                print_json(&detail)?;
            } else if let Some(movie) = &detail.detail {
                println!("{} ({})", movie.title, year(movie.release_year()));
                if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
                    println!("{}", tagline);
                }
                println!(
                    "Rated {}  {:.1}/10  {} min",
                    detail.certification.as_deref().unwrap_or("-"),
                    movie.vote_average,
                    movie.runtime.unwrap_or_default()
                );
                if let Some(credits) = &detail.credits {
                    let directors: Vec<&str> =
                        credits.directors().map(|c| c.name.as_str()).collect();
                    println!("Directed by {}", directors.join(", "));
                }
                print_poster(state, movie.poster_path.as_deref());
                print_trailer(&detail.videos);
                print_flags(detail.flags.is_favorite, detail.flags.is_in_watchlist);
            }
            report(state.movies.error())
        }
        Command::Show { id } => {
            state.shows.open(*id).await;
            let detail = state.shows.detail();
            if cli.json {
                print_json(&detail)?;
            } else if let Some(show) = &detail.detail {
                println!("{} ({})", show.name, year(show.first_air_year()));
                println!(
                    "Rated {}  {:.1}/10  {} seasons",
                    detail.content_rating.as_deref().unwrap_or("-"),
                    show.vote_average,
                    show.number_of_seasons.unwrap_or_default()
                );
                for season in &show.seasons {
                    println!(
                        "  S{:02}  {} ({} episodes)",
                        season.season_number, season.name, season.episode_count
                    );
                }
                print_poster(state, show.poster_path.as_deref());
                print_trailer(&detail.videos);
                print_flags(detail.flags.is_favorite, detail.flags.is_in_watchlist);
            }
            report(state.shows.error())
        }
        Command::Season { id, number } => {
            state.shows.open(*id).await;
            state.shows.load_season(*id, *number).await;
            let detail = state.shows.detail();
            match detail.seasons.get(number) {
                Some(season) if cli.json => print_json(season)?,
                Some(season) => {
                    println!("{}", season.name);
                    for episode in &season.episodes {
                        println!("  E{:02}  {}", episode.episode_number, episode.name);
                    }
                }
                None => {}
            }
            report(state.shows.error())
        }
        Command::Person { id } => {
            state.people.open(*id).await;
            let detail = state.people.detail();
            if cli.json {
                print_json(&detail)?;
            } else if let Some(person) = &detail.detail {
                println!("{} (born {})", person.name, year(person.birth_year()));
                if let Some(credits) = &detail.credits {
                    for credit in credits.cast.iter().take(10) {
                        println!(
                            "  {} ({})  as {}",
                            credit.display_title(),
                            year(credit.year()),
                            credit.character.as_deref().unwrap_or("-")
                        );
                    }
                }
            }
            report(state.people.error())
        }
        Command::Genres { kind } => {
            let genres = match kind {
                SavedKind::Movie => {
                    state.movies.load_genres().await;
                    state.movies.genres()
                }
                SavedKind::Tv => {
                    state.shows.load_genres().await;
                    state.shows.genres()
                }
            };
            if cli.json {
                print_json(&genres)?;
            } else {
                for genre in &genres {
                    println!("{:>6}  {}", genre.id, genre.name);
                }
            }
            report(state.movies.error().or_else(|| state.shows.error()))
        }
        Command::Favorite { kind, id } => toggle(state, *kind, *id, SavedFlag::Favorite).await,
        Command::Watchlist { kind, id } => toggle(state, *kind, *id, SavedFlag::Watchlist).await,
        Command::MySpace => {
            state.my_space.refresh();
            let space = state.my_space.state();
            if cli.json {
                print_json(&space)?;
            } else {
                print_saved("Favorite movies", &space.favorite_movies);
                print_saved("Movie watch list", &space.watchlist_movies);
                print_saved("Favorite shows", &space.favorite_shows);
                print_saved("Show watch list", &space.watchlist_shows);
            }
            report(state.my_space.error())
        }
        Command::Db => {
            let conn = state.pool.get()?;
            verify_database_integrity(&conn)?;
            let stats = get_database_stats(&conn)?;
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("{} bytes, {} pages", stats.size_bytes, stats.page_count);
                println!("{} movies, {} shows saved", stats.movie_count, stats.show_count);
            }
            Ok(())
        }
        Command::SetLanguage { .. } => Ok(()),
    }
}

async fn search(
    cli: &Cli,
    state: &AppState,
    kind: SearchKind,
    query: &str,
    pages: u32,
) -> Result<()> {
    match kind {
        SearchKind::Movie => {
            let mut outcome = state.movies.search(query).await;
            for _ in 1..pages {
                if !keep_searching(outcome) {
                    break;
                }
                outcome = state.movies.search_more().await;
            }
            print_feed(cli, &state.movies.search_feed().feed().snapshot(), |m| {
                format!("{:>8}  {} ({})", m.id, m.title, year(m.release_year()))
            })?;
            report(state.movies.error())
        }
        SearchKind::Tv => {
            let mut outcome = state.shows.search(query).await;
            for _ in 1..pages {
                if !keep_searching(outcome) {
                    break;
                }
                outcome = state.shows.search_more().await;
            }
            print_feed(cli, &state.shows.search_feed().feed().snapshot(), |s| {
                format!("{:>8}  {} ({})", s.id, s.name, year(s.first_air_year()))
            })?;
            report(state.shows.error())
        }
        SearchKind::Person => {
            let mut outcome = state.people.search(query).await;
            for _ in 1..pages {
                if !keep_searching(outcome) {
                    break;
                }
                outcome = state.people.search_more().await;
            }
            print_feed(cli, &state.people.search_feed().feed().snapshot(), |p| {
                let known_for: Vec<&str> =
                    p.known_for.iter().map(|k| k.display_title()).collect();
                format!("{:>8}  {}  {}", p.id, p.name, known_for.join(", "))
            })?;
            report(state.people.error())
        }
    }
}

/// Toggle a flag on the item's current catalog snapshot.
async fn toggle(state: &AppState, kind: SavedKind, id: i64, flag: SavedFlag) -> Result<()> {
    let flags = match kind {
        SavedKind::Movie => {
            state.movies.open(id).await;
            let snapshot = state
                .movies
                .detail()
                .detail
                .as_ref()
                .map(CatalogSnapshot::from);
            match snapshot {
                Some(snapshot) => state.movies.toggle(&snapshot, flag),
                None => None,
            }
        }
        SavedKind::Tv => {
            state.shows.open(id).await;
            let snapshot = state.shows.detail().detail.as_ref().map(CatalogSnapshot::from);
            match snapshot {
                Some(snapshot) => state.shows.toggle(&snapshot, flag),
                None => None,
            }
        }
    };

    match flags {
        Some(flags) => {
            print_flags(flags.is_favorite, flags.is_in_watchlist);
            Ok(())
        }
        None => report(state.movies.error().or_else(|| state.shows.error())),
    }
}

fn set_language(language: &str, region: Option<&str>) -> Result<()> {
    let path = AppConfig::config_path()?;
    let mut config = AppConfig::load_file(&path)?;
    config.language = language.to_string();
    if let Some(region) = region {
        config.region = region.to_string();
    }
    config.save_to(&path)?;
    println!("Saved {} / {} to {}", config.language, config.region, path.display());
    Ok(())
}

fn discover_filter(genre: Option<i64>, sort_by: Option<&str>) -> DiscoverFilter {
    let mut filter = DiscoverFilter::default();
    if let Some(genre) = genre {
        filter = filter.with_genre(genre);
    }
    if let Some(sort_by) = sort_by {
        filter = filter.sorted_by(sort_by);
    }
    filter
}

fn keep_paging(outcome: LoadOutcome) -> bool {
    matches!(outcome, LoadOutcome::Appended(_))
}

fn keep_searching(outcome: SearchOutcome) -> bool {
    matches!(outcome, SearchOutcome::Loaded(LoadOutcome::Appended(_)))
}

fn print_feed<T: Serialize>(
    cli: &Cli,
    feed: &FeedState<T>,
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if cli.json {
        return print_json(feed);
    }
    for item in &feed.items {
        println!("{}", line(item));
    }
    if let Some(total) = feed.total_pages {
        println!("-- page {} of {}", feed.next_page.saturating_sub(1), total);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_saved(heading: &str, entities: &[LocalEntity]) {
    println!("{} ({})", heading, entities.len());
    for entity in entities {
        println!("  {:>8}  {}", entity.id, entity.title);
    }
}

fn print_flags(is_favorite: bool, is_in_watchlist: bool) {
    println!(
        "favorite: {}  watch list: {}",
        if is_favorite { "yes" } else { "no" },
        if is_in_watchlist { "yes" } else { "no" }
    );
}

fn print_poster(state: &AppState, path: Option<&str>) {
    if let Some(path) = path {
        println!("Poster: {}", state.config.image_url(path, "w500"));
    }
}

fn print_trailer(videos: &[cinehub::Video]) {
    if let Some(url) = videos.iter().find(|v| v.is_trailer()).and_then(|v| v.watch_url()) {
        println!("Trailer: {}", url);
    }
}

fn year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Surface the holder's error message as the process failure.
fn report(error: Option<String>) -> Result<()> {
    match error {
        Some(message) if message != cinehub::application::NO_MORE_ITEMS => bail!(message),
        _ => Ok(()),
    }
}
