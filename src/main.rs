use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filmfinder::{
    config::Config,
    database::{Database, repositories::MovieSeaOrmRepository},
    image_cache::ScopedImageCache,
    models::{ActorSearchFilter, Movie},
    omdb::{MovieFilter, OmdbClient},
    services::MovieService,
    utils::format_memory,
};

#[derive(Parser)]
#[command(name = "filmfinder")]
#[command(version)]
#[command(about = "Movie lookup over the OMDb API with a local store and poster cache")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// OMDb API key (overrides config file)
    #[arg(short = 'k', long, value_name = "KEY")]
    api_key: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up one movie by title
    Movie {
        title: String,
        #[arg(short, long)]
        year: Option<i32>,
        /// Include Rotten Tomatoes ratings
        #[arg(long)]
        ratings: bool,
    },
    /// Search movies by free text
    Search {
        term: String,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Fetch a movie by IMDb id and store it locally
    Save { imdb_id: String },
    /// Print a stored movie without contacting the API
    Show { imdb_id: String },
    /// Store the built-in sample movies
    Seed,
    /// Search stored movies by actor
    Actor(ActorArgs),
    /// Load a movie poster through the image cache
    Poster {
        /// IMDb id or title
        movie: String,
        /// Screen the poster is loaded for
        #[arg(short, long, default_value = "main")]
        screen: String,
    },
}

#[derive(Args)]
struct ActorArgs {
    name: String,
    /// Genre substring, e.g. "drama"
    #[arg(short, long, default_value = "")]
    genre: String,
    #[arg(long)]
    from_year: Option<i32>,
    #[arg(long)]
    to_year: Option<i32>,
    /// Only movies rated 7.0 or higher
    #[arg(long)]
    high_rated: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("filmfinder={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }
    if let Some(api_key) = cli.api_key {
        config.omdb.api_key = api_key;
    }
    info!("Using database: {}", config.database.url);

    let database = Database::connect_and_migrate(&config.database).await?;
    let repository = Arc::new(MovieSeaOrmRepository::new(database.connection()));
    let api = Arc::new(OmdbClient::from_config(&config.omdb)?);
    let service = MovieService::new(api, repository);

    match cli.command {
        Command::Movie {
            title,
            year,
            ratings,
        } => {
            let mut filter = MovieFilter::by_title(title);
            filter.year = year;
            filter.include_ratings = ratings;
            print_movie(&service.lookup(&filter).await?);
        }
        Command::Search { term, year, page } => {
            let mut filter = MovieFilter::search(term).with_page(page);
            filter.year = year;
            let results = service.search(&filter).await?;
            if results.is_empty() {
                println!(
                    "No results{}",
                    results
                        .error
                        .as_deref()
                        .map(|e| format!(": {e}"))
                        .unwrap_or_default()
                );
            }
            for item in &results.results {
                println!("{}  {} ({})", item.imdb_id, item.title, item.year);
            }
            if !results.is_empty() {
                println!(
                    "Page {} of {} results{}",
                    results.page,
                    results.total_results,
                    if results.has_more() { ", more available" } else { "" }
                );
            }
        }
        Command::Save { imdb_id } => {
            let movie = service.save_by_id(&imdb_id).await?;
            println!("Saved {} ({})", movie.title, movie.imdb_id);
        }
        Command::Show { imdb_id } => {
            print_movie(&service.require_saved(&imdb_id).await?);
        }
        Command::Seed => {
            let count = service.seed_sample_movies().await?;
            println!("Stored {count} sample movies");
        }
        Command::Actor(args) => {
            let filter = ActorSearchFilter {
                genre: args.genre,
                from_year: args.from_year,
                to_year: args.to_year,
                high_rated_only: args.high_rated,
            };
            let movies = service.search_by_actor(&args.name, &filter).await?;
            if movies.is_empty() {
                println!("No stored movies with '{}'", args.name);
            }
            for movie in &movies {
                println!(
                    "{}  {} ({}) {:.1}",
                    movie.imdb_id, movie.title, movie.year, movie.imdb_rating
                );
            }
        }
        Command::Poster { movie, screen } => {
            let cache = Arc::new(ScopedImageCache::from_config(&config.image_cache)?);
            let movie = resolve_movie(&service, &movie).await?;
            let url = movie.poster_url().unwrap_or_default().to_string();

            for attempt in 1..=2 {
                match cache.load(&url, &screen).await {
                    Some(image) => println!(
                        "Attempt {attempt}: loaded {}x{} poster ({})",
                        image.width(),
                        image.height(),
                        format_memory(image.weight() as f64)
                    ),
                    None => println!("Attempt {attempt}: placeholder"),
                }
            }

            let stats = cache.stats().await;
            println!(
                "Cache: {} entries, {} of {}, {} hits, {} misses",
                stats.entries,
                format_memory(stats.used_bytes as f64),
                format_memory(stats.capacity_bytes as f64),
                stats.hits,
                stats.misses
            );

            cache.clear_screen(&screen).await;
        }
    }

    Ok(())
}

/// Stored movie first, then the API by id or title
async fn resolve_movie(service: &MovieService, key: &str) -> Result<Movie> {
    if let Some(movie) = service.get_saved(key).await? {
        return Ok(movie);
    }

    let looks_like_id = key
        .strip_prefix("tt")
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));

    let filter = if looks_like_id {
        MovieFilter::by_id(key)
    } else {
        MovieFilter::by_title(key)
    };
    Ok(service.lookup(&filter).await?)
}

fn print_movie(movie: &Movie) {
    println!("{} ({})  {}", movie.title, movie.year, movie.imdb_id);
    println!("{} | {} | {}", movie.rated, movie.runtime, movie.genres.join(", "));
    println!("Director: {}", movie.director);
    println!("Cast: {}", movie.actors.join(", "));
    println!("IMDb: {:.1}  Metascore: {}", movie.imdb_rating, movie.metascore);
    for rating in &movie.ratings {
        println!("  {}: {}", rating.source, rating.value);
    }
    if !movie.plot.is_empty() {
        println!();
        println!("{}", movie.plot);
    }
}
