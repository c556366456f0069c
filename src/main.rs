use clap::{Parser, Subcommand, ValueEnum};
use movie_catalog::{
    CatalogConfig, DiscoverMoviesRequest, FileDiscoverCache, Movie, MovieCatalog,
    MovieCatalogError, MovieId, PageResult, PersonId, parse_timeout,
};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "movie-catalog", version, about = "Browse the movie database")]
struct Cli {
    /// API key sent with every request (overrides TMDB_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// API host (overrides TMDB_API_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Directory for cached movie lists (overrides MOVIE_CATALOG_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Request timeout in seconds (overrides MOVIE_CATALOG_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = parse_timeout_arg)]
    timeout_secs: Option<Duration>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of a movie list
    Discover {
        #[arg(value_enum)]
        list: MovieList,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show the details of a movie
    Detail { id: u64 },
    /// Show the cast and crew of a movie
    Cast { id: u64 },
    /// Search movies by title
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show the details of a person
    Person { id: u64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum MovieList {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
}

impl From<MovieList> for DiscoverMoviesRequest {
    fn from(list: MovieList) -> Self {
        match list {
            MovieList::NowPlaying => DiscoverMoviesRequest::NowPlaying,
            MovieList::Popular => DiscoverMoviesRequest::Popular,
            MovieList::TopRated => DiscoverMoviesRequest::TopRated,
            MovieList::Upcoming => DiscoverMoviesRequest::Upcoming,
        }
    }
}

fn parse_timeout_arg(value: &str) -> Result<Duration, String> {
    parse_timeout("--timeout-secs", value).map_err(|e| e.to_string())
}

fn load_config(cli: &Cli) -> Result<CatalogConfig, MovieCatalogError> {
    let mut config = CatalogConfig::from_env()?;

    if let Some(api_key) = &cli.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(host) = &cli.host {
        config.environment = config.environment.with_host(host.clone());
    }
    if let Some(cache_dir) = &cli.cache_dir {
        config.cache_dir = Some(cache_dir.clone());
    }
    if let Some(timeout) = cli.timeout_secs {
        config.request_timeout = timeout;
    }

    Ok(config)
}

fn print_movies(page: &PageResult<Movie>) {
    if page.is_empty() {
        println!("No movies found.");
        return;
    }

    for movie in &page.results {
        let year = movie
            .release_date
            .map(|date| date.format("%Y").to_string())
            .unwrap_or_else(|| "----".to_string());
        println!(
            "[{}] {} ({}) - {:.1}/10",
            movie.id, movie.title, year, movie.vote_average
        );
    }

    println!(
        "\nPage {} of {} ({} result(s))",
        page.page, page.total_pages, page.total_results
    );
}

async fn run(cli: Cli) -> Result<(), MovieCatalogError> {
    let config = load_config(&cli)?;
    let cache = match &config.cache_dir {
        Some(dir) => FileDiscoverCache::at(dir)?,
        None => FileDiscoverCache::open("discover")?,
    };
    tracing::debug!(cache_dir = %cache.cache_dir().display(), "using discover cache");

    let cancellation = CancellationToken::new();
    let catalog = MovieCatalog::from_config(&config, cache, cancellation.clone())?;

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancellation.cancel();
        }
    });

    match cli.command {
        Command::Discover { list, page } => {
            let request = DiscoverMoviesRequest::from(list);
            println!("=== {} (page {}) ===\n", request, page);
            print_movies(&catalog.discover_movies(request, page).await?);
        }
        Command::Search { query, page } => {
            println!("=== Search: '{}' (page {}) ===\n", query, page);
            print_movies(&catalog.search(&query, page).await?);
        }
        Command::Detail { id } => {
            let detail = catalog.fetch_detail(MovieId(id)).await?;
            println!("=== {} ===\n", detail.title);
            if !detail.tagline.is_empty() {
                println!("  {}\n", detail.tagline);
            }
            if let Some(date) = detail.release_date {
                println!("Released: {}", date);
            }
            if let Some(runtime) = detail.runtime {
                println!("Runtime: {} min", runtime);
            }
            if let Some(genres) = &detail.genres {
                let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
                println!("Genres: {}", names.join(", "));
            }
            println!(
                "Rating: {:.1}/10 ({} votes)",
                detail.vote_average, detail.vote_count
            );
            if let Some(keywords) = &detail.keywords {
                let names: Vec<&str> = keywords.keywords.iter().map(|k| k.name.as_str()).collect();
                println!("Keywords: {}", names.join(", "));
            }
            println!("\n{}", detail.overview);
        }
        Command::Cast { id } => {
            let credits = catalog.fetch_cast(MovieId(id)).await?;
            println!("=== Cast ===\n");
            for person in &credits.cast {
                match &person.character {
                    Some(character) => println!("  {} as {}", person.name, character),
                    None => println!("  {}", person.name),
                }
            }
            println!("\n=== Crew ===\n");
            for person in &credits.crew {
                match &person.job {
                    Some(job) => println!("  {} ({})", person.name, job),
                    None => println!("  {}", person.name),
                }
            }
        }
        Command::Person { id } => {
            let person = catalog.fetch_person_details(PersonId(id)).await?;
            println!("=== {} ===\n", person.name);
            if let Some(department) = &person.known_for_department {
                println!("Known for: {}", department);
            }
            if !person.also_known_as.is_empty() {
                println!("Also known as: {}", person.also_known_as.join(", "));
            }
            println!("Profile images: {}", person.images.profiles.len());
            if !person.biography.is_empty() {
                println!("\n{}", person.biography);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
