use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use data_loader::{FileStoreConnector, UserId};
use rayon::prelude::*;
use server::{
    parse_user_id, EngineError, InterestProfile, RankedResult, RecommendConfig,
    RecommendationEngine,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// MovieRecs - content-based movie recommendations
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Recommend movies by genre/keyword similarity", long_about = None)]
struct Cli {
    /// Directory holding movies.dat and activity.dat
    #[arg(short, long, env = "MOVIE_RECS_DATA_DIR", default_value = "data/moviehub")]
    data_dir: PathBuf,

    /// Break similarity ties by popularity score
    #[arg(
        long,
        env = "MOVIE_RECS_RANK_BY_POPULARITY",
        default_value_t = true,
        action = ArgAction::Set
    )]
    rank_by_popularity: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: String,

        /// Number of recommendations to return [default: 10]
        #[arg(long)]
        limit: Option<usize>,

        /// Leave out movies the user already rated or liked
        #[arg(long)]
        filter_watched: bool,

        /// Show similarity and popularity for each recommendation
        #[arg(long)]
        explain: bool,

        /// Print the user's interest profile to stderr first
        #[arg(long)]
        debug: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find movies similar to a title
    Similar {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return [default: 10]
        #[arg(long)]
        limit: Option<usize>,

        /// Show similarity and popularity for each recommendation
        #[arg(long)]
        explain: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the interest profile derived from a user's activity
    Profile {
        /// User ID to display
        #[arg(long)]
        user_id: String,
    },

    /// Show which movie a title query resolves to
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Highest user id to sample from
        #[arg(long, default_value = "100")]
        max_user_id: UserId,
    },
}

type Engine = RecommendationEngine<FileStoreConnector>;

fn main() -> Result<()> {
    // Pick up MOVIE_RECS_* and RUST_LOG from a local .env, if any
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = RecommendConfig::default().with_rank_by_popularity(cli.rank_by_popularity);
    let engine = RecommendationEngine::with_config(FileStoreConnector::new(&cli.data_dir), config);
    info!("Using movie store at {}", cli.data_dir.display());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            filter_watched,
            explain,
            debug,
            json,
        } => handle_recommend(&engine, &user_id, limit, filter_watched, explain, debug, json)?,
        Commands::Similar {
            title,
            limit,
            explain,
            json,
        } => handle_similar(&engine, &title, limit, explain, json)?,
        Commands::Profile { user_id } => handle_profile(&engine, &user_id)?,
        Commands::Search { title } => handle_search(&engine, &title)?,
        Commands::Benchmark {
            requests,
            concurrent,
            max_user_id,
        } => handle_benchmark(&engine, requests, concurrent, max_user_id)?,
    }

    Ok(())
}

/// Turn engine errors into messages a person can act on
fn describe(err: EngineError) -> anyhow::Error {
    match err {
        EngineError::NoActivity { user_id } => anyhow!(
            "User {} has no ratings or likes yet; rate a few movies first",
            user_id
        ),
        EngineError::NotFound { query } => anyhow!("No movie title contains {:?}", query),
        EngineError::StoreUnavailable(source) => {
            anyhow::Error::new(source).context("Movie store is unavailable")
        }
        EngineError::InvalidInput(reason) => anyhow!("Invalid input: {}", reason),
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &Engine,
    user_id: &str,
    limit: Option<usize>,
    filter_watched: bool,
    explain: bool,
    debug: bool,
    json: bool,
) -> Result<()> {
    let user_id = parse_user_id(user_id).map_err(describe)?;

    if debug {
        let profile = engine.interest_profile(user_id).map_err(describe)?;
        eprintln!("DEBUG:USER_GENRES:{}", profile.genres.join(","));
        eprintln!("DEBUG:USER_KEYWORDS:{}", profile.keywords.join(","));
    }

    let recommendations = engine
        .recommend_for_scored(user_id, limit.unwrap_or(engine.config().default_limit), filter_watched)
        .map_err(describe)?;

    if json {
        print_json(&recommendations)
    } else {
        let header = format!("Top {} Recommended Movies for user {}:", recommendations.len(), user_id);
        print_recommendations(&header, &recommendations, explain);
        Ok(())
    }
}

/// Handle the 'similar' command
fn handle_similar(
    engine: &Engine,
    title: &str,
    limit: Option<usize>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(engine.config().default_limit);
    let recommendations = engine
        .recommend_similar_to_scored(title, limit)
        .map_err(describe)?;

    if json {
        print_json(&recommendations)
    } else {
        let header = format!("Top {} Recommended Similar Movies:", recommendations.len());
        print_recommendations(&header, &recommendations, explain);
        Ok(())
    }
}

/// Handle the 'profile' command
fn handle_profile(engine: &Engine, user_id: &str) -> Result<()> {
    let user_id = parse_user_id(user_id).map_err(describe)?;
    let profile = engine.interest_profile(user_id).map_err(describe)?;

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    print_profile(&profile);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(engine: &Engine, title: &str) -> Result<()> {
    let (movie, profile) = engine.lookup_title(title).map_err(describe)?;

    println!("{}", format!("Search result for '{}':", title).bold().blue());
    println!(
        "{}{}: {} (popularity {:.2})",
        "• ".green(),
        movie.id,
        movie.title,
        movie.popularity_score
    );
    print_profile(&profile);
    Ok(())
}

/// Handle the 'benchmark' command
///
/// Requests are independent, so they run in parallel on a dedicated pool;
/// each one opens its own store session.
fn handle_benchmark(
    engine: &Engine,
    requests: usize,
    concurrent: usize,
    max_user_id: UserId,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("requests must be at least 1"));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrent.max(1))
        .build()
        .context("Failed to build benchmark thread pool")?;

    // Generate a set of random user IDs between 1 and max_user_id
    let user_ids: Vec<UserId> = (0..requests)
        .map(|_| rand::random::<u32>() % max_user_id.max(1) + 1)
        .collect();

    let wall_clock = Instant::now();
    let outcomes: Vec<(Duration, bool)> = pool.install(|| {
        user_ids
            .par_iter()
            .map(|&user_id| {
                let start = Instant::now();
                let outcome = engine.recommend_for(user_id, engine.config().default_limit, true);
                (start.elapsed(), outcome.is_ok())
            })
            .collect()
    });
    let total_time = wall_clock.elapsed();

    let failures = outcomes.iter().filter(|(_, ok)| !ok).count();
    let mut timings: Vec<Duration> = outcomes.into_iter().map(|(elapsed, _)| elapsed).collect();
    timings.sort();

    let avg_latency = timings.iter().sum::<Duration>() / (timings.len() as u32);
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} without recommendations)", requests, failures);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_json(recommendations: &[RankedResult]) -> Result<()> {
    let out = serde_json::to_string_pretty(recommendations).context("Failed to encode results")?;
    println!("{}", out);
    Ok(())
}

fn print_profile(profile: &InterestProfile) {
    println!("{}Genres: {}", "• ".cyan(), profile.genres.join(", "));
    println!("{}Keywords: {}", "• ".cyan(), profile.keywords.join(", "));
}

/// Helper function to format and print recommendations
fn print_recommendations(header: &str, recommendations: &[RankedResult], explain: bool) {
    println!("{}", header.bold().cyan());
    for (i, rec) in recommendations.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).yellow(), rec.title);
        if explain {
            println!(
                "   similarity {:.3}, popularity {:.2} (movie {})",
                rec.similarity, rec.popularity_score, rec.movie_id
            );
        }
    }
}
