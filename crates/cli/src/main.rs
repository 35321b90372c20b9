use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::Dataset;
use pipeline::{
    RatingMode, Recommendation, Recommender, RecommenderConfig, SeededSampler,
    DEFAULT_SAMPLE_SIZE, DEFAULT_TOP_N,
};
use server::ServerConfig;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// ReelRecs - popular movies by genre
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Recommend popular movies for a genre", long_about = None)]
struct Cli {
    /// Path to movies.csv (movieId,title,genres)
    #[arg(long, env = "REEL_RECS_MOVIES", default_value = "data/movies.csv")]
    movies: PathBuf,

    /// Path to ratings.csv (userId,movieId,rating)
    #[arg(long, env = "REEL_RECS_RATINGS", default_value = "data/ratings.csv")]
    ratings: PathBuf,

    #[command(flatten)]
    policy: PolicyArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Knobs shared by every command that runs the pipeline
#[derive(Args)]
struct PolicyArgs {
    /// Size of the most-rated candidate pool
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Number of movies to recommend
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,

    /// Rating shown next to each title: "mean" or "row-sample"
    #[arg(long, default_value_t = RatingMode::Mean)]
    rating_mode: RatingMode,
}

impl PolicyArgs {
    fn to_config(&self) -> RecommenderConfig {
        RecommenderConfig {
            top_n: self.top_n,
            sample_size: self.sample_size,
            rating_mode: self.rating_mode,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to listen on
        #[arg(long, env = "REEL_RECS_BIND", default_value = server::config::DEFAULT_BIND_ADDR)]
        bind: SocketAddr,

        /// Give up on loading the datasets for a request after this many seconds
        #[arg(long, default_value = "30")]
        load_timeout_secs: u64,
    },

    /// Recommend movies for a genre
    Recommend {
        /// Genre to match (case-insensitive substring of the tag string)
        #[arg(long)]
        genre: String,

        /// Seed the final draw for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the ranked candidate pool for a genre
    Candidates {
        /// Genre to match (case-insensitive substring of the tag string)
        #[arg(long)]
        genre: String,

        /// Number of candidates to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List genre tags and how many movies carry each
    Genres,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.policy.to_config();

    match cli.command {
        Commands::Serve {
            bind,
            load_timeout_secs,
        } => {
            let server_config = ServerConfig::new(cli.movies, cli.ratings)
                .with_bind_addr(bind)
                .with_load_timeout(Duration::from_secs(load_timeout_secs))
                .with_recommender(config);
            server::serve(server_config).await?
        }
        Commands::Recommend { genre, seed } => {
            let dataset = load_dataset(&cli.movies, &cli.ratings)?;
            handle_recommend(&dataset, config, &genre, seed)?
        }
        Commands::Candidates { genre, limit } => {
            let dataset = load_dataset(&cli.movies, &cli.ratings)?;
            handle_candidates(&dataset, config, &genre, limit)?
        }
        Commands::Genres => {
            let dataset = load_dataset(&cli.movies, &cli.ratings)?;
            handle_genres(&dataset)
        }
    }

    Ok(())
}

fn load_dataset(movies: &Path, ratings: &Path) -> Result<Dataset> {
    println!("Loading {} and {}...", movies.display(), ratings.display());
    let start = Instant::now();
    let dataset = Dataset::load_from_files(movies, ratings)
        .context("Failed to load movie dataset")?;
    let (movie_count, rating_count) = dataset.counts();
    println!(
        "{} Loaded {} movies and {} ratings in {:?}",
        "✓".green(),
        movie_count,
        rating_count,
        start.elapsed()
    );
    Ok(dataset)
}

/// Handle the 'recommend' command
fn handle_recommend(
    dataset: &Dataset,
    config: RecommenderConfig,
    genre: &str,
    seed: Option<u64>,
) -> Result<()> {
    let recommender = match seed {
        Some(seed) => Recommender::with_sampler(config, SeededSampler::new(seed)),
        None => Recommender::new(config),
    };

    let recommendations = recommender.recommend_from(dataset, genre)?;
    print_recommendations(genre, &recommendations, config.rating_mode);
    Ok(())
}

/// Handle the 'candidates' command
fn handle_candidates(
    dataset: &Dataset,
    config: RecommenderConfig,
    genre: &str,
    limit: usize,
) -> Result<()> {
    let candidates = Recommender::new(config).candidates(&dataset.movies, &dataset.ratings, genre)?;

    println!(
        "{}",
        format!("Candidate pool for '{}' ({} movies):", genre, candidates.len()).bold().blue()
    );
    for (i, candidate) in candidates.iter().take(limit).enumerate() {
        println!(
            "{:>3}. {} [{}] mean {:.2} ({} ratings)",
            (i + 1).to_string().green(),
            candidate.title,
            candidate.movie_id,
            candidate.mean_rating,
            candidate.rating_count
        );
    }
    if candidates.len() > limit {
        println!("   ... {} more", candidates.len() - limit);
    }
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(dataset: &Dataset) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for movie in &dataset.movies {
        for tag in movie.genre_tags() {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    println!("{}", "Genres:".bold().blue());
    for (genre, count) in counts {
        println!("{}{}: {} movies", "• ".cyan(), genre, count);
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(genre: &str, recommendations: &[Recommendation], mode: RatingMode) {
    if recommendations.is_empty() {
        println!("{}", format!("No recommendations for '{}'", genre).yellow());
        return;
    }

    println!("{}", format!("Recommended {} movies:", genre).bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Rating ({}): {:.2}",
            (i + 1).to_string().green(),
            rec.title,
            mode,
            rec.rating
        );
    }
}
