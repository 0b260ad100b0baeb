use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use poster_sync_core::remote::ClientIdentity;
use poster_sync_core::{logging, Config, LogLevel, PosterSync};

#[derive(Parser)]
#[command(name = "poster-sync")]
#[command(about = "Sync a folder of images to matching media-server collection posters")]
#[command(version)]
struct Cli {
    /// Base URL of the media server
    #[arg(long, env = "PLEX_URL")]
    server_url: String,

    /// Authentication token for the media server
    #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
    token: String,

    /// Folder of poster images; each file stem names a collection
    #[arg(long, env = "POSTER_FOLDER", default_value = "/posters")]
    poster_dir: PathBuf,

    /// Re-upload every poster regardless of current remote state
    #[arg(long, env = "REAPPLY_POSTERS")]
    reapply_posters: bool,

    /// Treat runs of hyphens and spaces as equivalent when matching names
    #[arg(
        long,
        env = "NORMALIZE_HYPHENS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    normalize_hyphens: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Maximum upload attempts per collection
    #[arg(long, env = "MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Worker threads for processing (0 = one per CPU, 1 = sequential)
    #[arg(long, env = "MAX_WORKERS", default_value_t = 4)]
    workers: usize,

    /// Console log level (error, warn, info, debug, trace)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: LogLevel,

    /// Optional log file; always captures debug output
    #[arg(long, env = "LOG_PATH")]
    log_path: Option<PathBuf>,

    /// Cache file location (default: .poster_cache.json in the poster folder)
    #[arg(long, env = "CACHE_FILE")]
    cache_path: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    // Pick up a local .env before clap reads its env fallbacks
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    logging::init_logger(cli.log_level.to_filter(), cli.log_path.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    info!("Starting collection poster sync");

    let config = Config {
        server_url: cli.server_url,
        token: cli.token,
        poster_dir: cli.poster_dir,
        reapply_posters: cli.reapply_posters,
        normalize_hyphens: cli.normalize_hyphens,
        request_timeout: Duration::from_secs(cli.request_timeout),
        max_retries: cli.max_retries,
        workers: cli.workers,
        log_level: cli.log_level,
        log_path: cli.log_path,
        cache_path: cli.cache_path,
    };

    let sync = match PosterSync::new(config, ClientIdentity::default()) {
        Ok(sync) => sync,
        Err(e) => {
            error!("Fatal error: {}", e);
            return Err(e).context("failed to start poster sync");
        }
    };
    sync.run();

    Ok(())
}
