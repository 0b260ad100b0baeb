//! Core functionality for syncing local artwork to media-server collections.
//!
//! This library provides the pieces of the one-shot sync job:
//! - Poster folder scanning and collection-name derivation
//! - Case/separator-insensitive name matching against a remote catalog index
//! - Hash-based change detection with a sidecar state cache
//! - Poster upload with bounded retry

// -- External Dependencies --

use log::{info, warn};

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use sync::SyncSummary;

// -- Public Modules --
pub mod catalog;
pub mod config;
pub mod detect;
pub mod discovery;
pub mod hashing;
pub mod logging;
pub mod naming;
pub mod persistence;
pub mod remote;
pub mod sync;
pub mod upload;

// -- Test Modules --
#[cfg(test)]
pub mod test_utils;

use remote::{ClientIdentity, PlexClient};

/// Main entry point for the poster sync process
pub struct PosterSync {
    config: Config,
    server: PlexClient,
}

impl PosterSync {
    /// Validate configuration and connect to the media server.
    ///
    /// This is the fatal-startup boundary: missing settings or an
    /// unreachable server abort the run here, before any work starts.
    pub fn new(config: Config, identity: ClientIdentity) -> Result<Self> {
        config.validate()?;

        info!("Connecting to media server at {}", config.server_url);
        let server = PlexClient::connect(&config, &identity)?;
        info!("Successfully connected to media server");

        Ok(Self { config, server })
    }

    /// Run one full sync pass: index remote collections, scan the poster
    /// folder, reconcile each file, and persist the updated cache.
    pub fn run(&self) -> SyncSummary {
        info!("Starting poster sync process");
        info!("Poster folder: {}", self.config.poster_dir.display());
        info!("Reapply posters: {}", self.config.reapply_posters);
        if self.config.reapply_posters {
            info!("Reapply posters is enabled. Posters will be reapplied for all collections.");
        }
        info!("Normalize hyphens: {}", self.config.normalize_hyphens);
        info!(
            "Using {} worker thread(s) for processing",
            self.config.worker_count()
        );

        let index = catalog::build_index(&self.server, self.config.normalize_hyphens);

        let mut cache = persistence::PosterCache::load(&self.config.cache_file());

        info!(
            "Scanning poster folder: {}",
            self.config.poster_dir.display()
        );
        let files = discovery::scan_posters(&self.config.poster_dir);
        if files.is_empty() {
            warn!("No image files found in poster folder");
            return SyncSummary::default();
        }
        info!("Found {} image file(s)", files.len());

        let summary = sync::run_sync(&self.server, &self.config, &index, &mut cache, &files);

        // Persisted once, whatever the per-item outcomes were.
        cache.save();

        info!("Poster sync completed");
        info!("Summary: {}", summary);

        summary
    }
}
