//! One pass over all discovered poster files: match, assess, upload.
//!
//! Two execution modes share the same per-item pipeline: strictly
//! sequential, or a bounded rayon worker pool. In the parallel mode the
//! index and cache are read-only while workers run; each worker returns its
//! cache update and the coordinator applies them after collection, so the
//! shared map is only ever mutated from one thread.

use log::{info, warn};
use rayon::prelude::*;
use std::fmt;
use std::time::Duration;

use crate::catalog::CollectionIndex;
use crate::config::Config;
use crate::detect;
use crate::discovery::PosterFile;
use crate::persistence::{CacheEntry, PosterCache};
use crate::remote::MediaServer;
use crate::upload;

/// Aggregate counts for one sync pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    /// Posters actually uploaded
    pub updated: usize,

    /// Already in sync, failed to upload, or failed to process
    pub skipped: usize,

    /// Files with no matching remote collection
    pub not_found: usize,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated: {}, Skipped: {}, Not found: {}",
            self.updated, self.skipped, self.not_found
        )
    }
}

enum ItemStatus {
    Updated,
    Skipped,
    NotFound,
}

struct ItemOutcome {
    status: ItemStatus,
    cache_update: Option<(String, CacheEntry)>,
}

fn process_item<S: MediaServer>(
    server: &S,
    config: &Config,
    index: &CollectionIndex,
    cache: &PosterCache,
    file: &PosterFile,
    base_delay: Duration,
) -> ItemOutcome {
    info!(
        "Processing: {} -> collection: '{}'",
        file.file_name, file.collection_name
    );

    let Some(collection) = index.lookup(&file.collection_name, config.normalize_hyphens) else {
        warn!("Collection not found for image: {}", file.file_name);
        return ItemOutcome {
            status: ItemStatus::NotFound,
            cache_update: None,
        };
    };

    info!(
        "Found collection '{}' (rating key {}) in library '{}' (section {})",
        collection.title, collection.rating_key, collection.library_title, collection.library_key
    );

    let cached = cache.get(&collection.rating_key);
    let assessment = detect::assess(
        server,
        collection,
        &file.path,
        cached,
        config.reapply_posters,
    );

    let cache_update = assessment
        .cache_update
        .map(|entry| (collection.rating_key.clone(), entry));

    if !assessment.upload_required {
        return ItemOutcome {
            status: ItemStatus::Skipped,
            cache_update,
        };
    }

    if !upload::upload_with_retry(server, collection, &file.path, config.max_retries, base_delay) {
        return ItemOutcome {
            status: ItemStatus::Skipped,
            cache_update,
        };
    }

    // Record what the server now reports as selected so the next run can
    // short-circuit without a download. A failed re-read stores an empty
    // key, which forces a verify next time.
    let cache_update = assessment.local_hash.map(|local_hash| {
        let poster_key = match server.selected_poster(collection) {
            Ok(key) => key.unwrap_or_default(),
            Err(e) => {
                warn!(
                    "Error getting current poster for collection {}: {}",
                    collection.title, e
                );
                String::new()
            }
        };
        (
            collection.rating_key.clone(),
            CacheEntry {
                local_hash,
                poster_key,
            },
        )
    });

    ItemOutcome {
        status: ItemStatus::Updated,
        cache_update,
    }
}

/// Process every discovered file and fold the outcomes into the cache and a
/// summary. The cache is mutated only after all per-item work has finished.
pub fn run_sync<S: MediaServer + Sync>(
    server: &S,
    config: &Config,
    index: &CollectionIndex,
    cache: &mut PosterCache,
    files: &[PosterFile],
) -> SyncSummary {
    run_sync_with_backoff(server, config, index, cache, files, upload::DEFAULT_BASE_DELAY)
}

pub(crate) fn run_sync_with_backoff<S: MediaServer + Sync>(
    server: &S,
    config: &Config,
    index: &CollectionIndex,
    cache: &mut PosterCache,
    files: &[PosterFile],
    base_delay: Duration,
) -> SyncSummary {
    let workers = config.worker_count();

    let outcomes: Vec<ItemOutcome> = {
        let cache_view: &PosterCache = cache;
        if workers <= 1 {
            files
                .iter()
                .map(|file| process_item(server, config, index, cache_view, file, base_delay))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .expect("Failed to build worker pool");
            pool.install(|| {
                files
                    .par_iter()
                    .map(|file| process_item(server, config, index, cache_view, file, base_delay))
                    .collect()
            })
        }
    };

    let mut summary = SyncSummary::default();
    for outcome in outcomes {
        match outcome.status {
            ItemStatus::Updated => summary.updated += 1,
            ItemStatus::Skipped => summary.skipped += 1,
            ItemStatus::NotFound => summary.not_found += 1,
        }
        if let Some((rating_key, entry)) = outcome.cache_update {
            cache.insert(rating_key, entry);
        }
    }

    summary
}

// -- Tests --
