//! Decides whether a local image needs to be uploaded as a collection's
//! poster. The cache only ever short-circuits the remote download; whenever
//! it disagrees with the remote state, the poster bytes themselves are the
//! authority.

use log::{debug, info, warn};
use std::path::Path;

use crate::hashing::{sha256_bytes, sha256_file};
use crate::persistence::CacheEntry;
use crate::remote::{CollectionHandle, MediaServer};

/// Outcome of comparing a local image against a collection's current poster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Whether the local file must be uploaded
    pub upload_required: bool,

    /// Hex SHA-256 of the local file, when it could be computed
    pub local_hash: Option<String>,

    /// Cache refresh to apply, for skip paths that re-verified remote state
    pub cache_update: Option<CacheEntry>,
}

impl Assessment {
    fn upload(local_hash: Option<String>) -> Self {
        Self {
            upload_required: true,
            local_hash,
            cache_update: None,
        }
    }
}

/// Decide whether `image_path` must be uploaded as the poster of
/// `collection`.
///
/// With `reapply` set, the answer is always yes and no hashing happens.
/// Otherwise the local hash is compared against the cached state and, when
/// the cache cannot settle it, against a download of the remote poster. A
/// local file that cannot be hashed fails open toward uploading.
pub fn assess<S: MediaServer>(
    server: &S,
    collection: &CollectionHandle,
    image_path: &Path,
    cached: Option<&CacheEntry>,
    reapply: bool,
) -> Assessment {
    if reapply {
        debug!(
            "Reapply is enabled - forcing update for '{}'",
            collection.title
        );
        return Assessment::upload(None);
    }

    let local_hash = match sha256_file(image_path) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(
                "Error calculating hash for {}: {}",
                image_path.display(),
                e
            );
            debug!("Failed to calculate local hash - update needed");
            return Assessment::upload(None);
        }
    };

    let current_poster_key = match server.selected_poster(collection) {
        Ok(key) => key,
        Err(e) => {
            warn!(
                "Error getting current poster for collection {}: {}",
                collection.title, e
            );
            None
        }
    };

    if let Some(entry) = cached.filter(|entry| entry.local_hash == local_hash) {
        if current_poster_key.as_deref() == Some(entry.poster_key.as_str()) {
            info!(
                "Poster for collection '{}' is already set to this image (cache hit), skipping",
                collection.title
            );
            return Assessment {
                upload_required: false,
                local_hash: Some(local_hash),
                cache_update: None,
            };
        }
        // The remote poster identity moved under us without the local file
        // changing. Could be a benign server-side re-key; the bytes decide.
        debug!(
            "Remote poster key changed for '{}', verifying poster bytes",
            collection.title
        );
    }

    let Some(poster_key) = current_poster_key else {
        debug!(
            "No current poster found for collection '{}' - update needed",
            collection.title
        );
        return Assessment::upload(Some(local_hash));
    };

    match remote_poster_hash(server, collection, &poster_key) {
        Some(remote_hash) if remote_hash == local_hash => {
            info!(
                "Poster for collection '{}' is already set to this image, skipping",
                collection.title
            );
            Assessment {
                upload_required: false,
                local_hash: Some(local_hash.clone()),
                cache_update: Some(CacheEntry {
                    local_hash,
                    poster_key,
                }),
            }
        }
        Some(_) => {
            debug!("Poster hashes differ for '{}' - update needed", collection.title);
            Assessment::upload(Some(local_hash))
        }
        // No hash obtained: fail open toward re-upload.
        None => Assessment::upload(Some(local_hash)),
    }
}

fn remote_poster_hash<S: MediaServer>(
    server: &S,
    collection: &CollectionHandle,
    poster_key: &str,
) -> Option<String> {
    match server.download_poster(poster_key) {
        Ok(bytes) => Some(sha256_bytes(&bytes)),
        Err(e) => {
            warn!(
                "Failed to download poster for '{}': {}",
                collection.title, e
            );
            None
        }
    }
}

// -- Tests --
