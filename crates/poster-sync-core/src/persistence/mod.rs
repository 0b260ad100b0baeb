//! Poster state cache: a sidecar JSON file mapping collection rating keys to
//! the last-known local file hash and remote poster identity. Purely an
//! acceleration structure; any load or save failure degrades to running
//! without it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;


/// Last state observed for one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Hex SHA-256 of the local image file
    pub local_hash: String,

    /// Opaque key of the remote poster selected when the entry was written
    pub poster_key: String,
}

/// In-memory cache with its on-disk location
#[derive(Debug)]
pub struct PosterCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl PosterCache {
    /// Read the cache from disk. A missing file is an empty cache; a
    /// read or parse failure is logged and treated as empty, never fatal.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, CacheEntry>>(&contents) {
                Ok(entries) => {
                    debug!("Loaded cache for {} collection(s)", entries.len());
                    entries
                }
                Err(e) => {
                    warn!("Error parsing cache file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("Error loading cache file {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    pub fn get(&self, rating_key: &str) -> Option<&CacheEntry> {
        self.entries.get(rating_key)
    }

    pub fn insert(&mut self, rating_key: String, entry: CacheEntry) {
        self.entries.insert(rating_key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the cache back to disk, creating the containing directory if
    /// needed. A write failure is logged and absorbed; remote side effects
    /// from the run are not rolled back.
    pub fn save(&self) {
        match self.try_save() {
            Ok(()) => debug!("Saved cache for {} collection(s)", self.entries.len()),
            Err(e) => warn!("Error saving cache file {}: {}", self.path.display(), e),
        }
    }

    fn try_save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
