use log::{debug, error, info, warn};
use std::collections::HashMap;

use crate::naming::normalize_name;
use crate::remote::{CollectionHandle, MediaServer};

/// One-shot index of remote collections keyed by normalized title.
///
/// Built exactly once per run; collections created or renamed afterwards are
/// invisible to that run. Read-only during processing.
#[derive(Debug, Default)]
pub struct CollectionIndex {
    entries: HashMap<String, CollectionHandle>,
    collections_indexed: usize,
    library_count: usize,
}

impl CollectionIndex {
    /// Look up a collection by a raw name, normalizing it the same way the
    /// index keys were normalized
    pub fn lookup(&self, name: &str, hyphens_as_spaces: bool) -> Option<&CollectionHandle> {
        self.entries.get(&normalize_name(name, hyphens_as_spaces))
    }

    /// Distinct normalized names in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total collections seen during indexing, collisions included
    pub fn collections_indexed(&self) -> usize {
        self.collections_indexed
    }

    /// Libraries enumerated during indexing
    pub fn library_count(&self) -> usize {
        self.library_count
    }
}

/// Enumerate all libraries and their collections into a lookup index.
///
/// A failure listing one library's collections skips that library and keeps
/// indexing the rest. If two collections normalize to the same key, the
/// later one wins. A failure enumerating the libraries themselves yields an
/// empty index; the run continues and every file reports not-found.
pub fn build_index<S: MediaServer>(server: &S, hyphens_as_spaces: bool) -> CollectionIndex {
    info!("Building collection index...");
    let mut index = CollectionIndex::default();

    let libraries = match server.libraries() {
        Ok(libraries) => libraries,
        Err(e) => {
            error!("Error building collection index: {}", e);
            return index;
        }
    };
    index.library_count = libraries.len();

    for library in &libraries {
        let collections = match server.collections(library) {
            Ok(collections) => collections,
            Err(e) => {
                warn!(
                    "Error accessing collections in library {}: {}",
                    library.title, e
                );
                continue;
            }
        };

        for collection in collections {
            let key = normalize_name(&collection.title, hyphens_as_spaces);
            if let Some(previous) = index.entries.insert(key, collection) {
                debug!(
                    "Duplicate normalized collection name, replacing '{}'",
                    previous.title
                );
            }
            index.collections_indexed += 1;
        }
    }

    info!(
        "Indexed {} collection(s) across {} library/libraries",
        index.collections_indexed, index.library_count
    );

    index
}

// -- Tests --
