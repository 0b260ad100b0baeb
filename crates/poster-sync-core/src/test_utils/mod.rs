//! In-memory media server for exercising the pipeline without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::remote::{CollectionHandle, Library, MediaServer};

/// Scriptable fake implementing [`MediaServer`].
///
/// Mutable run-time state (selected posters, upload log) sits behind
/// mutexes so the fake can back parallel orchestrator tests.
#[derive(Default)]
pub struct FakeServer {
    pub libraries: Vec<Library>,
    /// library key -> collections in that library
    pub collections: HashMap<String, Vec<CollectionHandle>>,
    /// poster key -> poster bytes
    pub poster_bytes: HashMap<String, Vec<u8>>,
    /// rating key -> currently selected poster key
    pub selected: Mutex<HashMap<String, String>>,
    /// (rating key, uploaded bytes), in completion order
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
    /// library keys whose collection listing errors
    pub failing_libraries: Vec<String>,
    pub fail_libraries: bool,
    pub fail_selected_lookup: bool,
    pub fail_uploads: bool,
}

impl FakeServer {
    pub fn add_library(&mut self, key: &str, title: &str) {
        self.libraries.push(Library {
            key: key.to_string(),
            title: title.to_string(),
        });
    }

    pub fn add_collection(&mut self, library_key: &str, rating_key: &str, title: &str) {
        let library = self
            .libraries
            .iter()
            .find(|l| l.key == library_key)
            .expect("add_library first");
        self.collections
            .entry(library_key.to_string())
            .or_default()
            .push(CollectionHandle {
                rating_key: rating_key.to_string(),
                title: title.to_string(),
                library_title: library.title.clone(),
                library_key: library.key.clone(),
            });
    }

    /// One library ("Movies") with one collection; returns the handle
    pub fn with_collection(rating_key: &str, title: &str) -> (Self, CollectionHandle) {
        let mut server = Self::default();
        server.add_library("1", "Movies");
        server.add_collection("1", rating_key, title);
        let handle = server.collections["1"][0].clone();
        (server, handle)
    }

    /// Install a poster as the selected one, with downloadable bytes
    pub fn set_selected_poster(&mut self, rating_key: &str, poster_key: &str, bytes: &[u8]) {
        self.selected
            .lock()
            .unwrap()
            .insert(rating_key.to_string(), poster_key.to_string());
        self.poster_bytes
            .insert(poster_key.to_string(), bytes.to_vec());
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn last_upload(&self) -> Option<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().last().cloned()
    }

    pub fn selected_key(&self, rating_key: &str) -> Option<String> {
        self.selected.lock().unwrap().get(rating_key).cloned()
    }
}

impl MediaServer for FakeServer {
    fn libraries(&self) -> Result<Vec<Library>> {
        if self.fail_libraries {
            return Err(Error::Connection("library listing unavailable".to_string()));
        }
        Ok(self.libraries.clone())
    }

    fn collections(&self, library: &Library) -> Result<Vec<CollectionHandle>> {
        if self.failing_libraries.contains(&library.key) {
            return Err(Error::Connection(format!(
                "collections unavailable for {}",
                library.title
            )));
        }
        Ok(self
            .collections
            .get(&library.key)
            .cloned()
            .unwrap_or_default())
    }

    fn selected_poster(&self, collection: &CollectionHandle) -> Result<Option<String>> {
        if self.fail_selected_lookup {
            return Err(Error::Connection("poster listing unavailable".to_string()));
        }
        Ok(self
            .selected
            .lock()
            .unwrap()
            .get(&collection.rating_key)
            .cloned())
    }

    fn download_poster(&self, poster_key: &str) -> Result<Vec<u8>> {
        self.poster_bytes
            .get(poster_key)
            .cloned()
            .ok_or_else(|| Error::Connection(format!("no poster bytes for {}", poster_key)))
    }

    fn upload_poster(&self, collection: &CollectionHandle, bytes: &[u8]) -> Result<()> {
        let attempt = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push((collection.rating_key.clone(), bytes.to_vec()));
            uploads.len()
        };
        if self.fail_uploads {
            return Err(Error::Connection("upload failed".to_string()));
        }
        // A successful upload becomes the newly selected poster under a
        // fresh server-assigned key.
        let poster_key = format!(
            "/library/metadata/{}/thumb/{}",
            collection.rating_key, attempt
        );
        self.selected
            .lock()
            .unwrap()
            .insert(collection.rating_key.clone(), poster_key);
        Ok(())
    }
}
