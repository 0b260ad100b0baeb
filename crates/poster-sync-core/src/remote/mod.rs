//! Call surface against the remote media server.
//!
//! All pipeline stages go through the [`MediaServer`] trait so the change
//! detector, uploader, and orchestrator can be exercised against an
//! in-memory fake. [`PlexClient`] is the production implementation.

mod plex;
mod wire;

pub use plex::{ClientIdentity, PlexClient};

use crate::error::Result;

/// A library section on the remote server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    /// Opaque section key
    pub key: String,

    /// Display title
    pub title: String,
}

/// Reference to a remote collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    /// Opaque per-entity identifier
    pub rating_key: String,

    /// Display title, as the server reports it
    pub title: String,

    /// Title of the owning library section
    pub library_title: String,

    /// Key of the owning library section
    pub library_key: String,
}

/// Operations this tool consumes from the media server
pub trait MediaServer {
    /// Enumerate all library sections
    fn libraries(&self) -> Result<Vec<Library>>;

    /// Enumerate the collections within one library section
    fn collections(&self, library: &Library) -> Result<Vec<CollectionHandle>>;

    /// Key of the poster currently flagged selected for a collection, if any
    fn selected_poster(&self, collection: &CollectionHandle) -> Result<Option<String>>;

    /// Fetch the bytes of a poster by its opaque key
    fn download_poster(&self, poster_key: &str) -> Result<Vec<u8>>;

    /// Submit new poster bytes for a collection
    fn upload_poster(&self, collection: &CollectionHandle, bytes: &[u8]) -> Result<()>;
}
