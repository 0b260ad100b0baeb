use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions accepted as poster artwork (case-insensitive)
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "tbn"];

/// A local image file and the collection name derived from it
#[derive(Debug, Clone)]
pub struct PosterFile {
    /// File name including extension
    pub file_name: String,

    /// Full path to the image file
    pub path: PathBuf,

    /// Collection name: the file name with its extension stripped
    pub collection_name: String,
}

/// Returns if the given path has an accepted poster extension
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List eligible image files at the top level of the poster folder.
///
/// A missing folder yields an empty result with a warning; directories and
/// non-regular entries are skipped. Listing order is whatever the platform
/// yields and must not be relied on.
pub fn scan_posters(dir: &Path) -> Vec<PosterFile> {
    let mut posters = Vec::new();

    if !dir.exists() {
        warn!("Poster folder does not exist: {}", dir.display());
        return posters;
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if !has_image_extension(path) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let collection_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(
            "Found image file: {} -> collection name: '{}'",
            file_name, collection_name
        );
        posters.push(PosterFile {
            file_name,
            path: path.to_path_buf(),
            collection_name,
        });
    }

    posters
}

// -- Tests --
