use log::{debug, error, info, warn};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::remote::{CollectionHandle, MediaServer};

/// Delay before the second attempt; doubles on each further retry
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Submit the file as the collection's new poster, retrying on failure.
///
/// The file's existence is re-checked immediately before the first attempt;
/// the scanner saw it earlier but it may have vanished since. Failures other
/// than the last attempt back off exponentially. A final failure is reported
/// and absorbed so the run can continue with other items.
pub fn upload_with_retry<S: MediaServer>(
    server: &S,
    collection: &CollectionHandle,
    image_path: &Path,
    max_retries: u32,
    base_delay: Duration,
) -> bool {
    if !image_path.exists() {
        error!("Image file does not exist: {}", image_path.display());
        return false;
    }

    for attempt in 0..max_retries {
        debug!(
            "Uploading poster for collection '{}' (attempt {}/{})",
            collection.title,
            attempt + 1,
            max_retries
        );

        let result = std::fs::read(image_path)
            .map_err(crate::error::Error::from)
            .and_then(|bytes| server.upload_poster(collection, &bytes));

        match result {
            Ok(()) => {
                info!(
                    "Successfully uploaded poster for collection '{}'",
                    collection.title
                );
                return true;
            }
            Err(e) if attempt + 1 < max_retries => {
                let wait = base_delay * 2u32.pow(attempt);
                warn!(
                    "Upload attempt {} failed for '{}', retrying in {:?}: {}",
                    attempt + 1,
                    collection.title,
                    wait,
                    e
                );
                thread::sleep(wait);
            }
            Err(e) => {
                error!(
                    "Error uploading poster for collection '{}' after {} attempts: {}",
                    collection.title, max_retries, e
                );
            }
        }
    }

    false
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeServer;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_upload_succeeds_first_attempt() {
        let (server, handle) = FakeServer::with_collection("101", "Marvel");
        let dir = tempdir().unwrap();
        let path = dir.path().join("Marvel.jpg");
        fs::write(&path, b"poster").unwrap();

        assert!(upload_with_retry(
            &server,
            &handle,
            &path,
            3,
            Duration::ZERO
        ));
        assert_eq!(server.upload_count(), 1);
        assert_eq!(
            server.last_upload(),
            Some(("101".to_string(), b"poster".to_vec()))
        );
    }

    #[test]
    fn test_upload_retries_up_to_max_and_reports_failure() {
        let (mut server, handle) = FakeServer::with_collection("101", "Marvel");
        server.fail_uploads = true;
        let dir = tempdir().unwrap();
        let path = dir.path().join("Marvel.jpg");
        fs::write(&path, b"poster").unwrap();

        let uploaded = upload_with_retry(&server, &handle, &path, 5, Duration::ZERO);

        assert!(!uploaded);
        assert_eq!(server.upload_count(), 5);
    }

    #[test]
    fn test_missing_file_fails_without_attempting() {
        let (server, handle) = FakeServer::with_collection("101", "Marvel");

        let uploaded = upload_with_retry(
            &server,
            &handle,
            Path::new("/path/that/does/not/exist.jpg"),
            3,
            Duration::ZERO,
        );

        assert!(!uploaded);
        assert_eq!(server.upload_count(), 0);
    }

    #[test]
    fn test_upload_selects_a_fresh_poster_key() {
        let (server, handle) = FakeServer::with_collection("101", "Marvel");
        let dir = tempdir().unwrap();
        let path = dir.path().join("Marvel.jpg");
        fs::write(&path, b"poster").unwrap();

        assert!(upload_with_retry(&server, &handle, &path, 3, Duration::ZERO));
        assert!(server.selected_key("101").is_some());
    }
}
