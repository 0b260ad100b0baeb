/// Content hashing for poster images, local and remote.
use sha2::{Digest, Sha256};
use std::{fs::File, io::Read, path::Path};

use crate::error::Result;

// 128 KiB chunks
const CHUNK_SIZE: usize = 128 * 1024;

/// Compute the hex SHA-256 digest of a file's full byte stream
pub fn sha256_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = File::open(&path)?;
    let mut hasher = Sha256::new();

    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the hex SHA-256 digest of an in-memory byte slice
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
