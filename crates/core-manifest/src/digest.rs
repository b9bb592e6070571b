//! SHA-256 content digests

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Read buffer size for streaming digests
const BUFFER_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 of a file's full byte content
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let n = reader.read(&mut buffer).map_err(|e| Error::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Lowercase hex SHA-256 of an in-memory buffer
pub fn sha256_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_sha256_bytes() {
        assert_eq!(sha256_bytes(b"hello"), HELLO_SHA256);
    }

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_file_matches_bytes() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"hello").unwrap();
        temp.flush().unwrap();

        assert_eq!(sha256_file(temp.path()).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_sha256_file_larger_than_buffer() {
        let data = vec![7u8; BUFFER_SIZE * 3 + 17];
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&data).unwrap();
        temp.flush().unwrap();

        assert_eq!(sha256_file(temp.path()).unwrap(), sha256_bytes(&data));
    }

    #[test]
    fn test_sha256_missing_file() {
        let err = sha256_file(Path::new("/nonexistent/plugsign/file")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
