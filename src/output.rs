/*!
 * Signed manifest persistence
 */

use std::io::Write;
use std::path::{Path, PathBuf};

use plugsign_core_manifest::MANIFEST_FILE;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{PluginSignError, Result};

/// Write the signed manifest verbatim to `MANIFEST.txt` inside `root`
///
/// The text is staged in a temporary file in the same directory and renamed
/// over the target, so an interrupted write leaves any previous manifest intact.
pub fn write_signed_manifest(root: &Path, signed: &str) -> Result<PathBuf> {
    let target = root.join(MANIFEST_FILE);

    let mut staged = NamedTempFile::new_in(root).map_err(|e| {
        PluginSignError::Io(format!("Failed to stage {}: {}", target.display(), e))
    })?;
    staged
        .write_all(signed.as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|e| PluginSignError::Io(format!("Failed to write {}: {}", target.display(), e)))?;
    staged
        .persist(&target)
        .map_err(|e| PluginSignError::Io(format!("Failed to write {}: {}", target.display(), e)))?;

    info!(path = %target.display(), "Signed manifest written");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_manifest() {
        let dir = tempdir().unwrap();
        let path = write_signed_manifest(dir.path(), "signed-text").unwrap();

        assert_eq!(path, dir.path().join(MANIFEST_FILE));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "signed-text");
    }

    #[test]
    fn test_write_overwrites_previous() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "old").unwrap();

        write_signed_manifest(dir.path(), "new").unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap(),
            "new"
        );
        // Only the manifest remains, no staging leftovers
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let err = write_signed_manifest(Path::new("/nonexistent/plugsign"), "x").unwrap_err();
        assert!(matches!(err, PluginSignError::Io(_)));
    }
}
