//! Plugin manifest construction for plugsign
//!
//! This crate builds the file inventory that is sent to the signing service:
//! every regular file under a plugin's content root, keyed by its root-relative
//! path and mapped to a SHA-256 digest.
//!
//! # Key Concepts
//!
//! - **Content root**: the built plugin directory, holding `plugin.json`
//! - **Walker**: lazy traversal that refuses symbolic links leaving the root
//! - **Manifest**: plugin identity plus the path -> digest table
//!
//! # Example
//!
//! ```no_run
//! use plugsign_core_manifest::build_manifest;
//! use std::path::Path;
//!
//! let manifest = build_manifest(Path::new("dist")).unwrap();
//! println!("{} files", manifest.file_count());
//! ```

pub mod builder;
pub mod descriptor;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod walker;

// Re-export main types for convenience
pub use builder::build_manifest;
pub use descriptor::{PluginDescriptor, PluginInfo, PLUGIN_DESCRIPTOR_FILE};
pub use digest::{sha256_bytes, sha256_file};
pub use error::{Error, Result};
pub use manifest::{ManifestRecord, MANIFEST_FILE};
pub use walker::{to_manifest_key, walk_files, PluginWalker};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_file_names() {
        assert_eq!(MANIFEST_FILE, "MANIFEST.txt");
        assert_eq!(PLUGIN_DESCRIPTOR_FILE, "plugin.json");
    }
}
