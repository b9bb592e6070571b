//! Manifest construction from a plugin content root

use std::path::Path;

use tracing::{debug, info};

use crate::descriptor::PluginDescriptor;
use crate::digest::sha256_file;
use crate::error::Result;
use crate::manifest::{ManifestRecord, MANIFEST_FILE};
use crate::walker::PluginWalker;

/// Build the unsigned manifest for the plugin rooted at `root`
///
/// Reads `plugin.json` for the plugin identity, then hashes every file the
/// walker yields except the reserved manifest file. Any traversal or read
/// failure aborts the build.
pub fn build_manifest(root: &Path) -> Result<ManifestRecord> {
    let descriptor = PluginDescriptor::load(root)?;
    let mut manifest = ManifestRecord::from_descriptor(&descriptor);

    let walker = PluginWalker::new(root, root)?;
    let base = walker.base().to_path_buf();

    for key in walker {
        let key = key?;
        if key == MANIFEST_FILE {
            debug!("Skipping existing {}", MANIFEST_FILE);
            continue;
        }

        let digest = sha256_file(&base.join(&key))?;
        debug!(file = %key, digest = %digest, "Hashed file");
        manifest.add_file(key, digest);
    }

    info!(
        plugin = %manifest.plugin,
        version = %manifest.version,
        files = manifest.file_count(),
        "Built plugin manifest"
    );

    Ok(manifest)
}
