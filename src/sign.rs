//! Sign a plugin distribution
//!
//! Builds the manifest for a content root, merges the caller's overrides and
//! the toolkit tag, obtains a signature and writes `MANIFEST.txt`. The write
//! happens only after a successful signing response, so a failed run leaves
//! any existing manifest untouched.

use std::path::PathBuf;

use plugsign_core_manifest::{build_manifest, ManifestRecord};
use tracing::{error, info};

use crate::credentials::CredentialProvider;
use crate::error::{PluginSignError, Result, EXIT_SUCCESS};
use crate::output::write_signed_manifest;
use crate::signing::ManifestSigner;

/// Provenance tag stamped into every manifest before signing
pub const TOOLKIT_VERSION: &str = concat!("plugsign@", env!("CARGO_PKG_VERSION"));

/// Caller options for one signing run
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Plugin content root
    pub dist_dir: PathBuf,
    /// Signature type override
    pub signature_type: Option<String>,
    /// Root URLs for a private signature
    pub root_urls: Option<Vec<String>>,
    /// Build the manifest only
    pub dry_run: bool,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            dist_dir: PathBuf::from("dist"),
            signature_type: None,
            root_urls: None,
            dry_run: false,
        }
    }
}

/// Result of a successful run
#[derive(Debug)]
pub enum SignOutcome {
    /// Signed manifest persisted at `path`
    Signed { path: PathBuf, files: usize },
    /// Manifest built but not submitted
    DryRun { manifest: ManifestRecord },
}

/// Build the manifest for `options.dist_dir` with overrides and toolkit tag applied
pub fn prepare_manifest(options: &SignOptions) -> Result<ManifestRecord> {
    if !options.dist_dir.is_dir() {
        return Err(PluginSignError::ContentRootNotFound(options.dist_dir.clone()));
    }

    let mut manifest = build_manifest(&options.dist_dir)?;

    if let Some(signature_type) = &options.signature_type {
        manifest = manifest.with_signature_type(signature_type.clone());
    }
    if let Some(root_urls) = &options.root_urls {
        manifest = manifest.with_root_urls(root_urls.clone());
    }

    Ok(manifest.with_toolkit_version(TOOLKIT_VERSION))
}

/// Run the full pipeline, propagating any failure
pub fn run(
    options: &SignOptions,
    credentials: &dyn CredentialProvider,
    signer: &dyn ManifestSigner,
) -> Result<SignOutcome> {
    if options.dry_run {
        let manifest = prepare_manifest(options)?;
        return Ok(SignOutcome::DryRun { manifest });
    }

    let credential = credentials.credential()?;
    let manifest = prepare_manifest(options)?;
    let files = manifest.file_count();

    let signed = signer.sign(&manifest, &credential)?;
    let path = write_signed_manifest(&options.dist_dir, &signed)?;

    Ok(SignOutcome::Signed { path, files })
}

/// Sign a plugin, reporting instead of propagating failures
///
/// Returns the process exit code for the run.
pub fn sign(
    options: &SignOptions,
    credentials: &dyn CredentialProvider,
    signer: &dyn ManifestSigner,
) -> i32 {
    match run(options, credentials, signer) {
        Ok(SignOutcome::Signed { path, files }) => {
            info!(path = %path.display(), files, "Plugin signed");
            EXIT_SUCCESS
        }
        Ok(SignOutcome::DryRun { manifest }) => match manifest.to_json_pretty() {
            Ok(json) => {
                println!("{}", json);
                EXIT_SUCCESS
            }
            Err(e) => report(&PluginSignError::from(e)),
        },
        Err(e) => report(&e),
    }
}

fn report(err: &PluginSignError) -> i32 {
    error!(category = %err.category(), "Error signing manifest: {}", err);
    err.exit_code()
}
