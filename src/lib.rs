/*!
 * plugsign - plugin distribution signing
 *
 * Builds a SHA-256 manifest of every file in a plugin's content directory,
 * submits it to the signing service and stores the signed result as
 * `MANIFEST.txt` next to the plugin files.
 *
 * - Symbolic links leaving the content directory abort the build
 * - Credentials are read from the environment behind a provider trait
 * - The previous manifest is only replaced after a successful signature
 */

pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod output;
pub mod sign;
pub mod signing;

// Re-export commonly used types
pub use config::{LogLevel, SignConfig};
pub use credentials::{CredentialProvider, EnvCredentials, StaticCredential};
pub use error::{PluginSignError, Result};
pub use plugsign_core_manifest::{build_manifest, ManifestRecord, MANIFEST_FILE};
pub use sign::{prepare_manifest, run, sign, SignOptions, SignOutcome, TOOLKIT_VERSION};
pub use signing::{HttpSigner, ManifestSigner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
