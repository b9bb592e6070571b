//! Signing credential lookup
//!
//! The signing request only needs a bearer token; where it comes from is
//! behind [`CredentialProvider`] so the request path can be exercised
//! without touching the process environment.

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::error::{PluginSignError, Result};

/// Preferred environment variable holding the access policy token
pub const ACCESS_POLICY_TOKEN_ENV: &str = "GRAFANA_ACCESS_POLICY_TOKEN";

/// Deprecated environment variable holding an API key
pub const API_KEY_ENV: &str = "GRAFANA_API_KEY";

/// Source of the bearer credential sent to the signing service
pub trait CredentialProvider {
    /// Return the credential, or a credential error when none is configured
    fn credential(&self) -> Result<SecretString>;
}

/// Reads the credential from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialProvider for EnvCredentials {
    fn credential(&self) -> Result<SecretString> {
        resolve_credential(
            std::env::var(ACCESS_POLICY_TOKEN_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        )
    }
}

/// Pick the preferred token, falling back to the deprecated key with a warning
fn resolve_credential(token: Option<String>, api_key: Option<String>) -> Result<SecretString> {
    let token = token.filter(|v| !v.trim().is_empty());
    let api_key = api_key.filter(|v| !v.trim().is_empty());

    match (token, api_key) {
        (Some(token), _) => Ok(SecretString::new(token.into_boxed_str())),
        (None, Some(api_key)) => {
            warn!(
                "{} is deprecated, use {} with an access policy token instead",
                API_KEY_ENV, ACCESS_POLICY_TOKEN_ENV
            );
            Ok(SecretString::new(api_key.into_boxed_str()))
        }
        (None, None) => Err(PluginSignError::Credential(format!(
            "no signing credential found, set {}",
            ACCESS_POLICY_TOKEN_ENV
        ))),
    }
}

/// Fixed credential, for embedding and tests
#[derive(Debug)]
pub struct StaticCredential(SecretString);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into().into_boxed_str()))
    }
}

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Result<SecretString> {
        Ok(SecretString::new(self.0.expose_secret().into()))
    }
}
