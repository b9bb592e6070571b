//! Signing service client
//!
//! Submits an unsigned manifest and returns the signed manifest text exactly
//! as the service produced it. No retries are attempted.

use std::time::Duration;

use plugsign_core_manifest::ManifestRecord;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::error::{PluginSignError, Result};

/// Turns an unsigned manifest into a signed one
pub trait ManifestSigner {
    /// Sign `manifest`, authenticating with `credential`
    fn sign(&self, manifest: &ManifestRecord, credential: &SecretString) -> Result<String>;
}

/// Signs manifests over HTTPS
pub struct HttpSigner {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSigner {
    /// Create a signer posting to `url`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(format!("plugsign/{}", crate::VERSION))
            .build()
            .map_err(|e| PluginSignError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Signing endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ManifestSigner for HttpSigner {
    fn sign(&self, manifest: &ManifestRecord, credential: &SecretString) -> Result<String> {
        let body = manifest.to_json()?;
        info!(url = %self.url, plugin = %manifest.plugin, "Requesting manifest signature");

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", credential.expose_secret()))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| PluginSignError::Transport(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            PluginSignError::Transport(format!("failed to read signing response: {}", e))
        })?;

        if status != StatusCode::OK {
            return Err(PluginSignError::Signing {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(bytes = text.len(), "Received signed manifest");
        Ok(text)
    }
}
