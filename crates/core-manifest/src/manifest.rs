//! Plugin manifest record
//!
//! The manifest maps every distributed file to its SHA-256 digest and carries
//! the plugin identity plus optional signing metadata. It is serialized with
//! camelCase field names; optional fields are omitted entirely when unset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::descriptor::PluginDescriptor;
use crate::error::Result;

/// Reserved file name the signed manifest is written to
pub const MANIFEST_FILE: &str = "MANIFEST.txt";

/// File inventory submitted for signing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecord {
    /// Plugin identifier from the descriptor
    pub plugin: String,

    /// Plugin version from the descriptor
    pub version: String,

    /// Relative path (forward slashes) to lowercase hex SHA-256
    pub files: BTreeMap<String, String>,

    /// Signature type override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<String>,

    /// Root URLs for private signatures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_urls: Option<Vec<String>>,

    /// Tool and version that produced the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit_version: Option<String>,
}

impl ManifestRecord {
    /// Create an empty manifest for the given plugin identity
    pub fn new(plugin: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            version: version.into(),
            files: BTreeMap::new(),
            signature_type: None,
            root_urls: None,
            toolkit_version: None,
        }
    }

    /// Create an empty manifest from a parsed descriptor
    pub fn from_descriptor(descriptor: &PluginDescriptor) -> Self {
        Self::new(descriptor.id.clone(), descriptor.version())
    }

    /// Record the digest of a file
    pub fn add_file(&mut self, key: impl Into<String>, digest: impl Into<String>) {
        self.files.insert(key.into(), digest.into());
    }

    pub fn with_signature_type(mut self, signature_type: impl Into<String>) -> Self {
        self.signature_type = Some(signature_type.into());
        self
    }

    pub fn with_root_urls(mut self, root_urls: Vec<String>) -> Self {
        self.root_urls = Some(root_urls);
        self
    }

    pub fn with_toolkit_version(mut self, toolkit_version: impl Into<String>) -> Self {
        self.toolkit_version = Some(toolkit_version.into());
        self
    }

    /// Number of files in the manifest
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Compact JSON payload
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON for display
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_omitted() {
        let mut manifest = ManifestRecord::new("my-panel", "1.0.0");
        manifest.add_file("module.js", "abc");

        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"plugin": "my-panel", "version": "1.0.0", "files": {"module.js": "abc"}})
        );
    }

    #[test]
    fn test_overrides_use_camel_case() {
        let manifest = ManifestRecord::new("p", "2.0.0")
            .with_signature_type("private")
            .with_root_urls(vec!["https://example.com/grafana".to_string()])
            .with_toolkit_version("plugsign@0.1.0");

        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["signatureType"], "private");
        assert_eq!(value["rootUrls"], json!(["https://example.com/grafana"]));
        assert_eq!(value["toolkitVersion"], "plugsign@0.1.0");
    }

    #[test]
    fn test_deserialize_without_optionals() {
        let manifest: ManifestRecord =
            serde_json::from_str(r#"{"plugin":"p","version":"1","files":{}}"#).unwrap();
        assert!(manifest.signature_type.is_none());
        assert!(manifest.root_urls.is_none());
        assert_eq!(manifest.file_count(), 0);
    }

    #[test]
    fn test_from_descriptor() {
        let d = PluginDescriptor::parse(r#"{"id":"x-app","info":{"version":"3.1.4"}}"#).unwrap();
        let manifest = ManifestRecord::from_descriptor(&d);
        assert_eq!(manifest.plugin, "x-app");
        assert_eq!(manifest.version, "3.1.4");
        assert!(manifest.files.is_empty());
    }
}
