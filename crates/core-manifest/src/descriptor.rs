//! Plugin descriptor (`plugin.json`) parsing
//!
//! Only the identity fields the manifest needs are modelled; everything else
//! in the descriptor is ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// File name of the plugin descriptor at the content root
pub const PLUGIN_DESCRIPTOR_FILE: &str = "plugin.json";

/// Identity fields read from `plugin.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Plugin identifier
    pub id: String,

    /// Descriptor `info` block
    pub info: PluginInfo,
}

/// The `info` block of a plugin descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin version
    pub version: String,
}

impl PluginDescriptor {
    /// Read and parse `plugin.json` from the given content root
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PLUGIN_DESCRIPTOR_FILE);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::descriptor(&path, format!("failed to read: {}", e)))?;
        Self::parse(&contents).map_err(|reason| Error::descriptor(&path, reason))
    }

    /// Parse descriptor JSON text
    pub fn parse(contents: &str) -> std::result::Result<Self, String> {
        let descriptor: PluginDescriptor =
            serde_json::from_str(contents).map_err(|e| e.to_string())?;

        if descriptor.id.trim().is_empty() {
            return Err("field `id` is empty".to_string());
        }
        if descriptor.info.version.trim().is_empty() {
            return Err("field `info.version` is empty".to_string());
        }

        Ok(descriptor)
    }

    /// Plugin version
    pub fn version(&self) -> &str {
        &self.info.version
    }
}
