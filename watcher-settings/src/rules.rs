//! Form rules
//!
//! The per-section exceptions the builders apply. Defaults match the
//! settings page as shipped; a `[rules]` table in the TOML config file can
//! override any of them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRules {
    /// Server controls neither captured nor validated (persisted elsewhere)
    pub server_exclude: Vec<String>,
    /// Search controls that may be left blank
    pub search_blank_allowed: Vec<String>,
    /// Postprocessing field holding the ", "-separated extension list
    pub move_extensions_field: String,
    /// Name given to a quality profile that has no name input
    pub default_profile_name: String,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            server_exclude: vec!["theme".to_string()],
            search_blank_allowed: vec!["imdbrss".to_string()],
            move_extensions_field: "moveextensions".to_string(),
            default_profile_name: "Default".to_string(),
        }
    }
}

impl FormRules {
    /// Parse rules from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load rules from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded form rules");
        Ok(rules)
    }
}
