//! Engine configuration, stored as TOML.
//!
//! ```toml
//! attribute_prefix = "att_"
//!
//! [matcher]
//! min_fragment_edges = 2
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for path indexing and subgraph matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Removed (every occurrence) from attribute ids when building path keys.
    pub attribute_prefix: Option<String>,
    /// Settings for the default subgraph matcher.
    pub matcher: MatcherConfig,
}

/// Settings for [`GreedyFragmentMatcher`](crate::matcher::GreedyFragmentMatcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Fragments with fewer matched edges are dropped.
    pub min_fragment_edges: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_fragment_edges: 1,
        }
    }
}

impl AlignConfig {
    /// The attribute prefix, treating an empty string as none.
    pub fn attribute_prefix(&self) -> Option<&str> {
        self.attribute_prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
