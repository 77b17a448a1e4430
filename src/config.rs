//! Parser configuration loaded from TOML.
//!
//! ```toml
//! catalogue = "russian"
//! log_skeletons = true
//! fixtures = ["tests/fixtures/sentences.json"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// Which built-in catalogue the parser starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueChoice {
    #[default]
    Russian,
    /// No patterns; every sentence is unrecognized.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Analyzer fixture files, merged in order.
    pub fixtures: Vec<PathBuf>,
    /// Log skeletons of unmatched trees at `info` instead of `debug`.
    pub log_skeletons: bool,
    pub catalogue: CatalogueChoice,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fixtures: Vec::new(),
            log_skeletons: false,
            catalogue: CatalogueChoice::Russian,
        }
    }
}

impl ParserConfig {
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        toml::from_str(source).map_err(|e| ConfigError::Toml {
            message: e.to_string(),
        })
    }

    /// Load from a file. Relative fixture paths resolve against the file's directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&source)?;
        if let Some(base) = path.parent() {
            for fixture in &mut config.fixtures {
                if fixture.is_relative() {
                    *fixture = base.join(&*fixture);
                }
            }
        }
        Ok(config)
    }
}
