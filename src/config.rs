//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/gormat/gormat.toml`, or an explicit path
//! 3. Environment variables: `GORMAT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::format::is_printable;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment: {0}")]
    Environment(#[from] config::ConfigError),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// List rendering defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListConfig {
    /// Glyph written before every line (None for no prefix, `""` in TOML)
    #[serde(with = "glyph")]
    pub prefix: Option<char>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { prefix: Some('>') }
    }
}

/// Tree rendering defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Draw branch glyphs
    pub print_prefix: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { print_prefix: true }
    }
}

/// Sample data built by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Children per node in the sample tree
    pub fan_out: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { fan_out: 4 }
    }
}

/// Raw settings for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub list: RawListConfig,
    pub tree: RawTreeConfig,
    pub demo: RawDemoConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawListConfig {
    /// Outer None: not specified; inner None: prefix switched off
    #[serde(deserialize_with = "glyph::deserialize_some")]
    pub prefix: Option<Option<char>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub print_prefix: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDemoConfig {
    pub fan_out: Option<usize>,
}

/// Unified configuration for gormat.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub list: ListConfig,
    pub tree: TreeConfig,
    pub demo: DemoConfig,
}

/// Optional glyph stored as a one-character string, `""` meaning none.
mod glyph {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(glyph: &Option<char>, serializer: S) -> Result<S::Ok, S::Error> {
        match glyph {
            Some(c) => serializer.collect_str(c),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<char>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(c), None) => Ok(Some(c)),
            _ => Err(D::Error::custom(format!(
                "prefix must be a single character or empty, got {raw:?}"
            ))),
        }
    }

    pub fn deserialize_some<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<char>>, D::Error> {
        deserialize(deserializer).map(Some)
    }
}

/// Get the XDG config directory for gormat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gormat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gormat.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// `config_file` replaces the global config path when given; a missing
    /// explicit file is an error, a missing global file is not.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut current = Self::default();

        match config_file {
            Some(path) => {
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("loading global config {}", global_path.display());
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.normalize();
        debug!(?current, "effective settings");
        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            list: ListConfig {
                prefix: overlay.list.prefix.unwrap_or(self.list.prefix),
            },
            tree: TreeConfig {
                print_prefix: overlay.tree.print_prefix.unwrap_or(self.tree.print_prefix),
            },
            demo: DemoConfig {
                fan_out: overlay.demo.fan_out.unwrap_or(self.demo.fan_out),
            },
        }
    }

    /// Apply GORMAT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GORMAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_string("list.prefix") {
            // Empty value switches the prefix off
            settings.list.prefix = val.chars().next();
        }
        if let Ok(val) = config.get_bool("tree.print_prefix") {
            settings.tree.print_prefix = val;
        }
        if let Ok(val) = config.get_int("demo.fan_out") {
            settings.demo.fan_out = usize::try_from(val).unwrap_or(0);
        }

        Ok(settings)
    }

    fn normalize(&mut self) {
        self.list.prefix = self.list.prefix.filter(|&c| is_printable(c));
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gormat configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/gormat/gormat.toml  (or --config <path>)
#   Env:  GORMAT_* environment variables, e.g. GORMAT_DEMO__FAN_OUT=3

[list]
# Glyph written before every list line; "" disables it
# prefix = ">"

[tree]
# Draw branch glyphs (├─ └─ │) instead of blank indentation
# print_prefix = true

[demo]
# Children per node in the sample tree
# fan_out = 4
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.list.prefix, Some('>'));
        assert!(settings.tree.print_prefix);
        assert_eq!(settings.demo.fan_out, 4);
    }

    #[test]
    fn test_merge_keeps_unspecified_values() {
        let raw: RawSettings = toml::from_str("[demo]\nfan_out = 2\n").unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.demo.fan_out, 2);
        assert_eq!(merged.list.prefix, Some('>'));
    }

    #[test]
    fn test_empty_prefix_switches_prefix_off() {
        let raw: RawSettings = toml::from_str("[list]\nprefix = \"\"\n").unwrap();
        assert_eq!(raw.list.prefix, Some(None));
        assert_eq!(Settings::default().merge_with(&raw).list.prefix, None);
    }

    #[test]
    fn test_multi_char_prefix_is_rejected() {
        let raw: Result<RawSettings, _> = toml::from_str("[list]\nprefix = \"ab\"\n");
        assert!(raw.is_err());
    }

    #[test]
    fn test_normalize_drops_non_printable_prefix() {
        let mut settings = Settings::default();
        settings.list.prefix = Some('\u{7}');
        settings.normalize();
        assert_eq!(settings.list.prefix, None);
    }

    #[test]
    fn test_template_parses() {
        let raw: Result<RawSettings, _> = toml::from_str(&Settings::template());
        assert!(raw.is_ok());
    }
}
