//! TOML configuration for markspan: preset selection, specifier policy and
//! custom rules, loaded from `~/.config/markspan/config.toml`.
//!
//! ```toml
//! preset = "standard"
//! keep_specifiers = false
//!
//! [[rules]]
//! open = "=="
//! close = "=="
//! style = [{ background = "gray_light" }]
//!
//! [[rules]]
//! open = "%% "
//! ends = "line"
//! style = [{ foreground = "gray" }]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use markspan_engine::style::AttrSet;
use markspan_engine::{Generator, Rule, RuleSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("rule {index} ({open:?}) must set exactly one of `close` or `ends`")]
    AmbiguousTerminator { index: usize, open: String },

    #[error("invalid rule list: {0}")]
    InvalidRules(#[from] markspan_engine::RuleError),
}

/// Which builtin rule ordering to start from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Standard,
    Discord,
    /// No builtin rules; only the `[[rules]]` entries apply.
    None,
}

/// Positional terminator for custom block rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ends {
    Line,
    Document,
}

/// One custom rule, appended after the preset's rules in file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub open: String,
    /// Explicit close token. Mutually exclusive with `ends`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
    /// Positional terminator (block rule). Mutually exclusive with `close`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<Ends>,
    #[serde(default)]
    pub style: AttrSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_style: Option<AttrSet>,
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub multiline: bool,
}

impl RuleConfig {
    fn to_rule(&self, index: usize) -> Result<Rule, ConfigError> {
        let mut rule = match (&self.close, self.ends) {
            (Some(close), None) => Rule::paired(&self.open, close, self.style.clone()),
            (None, Some(Ends::Line)) => Rule::until_line_end(&self.open, self.style.clone()),
            (None, Some(Ends::Document)) => {
                Rule::until_document_end(&self.open, self.style.clone())
            }
            _ => {
                return Err(ConfigError::AmbiguousTerminator {
                    index,
                    open: self.open.clone(),
                });
            }
        };
        if self.raw {
            rule = rule.raw();
        }
        if self.multiline {
            rule = rule.multiline();
        }
        if let Some(reveal) = &self.reveal_style {
            rule = rule.revealed(reveal.clone());
        }
        Ok(rule)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preset: Preset,
    #[serde(default)]
    pub keep_specifiers: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleConfig>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markspan");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Builds the configured generator: preset rules, then custom rules,
    /// validated as one list.
    pub fn to_generator(&self) -> Result<Generator, ConfigError> {
        use markspan_engine::rules::builtin;

        let mut rules = match self.preset {
            Preset::Standard => builtin::standard_rules(),
            Preset::Discord => builtin::discord_rules(),
            Preset::None => Vec::new(),
        };
        for (index, rule) in self.rules.iter().enumerate() {
            rules.push(rule.to_rule(index)?);
        }
        let mut generator = Generator::new(RuleSet::new(rules)?);
        if self.keep_specifiers {
            generator = generator.keeping_specifiers();
        }
        Ok(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markspan_engine::SpecifierPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markspan/config.toml"));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from_path(dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "preset = \"discord\"\nkeep_specifiers = true\n").unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.preset, Preset::Discord);
        assert!(config.keep_specifiers);
        let generator = config.to_generator().unwrap();
        assert_eq!(generator.policy(), SpecifierPolicy::Keep);
    }

    #[test]
    fn test_custom_rule_round_trip() {
        let toml_str = r#"
preset = "none"

[[rules]]
open = "=="
close = "=="
style = [{ background = "gray_light" }]

[[rules]]
open = "%% "
ends = "line"
style = [{ foreground = "gray" }]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rules.len(), 2);
        let generator = config.to_generator().unwrap();
        let out = generator.generate("==hi== and %% note", None);
        assert_eq!(out.text, "hi and %% note");

        // And it serializes back without loss of the rule list.
        let rendered = toml::to_string_pretty(&config).unwrap();
        let reparsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.rules.len(), 2);
    }

    #[test]
    fn test_block_rule_from_config() {
        let toml_str = r#"
preset = "none"

[[rules]]
open = "%% "
ends = "document"
style = [{ foreground = "gray" }]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let generator = config.to_generator().unwrap();
        let out = generator.generate("%% a\nb", None);
        assert_eq!(out.text, "a\nb");
    }

    #[test]
    fn test_rule_with_both_terminators_rejected() {
        let toml_str = r#"
[[rules]]
open = "=="
close = "=="
ends = "line"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let err = config.to_generator().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::AmbiguousTerminator { index: 0, .. }
        ));
    }

    #[test]
    fn test_invalid_rule_list_surfaces_engine_error() {
        let toml_str = r#"
[[rules]]
open = ""
close = "=="
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let err = config.to_generator().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRules(_)));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            preset: Preset::Discord,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(loaded.preset, Preset::Discord);
    }
}
