use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::filters::{FormatProvider, ParseLimits, set_default_format_provider};

use super::constants::{CONFIG_FILE_NAME, ENV_CONFIG, ENV_MAX_DEPTH, ENV_MAX_LEAVES};

// =============================================================================
// File Configuration (all fields optional)
// =============================================================================

/// Limits section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LimitsFileConfig {
    pub max_json_bytes: Option<usize>,
    pub max_depth: Option<usize>,
    pub max_leaves: Option<usize>,
    pub strict_nodes: Option<bool>,
}

/// Locale section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LocaleFileConfig {
    pub decimal_separator: Option<char>,
    /// Empty string disables group separators
    pub group_separator: Option<String>,
    pub datetime_formats: Option<Vec<String>>,
    pub date_formats: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub limits: Option<LimitsFileConfig>,
    pub locale: Option<LocaleFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub limits: ParseLimits,
    pub locale: FormatProvider,
}

impl FilterConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Explicit path, else GRIDFILTER_CONFIG, else ./gridfilter.json if present
    /// 3. Environment overrides for limits
    pub fn load(path: Option<&Path>) -> Result<Self> {
        tracing::debug!("Loading filter configuration");

        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var(ENV_CONFIG).ok().map(PathBuf::from),
        };

        let file_config = match config_path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("Config file not found: {}", p.display());
                }
                FileConfig::load_from_file(&p)?
            }
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.exists() {
                    FileConfig::load_from_file(&local)?
                } else {
                    FileConfig::default()
                }
            }
        };
        file_config.warn_unknown_fields();

        Self::resolve(file_config, |key| std::env::var(key).ok())
    }

    /// Layer a parsed file config and environment lookups over the defaults
    pub fn resolve<F>(file_config: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let file_limits = file_config.limits.unwrap_or_default();
        let file_locale = file_config.locale.unwrap_or_default();

        let env_usize = |key: &str| -> Result<Option<usize>> {
            env(key)
                .map(|v| {
                    v.trim()
                        .parse::<usize>()
                        .with_context(|| format!("Invalid value for {}: {}", key, v))
                })
                .transpose()
        };

        let limits = ParseLimits {
            max_json_bytes: file_limits
                .max_json_bytes
                .unwrap_or(defaults.limits.max_json_bytes),
            max_depth: env_usize(ENV_MAX_DEPTH)?
                .or(file_limits.max_depth)
                .unwrap_or(defaults.limits.max_depth),
            max_leaves: env_usize(ENV_MAX_LEAVES)?
                .or(file_limits.max_leaves)
                .unwrap_or(defaults.limits.max_leaves),
            strict_nodes: file_limits
                .strict_nodes
                .unwrap_or(defaults.limits.strict_nodes),
        };

        let group_separator = match file_locale.group_separator {
            Some(s) if s.is_empty() => None,
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => anyhow::bail!("locale.group_separator must be a single character"),
                }
            }
            None => defaults.locale.group_separator,
        };

        let locale = FormatProvider {
            decimal_separator: file_locale
                .decimal_separator
                .unwrap_or(defaults.locale.decimal_separator),
            group_separator,
            datetime_formats: file_locale
                .datetime_formats
                .unwrap_or(defaults.locale.datetime_formats),
            date_formats: file_locale
                .date_formats
                .unwrap_or(defaults.locale.date_formats),
        };

        let config = Self { limits, locale };
        config.validate()?;
        tracing::debug!(config = ?config, "Filter configuration resolved");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.limits.max_json_bytes == 0 {
            anyhow::bail!("limits.max_json_bytes must be greater than 0");
        }
        if self.limits.max_depth == 0 {
            anyhow::bail!("limits.max_depth must be greater than 0");
        }
        if self.limits.max_leaves == 0 {
            anyhow::bail!("limits.max_leaves must be greater than 0");
        }
        if self.locale.group_separator == Some(self.locale.decimal_separator) {
            anyhow::bail!(
                "locale.decimal_separator and locale.group_separator must differ (both '{}')",
                self.locale.decimal_separator
            );
        }
        Ok(())
    }

    pub fn parse_limits(&self) -> &ParseLimits {
        &self.limits
    }

    pub fn format_provider(&self) -> &FormatProvider {
        &self.locale
    }

    /// Make this config's locale the process-wide default format provider
    pub fn install(&self) {
        set_default_format_provider(self.locale.clone());
    }
}
