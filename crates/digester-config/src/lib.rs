//! Configuration management for Digester.
//!
//! Parses `digester.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the users file.
    pub users_file: Option<PathBuf>,
    /// Override the channels file.
    pub channels_file: Option<PathBuf>,
    /// Override the decode failure policy.
    pub on_decode_error: Option<DecodeErrorPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "digester.toml";

/// Upper bound for `render.max_depth`.
///
/// `serde_json` stops parsing at 128 nested levels. A message file uses four
/// levels before the first element and each element level adds two (the
/// object and its `elements` array), so deeper trees fail while the file is
/// read, before the depth check ever runs.
const MAX_DEPTH_LIMIT: usize = 60;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Ingestion configuration.
    pub ingest: IngestConfig,
    /// Export file locations (paths are relative strings from TOML).
    export: ExportConfigRaw,

    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// How channel mentions are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMentionsSetting {
    /// Show the channel ID.
    #[default]
    Identifier,
    /// Show the channel name when known.
    Name,
}

/// What to do with a message that cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeErrorPolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Skip the message and continue.
    Skip,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Open absolute links in a new tab.
    pub links_in_new_tab: bool,
    /// Channel mention display.
    pub channel_mentions: ChannelMentionsSetting,
    /// Maximum element nesting depth.
    pub max_depth: usize,
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            links_in_new_tab: true,
            channel_mentions: ChannelMentionsSetting::Identifier,
            max_depth: 32,
            gfm: true,
        }
    }
}

/// Ingestion configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Decode failure policy.
    pub on_decode_error: DecodeErrorPolicy,
}

/// Raw export configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    users_file: Option<String>,
    channels_file: Option<String>,
}

/// Resolved export file locations.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// `users.json` of the export.
    pub users_file: Option<PathBuf>,
    /// `channels.json` of the export.
    pub channels_file: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `digester.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(users_file) = &settings.users_file {
            self.export_resolved.users_file = Some(users_file.clone());
        }
        if let Some(channels_file) = &settings.channels_file {
            self.export_resolved.channels_file = Some(channels_file.clone());
        }
        if let Some(policy) = settings.on_decode_error {
            self.ingest.on_decode_error = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            render: RenderConfig::default(),
            ingest: IngestConfig::default(),
            export: ExportConfigRaw::default(),
            export_resolved: ExportConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_export()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        let depth = self.render.max_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "render.max_depth cannot exceed {MAX_DEPTH_LIMIT}"
            )));
        }
        Ok(())
    }

    fn validate_export(&self) -> Result<(), ConfigError> {
        require_non_empty(self.export.users_file.as_deref(), "export.users_file")?;
        require_non_empty(self.export.channels_file.as_deref(), "export.channels_file")?;
        Ok(())
    }

    /// Resolve relative export paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>| path.map(|p| config_dir.join(p));

        self.export_resolved = ExportConfig {
            users_file: resolve(self.export.users_file.as_deref()),
            channels_file: resolve(self.export.channels_file.as_deref()),
        };
    }
}

/// Require an optional string field, when set, to be non-empty.
fn require_non_empty(value: Option<&str>, field: &str) -> Result<(), ConfigError> {
    if value.is_some_and(str::is_empty) {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
