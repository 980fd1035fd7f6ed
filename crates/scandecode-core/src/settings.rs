// Scandecode Settings Module
// User-configurable behavior of the trace replay front end

#![cfg(feature = "settings")]

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// What the caller does with a two-event batch the decoder does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnrecognizedPolicy {
    /// Log the combination and keep going
    #[default]
    Drop,
    /// Stop at the first unrecognized combination
    Fail,
}

/// Settings for scandecode
///
/// Loaded from a TOML file (default: ~/.config/scandecode/settings.toml).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    on_unrecognized: UnrecognizedPolicy,

    show_names: bool,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    decoder: Option<DecoderSettings>,

    #[serde(default)]
    output: Option<OutputSettings>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct DecoderSettings {
    #[serde(default)]
    on_unrecognized: Option<UnrecognizedPolicy>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct OutputSettings {
    #[serde(default)]
    show_names: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self {
            on_unrecognized: UnrecognizedPolicy::Drop,
            show_names: true,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(policy) = toml_settings.decoder.and_then(|d| d.on_unrecognized) {
            settings.on_unrecognized = policy;
        }

        if let Some(show_names) = toml_settings.output.and_then(|o| o.show_names) {
            settings.show_names = show_names;
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scandecode").join("settings.toml"))
    }

    /// Load from default location (~/.config/scandecode/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    pub fn on_unrecognized(&self) -> UnrecognizedPolicy {
        self.on_unrecognized
    }

    pub fn set_on_unrecognized(&mut self, policy: UnrecognizedPolicy) {
        self.on_unrecognized = policy;
    }

    pub fn show_names(&self) -> bool {
        self.show_names
    }

    pub fn set_show_names(&mut self, show_names: bool) {
        self.show_names = show_names;
    }

    /// File the settings were loaded from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Scandecode Settings
# Place this file at: ~/.config/scandecode/settings.toml

[decoder]
# What to do with a two-event batch that forms no known pattern:
#   "drop" - log it and continue
#   "fail" - stop replaying
on_unrecognized = "drop"

[output]
# Print key names next to numeric ids
show_names = true
"#
}
