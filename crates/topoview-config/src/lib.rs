//! Shared configuration for the topoview CLI and TUI.
//!
//! TOML profiles naming a topology source, rendering defaults and popup
//! geometry, layered as defaults → config file → `TOPOVIEW_` environment.
//! Both binaries depend on this crate; the CLI adds flag-aware wrappers on
//! top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use topoview_core::{PopupGeometry, RefreshInterval, Theme, ViewMode};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "TOPOVIEW_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Detail popup geometry.
    #[serde(default)]
    pub popup: PopupGeometry,

    /// Named topology sources.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            popup: PopupGeometry::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub view: ViewMode,

    #[serde(default)]
    pub refresh: RefreshInterval,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            theme: Theme::default(),
            view: ViewMode::default(),
            refresh: RefreshInterval::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// A named topology source with optional rendering overrides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// JSON or YAML topology file.
    pub topology: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshInterval>,
}

impl Profile {
    pub fn new(topology: impl Into<PathBuf>) -> Self {
        Self {
            topology: topology.into(),
            view: None,
            theme: None,
            refresh: None,
        }
    }
}

impl Config {
    /// Look up a profile by explicit name, falling back to
    /// `default_profile`. An explicit name that does not exist is an
    /// error; a missing default is not.
    pub fn resolve_profile(
        &self,
        explicit: Option<&str>,
    ) -> Result<Option<(&str, &Profile)>, ConfigError> {
        if let Some(name) = explicit {
            return self
                .profiles
                .get_key_value(name)
                .map(|(k, p)| Some((k.as_str(), p)))
                .ok_or_else(|| ConfigError::ProfileNotFound {
                    name: name.into(),
                    available: self.profile_names(),
                });
        }
        Ok(self
            .default_profile
            .as_deref()
            .and_then(|name| self.profiles.get_key_value(name))
            .map(|(k, p)| (k.as_str(), p)))
    }

    /// Comma-separated profile names, or `(none)`.
    pub fn profile_names(&self) -> String {
        if self.profiles.is_empty() {
            "(none)".into()
        } else {
            self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }

    /// Reject geometry a renderer cannot draw.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.popup;
        for (field, value) in [
            ("popup.width", p.width),
            ("popup.height", p.height),
            ("popup.padding", p.padding),
            ("popup.margin", p.margin),
            ("popup.below_offset", p.below_offset),
            ("popup.reserved_top", p.reserved_top),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        if p.width == 0.0 || p.height == 0.0 {
            return Err(ConfigError::Validation {
                field: "popup".into(),
                reason: "width and height must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `TOPOVIEW_CONFIG`, then XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "topoview", "topoview").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("topoview");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` + environment. A missing file yields defaults.
///
/// Nested keys use a double underscore in the environment, e.g.
/// `TOPOVIEW_DEFAULTS__THEME=light` or `TOPOVIEW_POPUP__BELOW_OFFSET=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TOPOVIEW_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "config loaded");
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.popup, PopupGeometry::default());
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn reads_profiles_and_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
theme = "light"
view = "logical"
refresh = "30s"

[popup]
width = 280.0
reserved_top = 64.0

[profiles.lab]
topology = "/srv/lab.json"
view = "physical"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.theme, Theme::Light);
        assert_eq!(cfg.defaults.view, ViewMode::Logical);
        assert_eq!(cfg.defaults.refresh, RefreshInterval::ThirtySeconds);
        assert_eq!(cfg.popup.width, 280.0);
        assert_eq!(cfg.popup.height, 300.0);
        assert_eq!(cfg.popup.reserved_top, 64.0);

        let (name, profile) = cfg.resolve_profile(None).unwrap().unwrap();
        assert_eq!(name, "lab");
        assert_eq!(profile.topology, PathBuf::from("/srv/lab.json"));
        assert_eq!(profile.view, Some(ViewMode::Physical));
    }

    #[test]
    fn explicit_unknown_profile_is_an_error() {
        let mut cfg = Config::default();
        cfg.profiles.insert("a".into(), Profile::new("a.json"));
        let err = cfg.resolve_profile(Some("b")).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound { ref available, .. } if available == "a"));
        // Default "default" is absent: not an error.
        assert!(cfg.resolve_profile(None).unwrap().is_none());
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                theme: Some(Theme::Light),
                ..Profile::new("/tmp/topo.yaml")
            },
        );
        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, cfg.profiles);
    }

    #[test]
    fn rejects_degenerate_popup() {
        let mut cfg = Config::default();
        cfg.popup.width = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation { .. })));
        cfg.popup.width = 320.0;
        cfg.popup.margin = -1.0;
        assert!(cfg.validate().is_err());
    }
}
