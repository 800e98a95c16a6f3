//! Multi-tier TOML configuration for Muster.
//!
//! Reads configuration from multiple sources with precedence:
//! CLI flags > env vars > config file > defaults

use muster_permissions::RoleOverride;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unit name shown in listings when none is configured.
pub const DEFAULT_UNIT_NAME: &str = "Aldanese Army";

/// Resolved configuration for a Muster invocation.
#[derive(Debug, Clone)]
pub struct MusterConfig {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub unit_name: String,
    pub shared_secrets: Vec<String>,
    pub role_overrides: Vec<RoleOverride>,
}

/// Settings that can be read from a TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub roster: RosterSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub roles: RolesSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSettings {
    pub data_dir: Option<PathBuf>,
    pub unit_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub shared_secrets: Vec<String>,
}

/// Role override section of the config file.
///
/// When `overrides` is absent the built-in table applies; an explicit empty
/// list disables name-based overrides entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolesSettings {
    pub overrides: Option<Vec<RoleOverride>>,
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
}

impl MusterConfig {
    /// Load configuration from all sources, applying precedence rules.
    ///
    /// Precedence (highest to lowest):
    /// 1. CLI flags
    /// 2. Environment variables
    /// 3. Config file (~/.muster/config.toml)
    /// 4. Defaults
    pub fn load(overrides: CliOverrides) -> Result<Self, muster_types::ConfigError> {
        let config_dir = config_dir();
        let settings = load_settings_file(&config_dir.join("config.toml"));
        Self::resolve(config_dir, settings, overrides, |key| std::env::var(key).ok())
    }

    /// Resolve a config from already-parsed settings and an env lookup.
    pub fn resolve(
        config_dir: PathBuf,
        settings: SettingsFile,
        overrides: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, muster_types::ConfigError> {
        // Resolve data dir: CLI > env > config file > <config_dir>/data
        let data_dir = overrides
            .data_dir
            .or_else(|| env("MUSTER_DATA_DIR").map(PathBuf::from))
            .or(settings.roster.data_dir)
            .unwrap_or_else(|| config_dir.join("data"));

        let unit_name = settings
            .roster
            .unit_name
            .unwrap_or_else(|| DEFAULT_UNIT_NAME.to_string());

        // Resolve shared secrets: env > config file
        let shared_secrets = match env("MUSTER_SHARED_SECRETS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => settings.auth.shared_secrets,
        };

        let role_overrides = settings
            .roles
            .overrides
            .unwrap_or_else(RoleOverride::defaults);
        for entry in &role_overrides {
            if entry.name.trim().is_empty() {
                return Err(muster_types::ConfigError::InvalidValue {
                    key: "roles.overrides".into(),
                    message: "override name must not be empty".into(),
                });
            }
        }

        Ok(MusterConfig {
            config_dir,
            data_dir,
            unit_name,
            shared_secrets,
            role_overrides,
        })
    }
}

/// Get the Muster config directory path (~/.muster/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MUSTER_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".muster")
}

/// Load and parse a TOML settings file, returning defaults on any error.
fn load_settings_file(path: &Path) -> SettingsFile {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            SettingsFile::default()
        }),
        Err(_) => SettingsFile::default(),
    }
}
