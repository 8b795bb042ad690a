//! Shared configuration for the nginsight CLI.
//!
//! TOML file + `NGINSIGHT_*` environment overrides, resolved through
//! figment, and translation to `nginsight_core::SessionConfig`. The CLI
//! adds flag-aware overrides on top.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nginsight_core::SessionConfig;
use nginsight_core::config::{
    DEFAULT_BACKUP_KEEP, DEFAULT_CONF_ROOT, DEFAULT_SCRIPT_PATH, DEFAULT_SCRIPT_URL,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
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

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Output defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,

    /// Host/nginx settings.
    #[serde(default)]
    pub nginx: NginxSection,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Where nginx and the helper script live on this host.
#[derive(Debug, Deserialize, Serialize)]
pub struct NginxSection {
    /// Helper script location (installed here when missing).
    #[serde(default = "default_script_path")]
    pub script_path: String,

    /// Download URL for the helper script.
    #[serde(default = "default_script_url")]
    pub script_url: String,

    /// Root of the nginx configuration tree.
    #[serde(default = "default_conf_root")]
    pub conf_root: String,

    /// systemd unit name.
    #[serde(default = "default_service")]
    pub service: String,

    /// nginx binary used for `-t` validation.
    #[serde(default = "default_service")]
    pub nginx_binary: String,

    /// Backups kept per config file (0 disables pruning).
    #[serde(default = "default_backup_keep")]
    pub backup_keep: usize,

    /// Wrap elevated commands in `sudo -n`.
    #[serde(default = "default_elevate")]
    pub elevate: bool,
}

impl Default for NginxSection {
    fn default() -> Self {
        Self {
            script_path: default_script_path(),
            script_url: default_script_url(),
            conf_root: default_conf_root(),
            service: default_service(),
            nginx_binary: default_service(),
            backup_keep: default_backup_keep(),
            elevate: default_elevate(),
        }
    }
}

fn default_script_path() -> String {
    DEFAULT_SCRIPT_PATH.into()
}
fn default_script_url() -> String {
    DEFAULT_SCRIPT_URL.into()
}
fn default_conf_root() -> String {
    DEFAULT_CONF_ROOT.into()
}
fn default_service() -> String {
    "nginx".into()
}
fn default_backup_keep() -> usize {
    DEFAULT_BACKUP_KEEP
}
fn default_elevate() -> bool {
    true
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "azerq", "nginsight").map_or_else(
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
    p.push("nginsight");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
///
/// Environment keys use `__` as the section separator, e.g.
/// `NGINSIGHT_NGINX__SCRIPT_PATH`.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("NGINSIGHT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file doesn't exist or is broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `SessionConfig` from the loaded file/env configuration.
pub fn session_config(cfg: &Config) -> SessionConfig {
    SessionConfig {
        script_path: cfg.nginx.script_path.clone(),
        script_url: cfg.nginx.script_url.clone(),
        conf_root: cfg.nginx.conf_root.clone(),
        service: cfg.nginx.service.clone(),
        nginx_binary: cfg.nginx.nginx_binary.clone(),
        backup_keep: cfg.nginx.backup_keep,
        elevate: cfg.nginx.elevate,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use figment::Figment;
    use figment::providers::{Format, Serialized, Toml};
    use pretty_assertions::assert_eq;

    use super::{Config, session_config};

    #[test]
    fn defaults_match_core() {
        let session = session_config(&Config::default());
        assert_eq!(session, nginsight_core::SessionConfig::default());
    }

    #[test]
    fn toml_overrides_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [nginx]
                conf_root = "/opt/nginx/etc"
                backup_keep = 2
                elevate = false
                "#,
            ));
        let cfg: Config = figment.extract().unwrap();

        assert_eq!(cfg.nginx.conf_root, "/opt/nginx/etc");
        assert_eq!(cfg.nginx.backup_keep, 2);
        assert!(!cfg.nginx.elevate);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.nginx.service, "nginx");
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let reparsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(session_config(&cfg), session_config(&reparsed));
    }
}
