// ── Per-site report types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;

/// One virtual host's discovered configuration and live health status.
///
/// The helper script omits sections that don't apply (a static site has no
/// proxy block, a sparse probe has no `checked_at`), so every sub-object
/// defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteReport {
    pub domain: String,
    #[serde(default)]
    pub config_file: String,
    #[serde(default)]
    pub listen_port: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub ssl: SslInfo,
    #[serde(default)]
    pub proxy: ProxyInfo,
    /// JSON key is `static`, which is reserved in Rust.
    #[serde(default, rename = "static")]
    pub static_content: StaticInfo,
    #[serde(default)]
    pub docker: DockerInfo,
    #[serde(default)]
    pub status: StatusInfo,
}

/// How the site serves content. Anything the helper reports that we don't
/// recognize collapses to `Unknown` rather than failing the whole parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentType {
    Proxy,
    Static,
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "proxy" => Self::Proxy,
            "static" => Self::Static,
            _ => Self::Unknown,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SslInfo {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub certificate_path: Option<String>,
    #[serde(default)]
    pub certificate_domains: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyInfo {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticInfo {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub root_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DockerInfo {
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub connected: bool,
}

/// Live health status from the helper's HTTP probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusInfo {
    #[serde(default)]
    pub state: SiteState,
    #[serde(default)]
    pub http_code: Option<u16>,
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub checked_at: Option<DateTime<Utc>>,
}

/// Probe outcome. A missing or unrecognized state reads as `Error` -- the
/// probe either didn't run or said something we can't interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SiteState {
    Up,
    Down,
    #[default]
    Error,
}

impl<'de> Deserialize<'de> for SiteState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "UP" => Self::Up,
            "DOWN" => Self::Down,
            _ => Self::Error,
        })
    }
}
