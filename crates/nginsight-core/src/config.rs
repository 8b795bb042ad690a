// ── Session configuration ──

/// Everything a [`Session`](crate::Session) needs to know about the host.
///
/// Loaded from TOML/env by the `nginsight-config` crate; the defaults here
/// match a stock Debian/Ubuntu nginx install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Where the site-discovery helper script lives (or gets installed).
    pub script_path: String,

    /// Where to fetch the helper script from when it is missing.
    pub script_url: String,

    /// Root of the nginx configuration tree.
    pub conf_root: String,

    /// systemd unit to reload after a successful apply.
    pub service: String,

    /// The nginx binary used for `-t` validation.
    pub nginx_binary: String,

    /// How many backups to keep per config file (0 disables pruning).
    pub backup_keep: usize,

    /// Whether elevated commands are wrapped in `sudo -n`.
    pub elevate: bool,
}

pub const DEFAULT_SCRIPT_PATH: &str = "/usr/local/bin/nginx_info.sh";
pub const DEFAULT_SCRIPT_URL: &str = "https://gist.githubusercontent.com/AzerQ/9ef12f60e5752e57303cd27a6e46932c/raw/1a584009d3714942ab7cdb7707b122e2d7c24eee/nginx_sites_info.sh";
pub const DEFAULT_CONF_ROOT: &str = "/etc/nginx";
pub const DEFAULT_BACKUP_KEEP: usize = 5;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            script_path: DEFAULT_SCRIPT_PATH.into(),
            script_url: DEFAULT_SCRIPT_URL.into(),
            conf_root: DEFAULT_CONF_ROOT.into(),
            service: "nginx".into(),
            nginx_binary: "nginx".into(),
            backup_keep: DEFAULT_BACKUP_KEEP,
            elevate: true,
        }
    }
}
