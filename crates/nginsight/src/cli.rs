//! Clap derive structures for the `nginsight` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nginsight -- dashboard and config editor for Nginx virtual hosts
#[derive(Debug, Parser)]
#[command(
    name = "nginsight",
    version,
    about = "Inspect Nginx virtual hosts and edit their configuration safely",
    long_about = "Shows every Nginx virtual host with its SSL, proxy/static and Docker\n\
        status (discovered by a privileged helper script), and applies config\n\
        edits with automatic validation and rollback.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format (defaults to the config file's setting, then table)
    #[arg(long, short = 'o', env = "NGINSIGHT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, env = "NGINSIGHT_COLOR", global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Run host commands directly instead of through sudo
    #[arg(long, env = "NGINSIGHT_NO_SUDO", global = true)]
    pub no_sudo: bool,
}

/// Globals after merging CLI flags with the config file's defaults.
#[derive(Debug, Clone)]
pub struct Ctx {
    pub output: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

impl OutputFormat {
    /// Parse a config-file value, falling back to `Table`.
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "json-compact" => Self::JsonCompact,
            "yaml" => Self::Yaml,
            "plain" => Self::Plain,
            _ => Self::Table,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

impl ColorMode {
    pub fn from_config(value: &str) -> Self {
        match value {
            "always" => Self::Always,
            "never" => Self::Never,
            _ => Self::Auto,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect discovered virtual hosts
    #[command(alias = "s")]
    Sites(SitesArgs),

    /// Show scan-wide summary statistics
    Stats,

    /// View, edit, and apply nginx configuration files
    #[command(alias = "c")]
    Conf(ConfArgs),

    /// Control the nginx service
    #[command(alias = "svc")]
    Service(ServiceArgs),

    /// Manage nginsight's own configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List all discovered sites with status, target and SSL expiry
    #[command(alias = "ls")]
    List,

    /// Show full details for one site
    Get {
        /// Domain name as reported by the scan
        domain: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONF
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfArgs {
    #[command(subcommand)]
    pub command: ConfCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfCommand {
    /// List config files under the nginx root, grouped
    #[command(alias = "ls")]
    List,

    /// Print a config file
    Show {
        /// Absolute path of the config file
        path: String,
    },

    /// Edit a config file in $EDITOR, then validate, apply and reload
    Edit {
        /// Absolute path of the config file
        path: String,
    },

    /// Apply new content to a config file (validate + reload, rollback on failure)
    Apply {
        /// Absolute path of the config file
        path: String,

        /// Read the new content from this local file ("-" for stdin)
        #[arg(long, short = 'F', required = true)]
        from_file: PathBuf,
    },

    /// Test configuration syntax
    ///
    /// Without arguments, checks the live configuration tree. With a file,
    /// dry-runs that candidate in isolation without touching anything live.
    Test {
        /// Candidate file to check in isolation ("-" for stdin)
        file: Option<PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServiceArgs {
    #[command(subcommand)]
    pub command: ServiceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    /// Show the service unit state
    Status,

    /// Reload the service (graceful, config re-read)
    Reload,

    /// Restart the service (drops connections; asks for confirmation)
    Restart,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with defaults
    Init,

    /// Display the current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
