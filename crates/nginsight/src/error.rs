//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text. Every error prints a short title plus the captured detail (stderr
//! included where the host channel provided it).

use miette::Diagnostic;
use thiserror::Error;

use nginsight_core::CoreError;

/// Exit codes per the CLI contract.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const SCAN: i32 = 3;
    pub const VALIDATION: i32 = 4;
    pub const ROLLBACK: i32 = 5;
    pub const RELOAD: i32 = 6;
    pub const NOT_FOUND: i32 = 7;
    pub const BUSY: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Scan ─────────────────────────────────────────────────────────

    #[error("Helper script unavailable")]
    #[diagnostic(
        code(nginsight::script_unavailable),
        help(
            "The site-discovery script could not be found, downloaded, or installed.\n\
             {reason}\n\
             Check the [nginx] script_path / script_url settings: nginsight config show"
        )
    )]
    ScriptUnavailable { reason: String },

    #[error("Helper script execution failed")]
    #[diagnostic(code(nginsight::script_failed), help("{detail}"))]
    ScriptFailed { detail: String },

    #[error("Could not parse helper script output")]
    #[diagnostic(
        code(nginsight::parse_failed),
        help(
            "{detail}\n\
             Raw output (truncated):\n{raw_preview}"
        )
    )]
    ParseFailed { detail: String, raw_preview: String },

    // ── Apply workflow ───────────────────────────────────────────────

    #[error("Backup failed, nothing was changed")]
    #[diagnostic(code(nginsight::backup_failed), help("{path}: {detail}"))]
    BackupFailed { path: String, detail: String },

    #[error("Write to {path} failed")]
    #[diagnostic(
        code(nginsight::write_failed),
        help("The original file was not modified.\n{detail}")
    )]
    WriteFailed { path: String, detail: String },

    #[error("Configuration test failed -- original file restored")]
    #[diagnostic(code(nginsight::validation_failed), help("{output}"))]
    ValidationFailed { output: String },

    #[error("Configuration test failed AND the restore of {path} also failed")]
    #[diagnostic(
        code(nginsight::rollback_failed),
        help(
            "The live configuration is in an UNKNOWN state -- inspect {path} manually.\n\n\
             Validation output:\n{validation}\n\n\
             Restore failure:\n{restore}"
        )
    )]
    RollbackFailed {
        path: String,
        validation: String,
        restore: String,
    },

    #[error("Reload failed")]
    #[diagnostic(
        code(nginsight::reload_failed),
        help(
            "The new configuration validated and remains on disk; it was NOT rolled back.\n\
             {detail}"
        )
    )]
    ReloadFailed { detail: String },

    #[error("Configuration test failed")]
    #[diagnostic(code(nginsight::test_failed), help("{output}"))]
    TestFailed { output: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(nginsight::not_found),
        help("Run: nginsight {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Configuration file {path} is empty")]
    #[diagnostic(
        code(nginsight::empty_file),
        help("An empty read usually means a permission problem; check sudo access.")
    )]
    EmptyFile { path: String },

    // ── Coordination ─────────────────────────────────────────────────

    #[error("Another {action} operation is already in flight")]
    #[diagnostic(
        code(nginsight::busy),
        help("Wait for the running operation to finish and retry.")
    )]
    Busy { action: String },

    // ── Editor ───────────────────────────────────────────────────────

    #[error("Editor '{editor}' failed")]
    #[diagnostic(
        code(nginsight::editor),
        help("Set $VISUAL or $EDITOR to a working editor. {detail}")
    )]
    Editor { editor: String, detail: String },

    // ── Host channel ─────────────────────────────────────────────────

    #[error("Host command failed")]
    #[diagnostic(
        code(nginsight::host),
        help(
            "{detail}\n\
             If this is a sudo prompt failure, grant passwordless sudo or use --no-sudo as root."
        )
    )]
    Host { detail: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error")]
    #[diagnostic(code(nginsight::config), help("{0}"))]
    Config(String),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptUnavailable { .. }
            | Self::ScriptFailed { .. }
            | Self::ParseFailed { .. } => exit_code::SCAN,
            Self::ValidationFailed { .. } | Self::TestFailed { .. } => exit_code::VALIDATION,
            Self::RollbackFailed { .. } => exit_code::ROLLBACK,
            Self::ReloadFailed { .. } => exit_code::RELOAD,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Busy { .. } => exit_code::BUSY,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ScriptUnavailable { reason } => CliError::ScriptUnavailable { reason },

            CoreError::Execution { detail } => CliError::ScriptFailed { detail },

            CoreError::Parse { detail, raw } => CliError::ParseFailed {
                detail,
                raw_preview: preview(&raw),
            },

            CoreError::Backup { path, detail } => CliError::BackupFailed { path, detail },

            CoreError::Write { path, detail } => CliError::WriteFailed { path, detail },

            CoreError::Validation { detail } => CliError::ValidationFailed { output: detail },

            CoreError::RollbackFailed {
                path,
                validation,
                restore,
            } => CliError::RollbackFailed {
                path,
                validation,
                restore,
            },

            CoreError::Reload { detail } => CliError::ReloadFailed { detail },

            CoreError::FileNotFound { path } => CliError::NotFound {
                resource_type: "config file".into(),
                identifier: path,
                list_command: "conf list".into(),
            },

            CoreError::EmptyFile { path } => CliError::EmptyFile { path },

            CoreError::Busy { action } => CliError::Busy {
                action: action.to_owned(),
            },

            CoreError::Host(e) => CliError::Host {
                detail: e.to_string(),
            },
        }
    }
}

/// First few lines of raw helper output for the parse diagnostic.
fn preview(raw: &str) -> String {
    const MAX: usize = 400;
    if raw.len() <= MAX {
        raw.to_owned()
    } else {
        let cut = raw
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}...", &raw[..cut])
    }
}
