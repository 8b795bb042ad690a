// ── Core error types ──
//
// User-facing errors from nginsight-core. Every variant carries enough
// detail (captured stderr where available) to be shown to the operator
// directly; nothing here is logged-only. The `From<HostError>` impl covers
// channel failures that have no more specific domain meaning.

use thiserror::Error;

use nginsight_host::HostError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Scan errors ──────────────────────────────────────────────────
    #[error("helper script unavailable: {reason}")]
    ScriptUnavailable { reason: String },

    #[error("helper script execution failed: {detail}")]
    Execution { detail: String },

    #[error("helper script output is not valid site data: {detail}")]
    Parse {
        detail: String,
        /// The raw stdout, preserved for diagnostics.
        raw: String,
    },

    // ── Apply workflow errors ────────────────────────────────────────
    #[error("backup of {path} failed, nothing was changed: {detail}")]
    Backup { path: String, detail: String },

    #[error("write to {path} failed: {detail}")]
    Write { path: String, detail: String },

    #[error("configuration test failed; the original file was restored: {detail}")]
    Validation { detail: String },

    #[error(
        "configuration test failed AND restoring {path} from backup failed; \
         the live configuration is in an unknown state and must be inspected manually"
    )]
    RollbackFailed {
        path: String,
        /// Output of the failed configuration test.
        validation: String,
        /// Why the restore itself failed.
        restore: String,
    },

    #[error("reload failed (the new configuration is valid and remains on disk): {detail}")]
    Reload { detail: String },

    // ── File errors ──────────────────────────────────────────────────
    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("configuration file is empty: {path}")]
    EmptyFile { path: String },

    // ── Coordination ─────────────────────────────────────────────────
    #[error("another {action} operation is already in flight")]
    Busy { action: &'static str },

    // ── Channel errors (no more specific domain meaning) ─────────────
    #[error(transparent)]
    Host(#[from] HostError),
}
