// ── Host channel error types ──
//
// Failures of the command channel itself. A command that runs but exits
// non-zero is NOT an error at the `execute` level -- callers that want that
// mapping use `run_checked`, which produces `CommandFailed` with the
// captured stderr attached.

use thiserror::Error;

/// Unified error type for the host channel.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("cannot spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("failed to write stdin to '{program}': {source}")]
    Stdin {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("download from {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("refusing script download from '{url}': only https (or loopback http) is allowed")]
    UntrustedUrl { url: String },
}
