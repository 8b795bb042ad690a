// nginsight-host: the privileged command-execution channel.
//
// Everything nginsight does to the machine -- reading and rewriting config
// files, validating, reloading the service, installing the helper script --
// goes through the single `HostExecutor` capability defined here. Privilege
// is requested per command, never ambiently.

pub mod bootstrap;
pub mod error;
pub mod exec;
pub mod files;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::HostError;
pub use exec::{CommandOutput, CommandSpec, HostExecutor, LocalHost, StderrMode, run_checked};
