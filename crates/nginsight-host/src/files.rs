// ── File operations over the command channel ──
//
// All file access goes through subprocesses (`test`, `cat`, `tee`, `cp`,
// `mv`, `rm`, `find`) rather than direct fs calls, because the target files
// are root-owned and the channel is where privilege lives. Every helper
// marks its command elevated; the executor decides what that means.

use crate::error::HostError;
use crate::exec::{CommandSpec, HostExecutor, run_checked};

/// Probe whether a regular file exists. Only the exit status matters.
pub async fn file_exists<E: HostExecutor>(host: &E, path: &str) -> Result<bool, HostError> {
    let out = host
        .execute(
            CommandSpec::new(["test", "-f", path])
                .elevated()
                .discard_stderr(),
        )
        .await?;
    Ok(out.success())
}

/// Read a file's full contents.
pub async fn read_file<E: HostExecutor>(host: &E, path: &str) -> Result<String, HostError> {
    let out = run_checked(host, CommandSpec::new(["cat", path]).elevated()).await?;
    Ok(out.stdout)
}

/// Overwrite a file with the given content via `tee` (stdout discarded).
pub async fn replace_file<E: HostExecutor>(
    host: &E,
    path: &str,
    content: &[u8],
) -> Result<(), HostError> {
    run_checked(
        host,
        CommandSpec::new(["tee", path])
            .elevated()
            .stdin(content.to_vec()),
    )
    .await?;
    Ok(())
}

/// Copy `src` to `dst`, preserving mode and ownership.
pub async fn copy_file<E: HostExecutor>(host: &E, src: &str, dst: &str) -> Result<(), HostError> {
    run_checked(host, CommandSpec::new(["cp", "-p", src, dst]).elevated()).await?;
    Ok(())
}

/// Rename `src` to `dst` (used for rollback: atomic on the same filesystem).
pub async fn rename_file<E: HostExecutor>(host: &E, src: &str, dst: &str) -> Result<(), HostError> {
    run_checked(host, CommandSpec::new(["mv", src, dst]).elevated()).await?;
    Ok(())
}

/// Remove a file, ignoring whether it exists.
pub async fn remove_file<E: HostExecutor>(host: &E, path: &str) -> Result<(), HostError> {
    run_checked(host, CommandSpec::new(["rm", "-f", path]).elevated()).await?;
    Ok(())
}

/// List nginx configuration files under `root` (`*.conf` plus `nginx.conf`),
/// one absolute path per returned entry.
pub async fn list_config_files<E: HostExecutor>(
    host: &E,
    root: &str,
) -> Result<Vec<String>, HostError> {
    let out = run_checked(
        host,
        CommandSpec::new([
            "find",
            root,
            "-type",
            "f",
            "-name",
            "*.conf",
            "-o",
            "-name",
            "nginx.conf",
        ])
        .elevated(),
    )
    .await?;
    Ok(out
        .stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToOwned::to_owned)
        .collect())
}

/// List files matching `pattern` directly under `dir` (no recursion),
/// used for backup retention.
pub async fn list_matching<E: HostExecutor>(
    host: &E,
    dir: &str,
    pattern: &str,
) -> Result<Vec<String>, HostError> {
    let out = run_checked(
        host,
        CommandSpec::new(["find", dir, "-maxdepth", "1", "-type", "f", "-name", pattern])
            .elevated(),
    )
    .await?;
    Ok(out
        .stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToOwned::to_owned)
        .collect())
}
