// ── Config apply workflow ──
//
// Backup → write → validate → reload, with rollback when validation fails.
// The sequence is linear and runs each step at most once; which step failed
// determines what is left on disk, and the error variants encode that
// contract (see `CoreError`).

use chrono::Utc;
use tracing::{info, warn};

use nginsight_host::{CommandOutput, CommandSpec, HostExecutor, files, run_checked};

use crate::config::SessionConfig;
use crate::error::CoreError;

/// Outcome of a successful apply.
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub path: String,
    /// Snapshot taken before the write; stays on disk after success.
    pub backup_path: String,
    /// Older backups removed by retention pruning.
    pub pruned_backups: Vec<String>,
}

/// Outcome of a configuration test (live tree or dry-run candidate).
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub passed: bool,
    /// Combined stdout + stderr of the syntax checker.
    pub output: String,
}

/// Commit `content` to `path`: snapshot, overwrite, validate the live tree,
/// reload the service. Validation failure restores the snapshot; a failed
/// restore is the one compound error (`RollbackFailed`) because it leaves
/// the live config in an unknown state.
pub async fn apply_config<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
    path: &str,
    content: &str,
) -> Result<ApplyReport, CoreError> {
    let backup_path = backup_path_for(path, Utc::now().timestamp_millis());

    // 1. Snapshot. Nothing has been touched yet if this fails.
    files::copy_file(host, path, &backup_path)
        .await
        .map_err(|e| CoreError::Backup {
            path: path.to_owned(),
            detail: e.to_string(),
        })?;

    // 2. Overwrite the target. On failure the backup stays on disk for
    //    manual recovery and is named in the error.
    files::replace_file(host, path, content.as_bytes())
        .await
        .map_err(|e| CoreError::Write {
            path: path.to_owned(),
            detail: format!("{e} (snapshot kept at {backup_path})"),
        })?;

    // 3. Validate the whole live tree, not just this file -- an edit here
    //    can break an include elsewhere.
    let test = validate_tree(host, config, None).await?;
    if !test.success() {
        let validation = combined_output(&test);
        return match files::rename_file(host, &backup_path, path).await {
            Ok(()) => Err(CoreError::Validation { detail: validation }),
            Err(restore) => Err(CoreError::RollbackFailed {
                path: path.to_owned(),
                validation,
                restore: restore.to_string(),
            }),
        };
    }

    // 4. Reload. Validation passed, so the on-disk config is known-good
    //    and is NOT rolled back if the reload itself fails.
    run_checked(
        host,
        CommandSpec::new(["systemctl", "reload", config.service.as_str()]).elevated(),
    )
    .await
    .map_err(|e| CoreError::Reload {
        detail: e.to_string(),
    })?;

    info!(path, backup = %backup_path, "configuration applied and service reloaded");

    // 5. Retention: drop backups beyond the configured count. Best-effort --
    //    a prune failure never fails the apply.
    let pruned_backups = prune_backups(host, config, path).await;

    Ok(ApplyReport {
        path: path.to_owned(),
        backup_path,
        pruned_backups,
    })
}

/// Syntax-check candidate content against a throwaway file in isolation.
/// The live configuration is never touched and the temp file is removed on
/// both outcomes.
pub async fn check_candidate<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
    content: &str,
) -> Result<CheckReport, CoreError> {
    let tmp = format!("/tmp/nginsight-check-{}.conf", Utc::now().timestamp_millis());

    files::replace_file(host, &tmp, content.as_bytes())
        .await
        .map_err(|e| CoreError::Write {
            path: tmp.clone(),
            detail: e.to_string(),
        })?;

    let test = validate_tree(host, config, Some(&tmp)).await;

    if let Err(e) = files::remove_file(host, &tmp).await {
        warn!(path = %tmp, error = %e, "failed to remove temporary check file");
    }

    let test = test?;
    Ok(CheckReport {
        passed: test.success(),
        output: combined_output(&test),
    })
}

/// Syntax-check the live configuration tree and report the checker's output.
pub async fn test_live<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
) -> Result<CheckReport, CoreError> {
    let test = validate_tree(host, config, None).await?;
    Ok(CheckReport {
        passed: test.success(),
        output: combined_output(&test),
    })
}

// ── Internals ───────────────────────────────────────────────────────

/// Run `nginx -t`, optionally against an alternate root config file.
/// Non-zero exit is data here: callers decide between rollback and report.
async fn validate_tree<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
    alternate: Option<&str>,
) -> Result<CommandOutput, CoreError> {
    let mut argv = vec![config.nginx_binary.clone(), "-t".to_owned()];
    if let Some(path) = alternate {
        argv.push("-c".to_owned());
        argv.push(path.to_owned());
    }
    host.execute(CommandSpec::new(argv).elevated())
        .await
        .map_err(CoreError::from)
}

/// The checker writes to stderr; merge both streams for display.
fn combined_output(out: &CommandOutput) -> String {
    format!("{}{}", out.stdout, out.stderr).trim().to_owned()
}

/// Sibling backup path with a millisecond-timestamp token.
fn backup_path_for(path: &str, millis: i64) -> String {
    format!("{path}.backup.{millis}")
}

/// Keep the newest `backup_keep` backups of `path`, removing the rest.
/// The millisecond token sorts lexicographically in creation order.
async fn prune_backups<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
    path: &str,
) -> Vec<String> {
    if config.backup_keep == 0 {
        return Vec::new();
    }

    let (dir, file) = match path.rsplit_once('/') {
        Some((dir, file)) if !dir.is_empty() => (dir.to_owned(), file.to_owned()),
        _ => (".".to_owned(), path.to_owned()),
    };

    let mut backups = match files::list_matching(host, &dir, &format!("{file}.backup.*")).await {
        Ok(backups) => backups,
        Err(e) => {
            warn!(path, error = %e, "backup listing failed, skipping retention");
            return Vec::new();
        }
    };

    backups.sort();
    if backups.len() <= config.backup_keep {
        return Vec::new();
    }

    let excess = backups.len() - config.backup_keep;
    let mut pruned = Vec::with_capacity(excess);
    for old in backups.drain(..excess) {
        match files::remove_file(host, &old).await {
            Ok(()) => pruned.push(old),
            Err(e) => warn!(backup = %old, error = %e, "failed to prune backup"),
        }
    }
    pruned
}

#[cfg(test)]
mod tests {
    use super::backup_path_for;

    #[test]
    fn backup_path_is_a_sibling_with_token() {
        assert_eq!(
            backup_path_for("/etc/nginx/sites-enabled/a.conf", 1700000000000),
            "/etc/nginx/sites-enabled/a.conf.backup.1700000000000"
        );
    }
}
