// ── Service control ──
//
// The systemctl verbs the dashboard exposes. Reload after an apply lives in
// the apply workflow; these are the operator-triggered equivalents.

use nginsight_host::{CommandSpec, HostExecutor, run_checked};

use crate::config::SessionConfig;
use crate::error::CoreError;

/// Result of `systemctl is-active`.
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub active: bool,
    /// The literal unit state ("active", "inactive", "failed", ...).
    pub state: String,
}

pub async fn status<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
) -> Result<ServiceStatus, CoreError> {
    // is-active exits non-zero for any state but "active"; that's data.
    let out = host
        .execute(CommandSpec::new(["systemctl", "is-active", config.service.as_str()]).elevated())
        .await?;
    Ok(ServiceStatus {
        active: out.success(),
        state: out.stdout.trim().to_owned(),
    })
}

pub async fn reload<E: HostExecutor>(host: &E, config: &SessionConfig) -> Result<(), CoreError> {
    run_checked(
        host,
        CommandSpec::new(["systemctl", "reload", config.service.as_str()]).elevated(),
    )
    .await
    .map_err(|e| CoreError::Reload {
        detail: e.to_string(),
    })?;
    Ok(())
}

pub async fn restart<E: HostExecutor>(host: &E, config: &SessionConfig) -> Result<(), CoreError> {
    run_checked(
        host,
        CommandSpec::new(["systemctl", "restart", config.service.as_str()]).elevated(),
    )
    .await
    .map_err(|e| CoreError::Reload {
        detail: format!("restart: {e}"),
    })?;
    Ok(())
}
