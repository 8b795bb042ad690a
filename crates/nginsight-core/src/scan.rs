// ── Site scan (the data fetcher) ──
//
// Ensure the helper script is present (bootstrapping it on first use),
// execute it with elevated privilege, parse its stdout. No caching and no
// retry: every scan re-probes and re-executes, and any failure surfaces
// immediately.

use tracing::{debug, info};

use nginsight_host::{CommandSpec, HostExecutor, bootstrap, files};

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::model::SiteDataDocument;

/// Run one full scan and return the parsed document.
pub async fn fetch_site_data<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
) -> Result<SiteDataDocument, CoreError> {
    ensure_script(host, config).await?;

    let out = host
        .execute(CommandSpec::new([config.script_path.as_str()]).elevated())
        .await
        .map_err(|e| CoreError::Execution {
            detail: e.to_string(),
        })?;

    if !out.success() {
        return Err(CoreError::Execution {
            detail: format!(
                "'{}' exited with status {}: {}",
                config.script_path,
                out.status,
                out.stderr.trim()
            ),
        });
    }

    debug!(bytes = out.stdout.len(), "helper script completed");
    parse_document(&out.stdout)
}

/// Parse helper stdout, preserving the raw output on failure so the
/// operator can see what the script actually produced.
pub fn parse_document(raw: &str) -> Result<SiteDataDocument, CoreError> {
    serde_json::from_str(raw).map_err(|e| CoreError::Parse {
        detail: e.to_string(),
        raw: raw.to_owned(),
    })
}

/// Probe for the helper script; download and install it when missing.
async fn ensure_script<E: HostExecutor>(
    host: &E,
    config: &SessionConfig,
) -> Result<(), CoreError> {
    let present = files::file_exists(host, &config.script_path)
        .await
        .map_err(|e| CoreError::ScriptUnavailable {
            reason: e.to_string(),
        })?;
    if present {
        return Ok(());
    }

    info!(
        path = %config.script_path,
        url = %config.script_url,
        "helper script missing, bootstrapping"
    );

    let body =
        bootstrap::download_script(&config.script_url)
            .await
            .map_err(|e| CoreError::ScriptUnavailable {
                reason: e.to_string(),
            })?;

    bootstrap::install_script(host, &config.script_path, &body)
        .await
        .map_err(|e| CoreError::ScriptUnavailable {
            reason: e.to_string(),
        })
}
