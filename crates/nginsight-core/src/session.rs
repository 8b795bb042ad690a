// ── Session façade ──
//
// The consumer-facing entry point: owns the host channel and configuration,
// and exposes every operation with an explicit target path (no process-wide
// "current file" state). Each action family carries an in-flight guard so a
// double-triggered refresh or save fails fast with `Busy` instead of racing
// its twin.

use std::sync::atomic::{AtomicBool, Ordering};

use nginsight_host::{HostExecutor, files};

use crate::apply::{self, ApplyReport, CheckReport};
use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::model::SiteDataDocument;
use crate::scan;
use crate::service::{self, ServiceStatus};

pub struct Session<E> {
    host: E,
    config: SessionConfig,
    scan_flag: AtomicBool,
    apply_flag: AtomicBool,
    check_flag: AtomicBool,
}

impl<E: HostExecutor> Session<E> {
    pub fn new(host: E, config: SessionConfig) -> Self {
        Self {
            host,
            config,
            scan_flag: AtomicBool::new(false),
            apply_flag: AtomicBool::new(false),
            check_flag: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ── Scan ─────────────────────────────────────────────────────────

    /// Run one full site scan. Overlapping scans are rejected with `Busy`.
    pub async fn fetch_site_data(&self) -> Result<SiteDataDocument, CoreError> {
        let _guard = acquire(&self.scan_flag, "scan")?;
        scan::fetch_site_data(&self.host, &self.config).await
    }

    // ── Config files ─────────────────────────────────────────────────

    /// List every config file under the configured nginx root.
    pub async fn list_config_files(&self) -> Result<Vec<String>, CoreError> {
        files::list_config_files(&self.host, &self.config.conf_root)
            .await
            .map_err(CoreError::from)
    }

    /// Read a config file. Missing and empty files are distinct errors --
    /// an empty read usually means a permissions problem upstream, not a
    /// genuinely empty config.
    pub async fn read_config(&self, path: &str) -> Result<String, CoreError> {
        if !files::file_exists(&self.host, path).await? {
            return Err(CoreError::FileNotFound {
                path: path.to_owned(),
            });
        }
        let content = files::read_file(&self.host, path).await?;
        if content.is_empty() {
            return Err(CoreError::EmptyFile {
                path: path.to_owned(),
            });
        }
        Ok(content)
    }

    /// Commit new content to a config file via the apply workflow.
    pub async fn apply_config(&self, path: &str, content: &str) -> Result<ApplyReport, CoreError> {
        let _guard = acquire(&self.apply_flag, "apply")?;
        apply::apply_config(&self.host, &self.config, path, content).await
    }

    /// Dry-run validate candidate content without touching the live tree.
    pub async fn check_candidate(&self, content: &str) -> Result<CheckReport, CoreError> {
        let _guard = acquire(&self.check_flag, "check")?;
        apply::check_candidate(&self.host, &self.config, content).await
    }

    /// Syntax-check the live configuration tree.
    pub async fn test_live(&self) -> Result<CheckReport, CoreError> {
        let _guard = acquire(&self.check_flag, "check")?;
        apply::test_live(&self.host, &self.config).await
    }

    // ── Service ──────────────────────────────────────────────────────

    pub async fn service_status(&self) -> Result<ServiceStatus, CoreError> {
        service::status(&self.host, &self.config).await
    }

    pub async fn reload_service(&self) -> Result<(), CoreError> {
        service::reload(&self.host, &self.config).await
    }

    pub async fn restart_service(&self) -> Result<(), CoreError> {
        service::restart(&self.host, &self.config).await
    }
}

// ── In-flight guard ─────────────────────────────────────────────────

#[derive(Debug)]
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn acquire<'a>(flag: &'a AtomicBool, action: &'static str) -> Result<InFlightGuard<'a>, CoreError> {
    if flag
        .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
        .is_ok()
    {
        Ok(InFlightGuard { flag })
    } else {
        Err(CoreError::Busy { action })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::AtomicBool;

    use super::acquire;
    use crate::error::CoreError;

    #[test]
    fn second_acquire_is_busy_until_release() {
        let flag = AtomicBool::new(false);

        let guard = acquire(&flag, "apply").unwrap();
        let err = acquire(&flag, "apply").unwrap_err();
        assert!(matches!(err, CoreError::Busy { action: "apply" }));

        drop(guard);
        assert!(acquire(&flag, "apply").is_ok());
    }
}
