// ── Helper-script bootstrap ──
//
// The site-discovery helper is an external script that may not be present
// yet. Bootstrap fetches it once over HTTPS and installs it, executable,
// at its configured path. No retry: a failed bootstrap surfaces immediately
// and the next scan starts over.

use tracing::info;

use crate::error::HostError;
use crate::exec::{CommandSpec, HostExecutor, run_checked};
use crate::files::replace_file;

/// Download the helper script body from `url`.
///
/// Only https URLs are accepted, with a loopback-http exception so the
/// download path stays testable against a local mock server.
pub async fn download_script(url: &str) -> Result<Vec<u8>, HostError> {
    if !is_trusted_url(url) {
        return Err(HostError::UntrustedUrl { url: url.into() });
    }

    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| HostError::Download {
            url: url.into(),
            reason: e.to_string(),
        })?;

    let body = response.bytes().await.map_err(|e| HostError::Download {
        url: url.into(),
        reason: e.to_string(),
    })?;

    info!(url, bytes = body.len(), "downloaded helper script");
    Ok(body.to_vec())
}

/// Install the script body at `path` and mark it executable.
pub async fn install_script<E: HostExecutor>(
    host: &E,
    path: &str,
    body: &[u8],
) -> Result<(), HostError> {
    replace_file(host, path, body).await?;
    run_checked(host, CommandSpec::new(["chmod", "+x", path]).elevated()).await?;
    Ok(())
}

fn is_trusted_url(url: &str) -> bool {
    url.starts_with("https://")
        || url.starts_with("http://127.0.0.1")
        || url.starts_with("http://localhost")
}

#[cfg(test)]
mod tests {
    use super::is_trusted_url;

    #[test]
    fn https_is_trusted() {
        assert!(is_trusted_url("https://example.com/x.sh"));
    }

    #[test]
    fn loopback_http_is_trusted() {
        assert!(is_trusted_url("http://127.0.0.1:8080/x.sh"));
        assert!(is_trusted_url("http://localhost:8080/x.sh"));
    }

    #[test]
    fn plain_http_is_rejected() {
        assert!(!is_trusted_url("http://example.com/x.sh"));
        assert!(!is_trusted_url("ftp://example.com/x.sh"));
    }
}
