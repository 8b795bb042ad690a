#![allow(clippy::unwrap_used)]
// Session façade behavior: file reads, listing, and service status over
// the fake host.

mod common;

use common::FakeHost;
use pretty_assertions::assert_eq;

use nginsight_core::{CoreError, Session, SessionConfig};

fn session(host: FakeHost) -> Session<FakeHost> {
    Session::new(host, SessionConfig::default())
}

#[tokio::test]
async fn read_config_returns_content() {
    let host = FakeHost::new().with_file("/etc/nginx/nginx.conf", "events {}\n");
    let session = session(host);

    let content = session.read_config("/etc/nginx/nginx.conf").await.unwrap();
    assert_eq!(content, "events {}\n");
}

#[tokio::test]
async fn read_config_distinguishes_missing_from_empty() {
    let host = FakeHost::new().with_file("/etc/nginx/empty.conf", "");
    let session = session(host);

    let err = session.read_config("/etc/nginx/gone.conf").await.unwrap_err();
    assert!(matches!(err, CoreError::FileNotFound { .. }), "got: {err:?}");

    let err = session.read_config("/etc/nginx/empty.conf").await.unwrap_err();
    assert!(matches!(err, CoreError::EmptyFile { .. }), "got: {err:?}");
}

#[tokio::test]
async fn list_config_files_returns_conf_paths() {
    let host = FakeHost::new()
        .with_file("/etc/nginx/nginx.conf", "x")
        .with_file("/etc/nginx/sites-enabled/a.conf", "x")
        .with_file("/etc/nginx/mime.types", "x");
    let session = session(host);

    let files = session.list_config_files().await.unwrap();
    assert_eq!(
        files,
        vec![
            "/etc/nginx/nginx.conf".to_owned(),
            "/etc/nginx/sites-enabled/a.conf".to_owned(),
        ]
    );
}

#[tokio::test]
async fn service_status_reports_unit_state() {
    let session = session(FakeHost::new());

    let status = session.service_status().await.unwrap();
    assert!(status.active);
    assert_eq!(status.state, "active");
}
