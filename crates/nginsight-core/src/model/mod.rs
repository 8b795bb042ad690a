// ── Site data model ──
//
// The document the helper script emits, parsed into typed form. It is
// replaced wholesale on every scan, never mutated field-by-field, so all
// types here are plain data with no interior state.

mod site;
mod stats;

pub use site::{
    ContentType, DockerInfo, ProxyInfo, SiteReport, SiteState, SslInfo, StaticInfo, StatusInfo,
};
pub use stats::SummaryStatistics;

use serde::{Deserialize, Serialize};

/// One complete scan result: every discovered virtual host plus the
/// summary statistics the helper computed alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDataDocument {
    #[serde(default)]
    pub nginx_sites: Vec<SiteReport>,
    #[serde(default)]
    pub statistics: SummaryStatistics,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::SiteDataDocument;

    const SPARSE: &str = r#"{
        "nginx_sites": [{
            "domain": "a.example.com",
            "ssl": {"enabled": true, "expiry_date": "2024-01-01T00:00:00Z"},
            "status": {"state": "UP", "http_code": 200},
            "content_type": "proxy",
            "proxy": {"url": "http://127.0.0.1:3000"},
            "docker": {"connected": false}
        }],
        "statistics": {
            "total_sites": 1,
            "ssl_enabled_sites": 1,
            "nginx_status": "active",
            "docker_containers_running": 0,
            "scan_date": "2024-01-01T00:00:00Z"
        }
    }"#;

    #[test]
    fn sparse_document_parses_with_defaults() {
        let doc: SiteDataDocument = serde_json::from_str(SPARSE).unwrap();
        assert_eq!(doc.nginx_sites.len(), 1);

        let site = &doc.nginx_sites[0];
        assert_eq!(site.domain, "a.example.com");
        assert_eq!(site.config_file, "");
        assert!(site.ssl.enabled);
        assert_eq!(site.proxy.url.as_deref(), Some("http://127.0.0.1:3000"));
        assert!(!site.static_content.enabled);
        assert_eq!(site.status.http_code, Some(200));
        assert!(site.status.checked_at.is_none());

        assert_eq!(doc.statistics.total_sites, 1);
        assert_eq!(doc.statistics.nginx_status, "active");
    }

    #[test]
    fn parse_is_a_structural_round_trip() {
        let doc: SiteDataDocument = serde_json::from_str(SPARSE).unwrap();
        let serialized = serde_json::to_string(&doc).unwrap();
        let reparsed: SiteDataDocument = serde_json::from_str(&serialized).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn unknown_enum_values_fall_back() {
        let doc: SiteDataDocument = serde_json::from_str(
            r#"{"nginx_sites":[{"domain":"x","content_type":"weird","status":{"state":"FLAKY"}}],"statistics":{}}"#,
        )
        .unwrap();
        let site = &doc.nginx_sites[0];
        assert_eq!(site.content_type, super::ContentType::Unknown);
        assert_eq!(site.status.state, super::SiteState::Error);
    }
}
