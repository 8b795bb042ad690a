//! Site command handlers.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use tabled::Tabled;

use nginsight_core::ssl::{ExpiryClass, expiry_status};
use nginsight_core::{ContentType, Session, SiteReport, SiteState};
use nginsight_host::LocalHost;

use crate::cli::{Ctx, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Docker")]
    docker: String,
    #[tabled(rename = "SSL Expiry")]
    ssl: String,
}

impl SiteRow {
    fn from_report(site: &SiteReport, now: DateTime<Utc>, colored: bool) -> Self {
        let code = site
            .status
            .http_code
            .map_or_else(|| "N/A".to_owned(), |c| c.to_string());
        let state = site.status.state.to_string();
        let state = if colored {
            match site.status.state {
                SiteState::Up => state.green().to_string(),
                SiteState::Down | SiteState::Error => state.red().to_string(),
            }
        } else {
            state
        };

        let (kind, target) = match site.content_type {
            ContentType::Proxy => ("Proxy", site.proxy.url.clone().unwrap_or_default()),
            ContentType::Static => (
                "Static",
                site.static_content.root_path.clone().unwrap_or_default(),
            ),
            ContentType::Unknown => ("Unknown", String::new()),
        };

        let docker = if site.docker.connected {
            site.docker.container.clone().unwrap_or_else(|| "-".into())
        } else {
            "-".into()
        };

        Self {
            status: format!("{state} ({code})"),
            domain: site.domain.clone(),
            title: site
                .status
                .page_title
                .clone()
                .unwrap_or_else(|| "-".into()),
            kind: kind.into(),
            target,
            docker,
            ssl: ssl_cell(site, now, colored),
        }
    }
}

/// SSL column: expiry date plus days left, classified ok/warning/critical.
fn ssl_cell(site: &SiteReport, now: DateTime<Utc>, colored: bool) -> String {
    if !site.ssl.enabled {
        return "disabled".into();
    }
    let Some(expiry) = site.ssl.expiry_date else {
        return "enabled".into();
    };

    let status = expiry_status(expiry, now);
    let text = format!(
        "{} ({} days, {})",
        expiry.format("%Y-%m-%d"),
        status.days_left,
        status.class
    );
    if colored {
        match status.class {
            ExpiryClass::Ok => text.green().to_string(),
            ExpiryClass::Warning => text.yellow().to_string(),
            ExpiryClass::Critical => text.red().to_string(),
        }
    } else {
        text
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(site: &SiteReport, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("Domain:       {}", site.domain),
        format!("Config file:  {}", dash_if_empty(&site.config_file)),
        format!("Listen port:  {}", dash_if_empty(&site.listen_port)),
        format!("Type:         {}", site.content_type),
    ];

    match site.content_type {
        ContentType::Proxy => {
            lines.push(format!(
                "Proxy target: {}",
                site.proxy.url.as_deref().unwrap_or("-")
            ));
        }
        ContentType::Static => {
            lines.push(format!(
                "Static root:  {}",
                site.static_content.root_path.as_deref().unwrap_or("-")
            ));
        }
        ContentType::Unknown => {}
    }

    lines.push(format!(
        "Status:       {} ({})",
        site.status.state,
        site.status
            .http_code
            .map_or_else(|| "N/A".to_owned(), |c| c.to_string())
    ));
    if let Some(ref title) = site.status.page_title {
        lines.push(format!("Page title:   {title}"));
    }
    if let Some(checked) = site.status.checked_at {
        lines.push(format!("Checked at:   {}", checked.to_rfc3339()));
    }

    lines.push(format!(
        "Docker:       {}",
        if site.docker.connected {
            site.docker.container.as_deref().unwrap_or("-")
        } else {
            "-"
        }
    ));

    if site.ssl.enabled {
        lines.push(format!("SSL:          {}", ssl_cell(site, now, false)));
        if let Some(ref path) = site.ssl.certificate_path {
            lines.push(format!("Certificate:  {path}"));
        }
        if let Some(ref domains) = site.ssl.certificate_domains {
            lines.push(format!("Cert domains: {domains}"));
        }
    } else {
        lines.push("SSL:          disabled".to_owned());
    }

    lines.join("\n")
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session<LocalHost>,
    args: SitesArgs,
    ctx: &Ctx,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List => {
            let doc = util::fetch_with_spinner(session, ctx).await?;
            let now = Utc::now();
            let colored = output::should_color(&ctx.color);
            let out = output::render_list(
                &ctx.output,
                &doc.nginx_sites,
                |s| SiteRow::from_report(s, now, colored),
                |s| s.domain.clone(),
            );
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        SitesCommand::Get { domain } => {
            let doc = util::fetch_with_spinner(session, ctx).await?;
            let site = doc
                .nginx_sites
                .iter()
                .find(|s| s.domain == domain)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "site".into(),
                    identifier: domain,
                    list_command: "sites list".into(),
                })?;
            let now = Utc::now();
            let out =
                output::render_single(&ctx.output, site, |s| detail(s, now), |s| s.domain.clone());
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use nginsight_core::SiteDataDocument;

    use super::SiteRow;

    const SCENARIO: &str = r#"{
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
    fn scenario_renders_proxy_row_with_expired_ssl() {
        let doc: SiteDataDocument = serde_json::from_str(SCENARIO).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let row = SiteRow::from_report(&doc.nginx_sites[0], now, false);

        assert_eq!(row.domain, "a.example.com");
        assert_eq!(row.status, "UP (200)");
        assert_eq!(row.kind, "Proxy");
        assert_eq!(row.target, "http://127.0.0.1:3000");
        assert_eq!(row.docker, "-");
        // Certificate expired months ago: negative days, critical class.
        assert!(row.ssl.contains("critical"), "{}", row.ssl);
        assert!(row.ssl.contains("2024-01-01"), "{}", row.ssl);
        assert!(row.ssl.contains("(-"), "{}", row.ssl);
    }

    #[test]
    fn expiry_windows_map_to_classes() {
        let mut doc: SiteDataDocument = serde_json::from_str(SCENARIO).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        for (days, expected) in [(10, "critical"), (20, "warning"), (40, "ok")] {
            doc.nginx_sites[0].ssl.expiry_date = Some(now + chrono::Duration::days(days));
            let row = SiteRow::from_report(&doc.nginx_sites[0], now, false);
            assert!(
                row.ssl.contains(expected),
                "{days} days should be {expected}: {}",
                row.ssl
            );
        }
    }

    #[test]
    fn disabled_ssl_and_unknown_type_render_placeholders() {
        let doc: SiteDataDocument = serde_json::from_str(
            r#"{"nginx_sites":[{"domain":"b.example.com"}],"statistics":{}}"#,
        )
        .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let row = SiteRow::from_report(&doc.nginx_sites[0], now, false);
        assert_eq!(row.ssl, "disabled");
        assert_eq!(row.kind, "Unknown");
        assert_eq!(row.target, "");
        assert_eq!(row.status, "ERROR (N/A)");
    }
}
