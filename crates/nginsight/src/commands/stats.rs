//! Scan-wide summary statistics handler.

use tabled::Tabled;

use nginsight_core::{Session, SummaryStatistics};
use nginsight_host::LocalHost;

use crate::cli::Ctx;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn rows(stats: &SummaryStatistics) -> Vec<StatRow> {
    vec![
        StatRow {
            metric: "Total Sites",
            value: stats.total_sites.to_string(),
        },
        StatRow {
            metric: "SSL Enabled",
            value: stats.ssl_enabled_sites.to_string(),
        },
        StatRow {
            metric: "Nginx Status",
            value: stats.nginx_status.clone(),
        },
        StatRow {
            metric: "Docker Containers",
            value: stats.docker_containers_running.to_string(),
        },
        StatRow {
            metric: "Scan Date",
            value: stats
                .scan_date
                .map_or_else(|| "-".to_owned(), |d| d.to_rfc3339()),
        },
    ]
}

fn plain(stats: &SummaryStatistics) -> String {
    rows(stats)
        .into_iter()
        .map(|r| format!("{}={}", r.metric.to_lowercase().replace(' ', "_"), r.value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(session: &Session<LocalHost>, ctx: &Ctx) -> Result<(), CliError> {
    let doc = util::fetch_with_spinner(session, ctx).await?;

    let out = output::render_single(
        &ctx.output,
        &doc.statistics,
        |stats| {
            tabled::Table::new(rows(stats))
                .with(tabled::settings::Style::rounded())
                .to_string()
        },
        plain,
    );
    output::print_output(&out, ctx.quiet);
    Ok(())
}
