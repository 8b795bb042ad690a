//! Config file command handlers: list, show, edit, apply, test.

use nginsight_core::Session;
use nginsight_host::LocalHost;

use crate::cli::{ConfArgs, ConfCommand, Ctx, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session<LocalHost>,
    args: ConfArgs,
    ctx: &Ctx,
) -> Result<(), CliError> {
    match args.command {
        ConfCommand::List => {
            let files = session.list_config_files().await?;
            let out = match ctx.output {
                OutputFormat::Table => grouped(&files, &session.config().conf_root),
                OutputFormat::Json => serde_json::to_string_pretty(&files)
                    .unwrap_or_else(|e| format!("serialization error: {e}")),
                OutputFormat::JsonCompact => serde_json::to_string(&files)
                    .unwrap_or_else(|e| format!("serialization error: {e}")),
                OutputFormat::Yaml => serde_yaml::to_string(&files)
                    .unwrap_or_else(|e| format!("serialization error: {e}")),
                OutputFormat::Plain => files.join("\n"),
            };
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        ConfCommand::Show { path } => {
            let content = session.read_config(&path).await?;
            output::print_output(content.trim_end(), ctx.quiet);
            Ok(())
        }

        ConfCommand::Edit { path } => edit(session, &path, ctx).await,

        ConfCommand::Apply { path, from_file } => {
            let content = util::read_content(&from_file)?;
            apply_with_confirm(session, &path, &content, ctx).await
        }

        ConfCommand::Test { file } => {
            let report = match file {
                None => session.test_live().await?,
                Some(candidate) => {
                    let content = util::read_content(&candidate)?;
                    session.check_candidate(&content).await?
                }
            };
            if report.passed {
                output::print_output(&report.output, ctx.quiet);
                Ok(())
            } else {
                Err(CliError::TestFailed {
                    output: report.output,
                })
            }
        }
    }
}

// ── Edit flow ───────────────────────────────────────────────────────

/// Pull the file down, hand it to $EDITOR, and run the apply workflow on
/// the result. Unchanged content is a no-op.
async fn edit(session: &Session<LocalHost>, path: &str, ctx: &Ctx) -> Result<(), CliError> {
    let original = session.read_config(path).await?;

    let scratch = tempfile::Builder::new()
        .prefix("nginsight-edit-")
        .suffix(".conf")
        .tempfile()?;
    std::fs::write(scratch.path(), &original)?;

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".into());
    let status = std::process::Command::new(&editor)
        .arg(scratch.path())
        .status()
        .map_err(|e| CliError::Editor {
            editor: editor.clone(),
            detail: e.to_string(),
        })?;
    if !status.success() {
        return Err(CliError::Editor {
            editor,
            detail: format!("exited with {status}"),
        });
    }

    let edited = std::fs::read_to_string(scratch.path())?;
    if edited == original {
        if !ctx.quiet {
            eprintln!("No changes.");
        }
        return Ok(());
    }

    apply_with_confirm(session, path, &edited, ctx).await
}

async fn apply_with_confirm(
    session: &Session<LocalHost>,
    path: &str,
    content: &str,
    ctx: &Ctx,
) -> Result<(), CliError> {
    let service = &session.config().service;
    if !util::confirm(
        &format!("Apply changes to {path} and reload {service}?"),
        ctx.yes,
    )? {
        return Ok(());
    }

    let report = session.apply_config(path, content).await?;

    if !ctx.quiet {
        eprintln!("Applied {path} (backup at {})", report.backup_path);
        if !report.pruned_backups.is_empty() {
            eprintln!("Pruned {} old backup(s)", report.pruned_backups.len());
        }
    }
    Ok(())
}

// ── Grouped listing ─────────────────────────────────────────────────

/// Group config files by tree section: the main nginx.conf first, then
/// sites-available, sites-enabled, and the rest.
fn grouped(files: &[String], conf_root: &str) -> String {
    let main_conf = format!("{conf_root}/nginx.conf");
    let mut sections: Vec<(&str, Vec<&str>)> = vec![
        ("Main", Vec::new()),
        ("Sites Available", Vec::new()),
        ("Sites Enabled", Vec::new()),
        ("Other", Vec::new()),
    ];

    for file in files {
        let slot = if *file == main_conf {
            0
        } else if file.contains("/sites-available/") {
            1
        } else if file.contains("/sites-enabled/") {
            2
        } else {
            3
        };
        sections[slot].1.push(file);
    }

    let mut out = String::new();
    for (title, entries) in sections {
        if entries.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(title);
        out.push('\n');
        for entry in entries {
            out.push_str("  ");
            out.push_str(entry);
            out.push('\n');
        }
    }
    out.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::grouped;

    #[test]
    fn groups_files_by_tree_section() {
        let files = vec![
            "/etc/nginx/conf.d/gzip.conf".to_owned(),
            "/etc/nginx/nginx.conf".to_owned(),
            "/etc/nginx/sites-available/a.conf".to_owned(),
            "/etc/nginx/sites-enabled/a.conf".to_owned(),
        ];

        let text = grouped(&files, "/etc/nginx");
        assert_eq!(
            text,
            "Main\n  /etc/nginx/nginx.conf\n\
             \nSites Available\n  /etc/nginx/sites-available/a.conf\n\
             \nSites Enabled\n  /etc/nginx/sites-enabled/a.conf\n\
             \nOther\n  /etc/nginx/conf.d/gzip.conf"
        );
    }

    #[test]
    fn empty_sections_are_omitted() {
        let files = vec!["/etc/nginx/nginx.conf".to_owned()];
        assert_eq!(grouped(&files, "/etc/nginx"), "Main\n  /etc/nginx/nginx.conf");
    }
}
