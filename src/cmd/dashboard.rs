//! `pipewatch dashboard` — live list view of all executions.

use std::sync::Arc;

use anyhow::Result;
use console::{Term, style};

use crate::client::{CommitEntry, PipelineClient};
use crate::config::Config;
use crate::poll::{PollEvent, PollingController, Subject};
use crate::summary::summarize;
use crate::ui;

/// Poll the full execution list on the list cadence until Ctrl-C,
/// redrawing the summary strip, the execution table, and (when a
/// repository is given) the recent-commits panel.
pub async fn cmd_dashboard(config: &Config, repo: Option<String>) -> Result<()> {
    let client = Arc::new(PipelineClient::new(&config.api_url));
    let controller = PollingController::new(client.clone());
    let mut sub = controller.subscribe(Subject::AllExecutions, config.list_interval);

    // Commit history is auxiliary: fetched once, absent on any failure.
    let commits: Vec<CommitEntry> = match &repo {
        Some(repo_url) => match client.recent_commits(repo_url).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(error = %err, "commit history unavailable");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let term = Term::stdout();
    let mut stale_notice: Option<String> = None;

    loop {
        let event = tokio::select! {
            event = sub.next_event() => event,
            _ = tokio::signal::ctrl_c() => {
                sub.unsubscribe().await;
                println!("{}", style("Dashboard closed.").dim());
                return Ok(());
            }
        };
        match event {
            Some(PollEvent::Snapshot(records)) => {
                stale_notice = None;
                term.clear_screen().ok();
                println!("{}", style("Pipeline Dashboard").bold());
                println!(
                    "{}\n",
                    style(format!("backend: {}", config.api_url)).dim()
                );
                println!("{}\n", ui::render_summary(&summarize(&records)));
                println!("{}", ui::render_execution_table(&records));
                if repo.is_some() {
                    println!("\n{}", style("Recent commits").bold());
                    println!("{}", ui::render_commits(&commits));
                }
                println!(
                    "\n{}",
                    style(format!(
                        "refreshing every {}s — Ctrl-C to exit",
                        config.list_interval.as_secs()
                    ))
                    .dim()
                );
            }
            Some(PollEvent::Stale(err)) => {
                // Keep the last table on screen; just flag the staleness.
                let notice = format!(
                    "{} {}",
                    style("backend unreachable:").yellow().bold(),
                    style(format!("{} — data may be stale, retrying", err)).dim()
                );
                if stale_notice.as_deref() != Some(notice.as_str()) {
                    println!("{}", notice);
                    stale_notice = Some(notice);
                }
            }
            Some(PollEvent::Update(_)) | Some(PollEvent::Gone(_)) => {
                // Not produced for a list subject.
            }
            None => break,
        }
    }
    Ok(())
}
