//! `pipewatch watch <id>` — live detail view of one execution.

use std::sync::Arc;

use anyhow::Result;
use console::style;

use crate::client::{PipelineClient, TestResult};
use crate::config::Config;
use crate::poll::{PollEvent, PollingController, Subject};
use crate::ui::{self, CHECK, CROSS, StageBoard};

/// Poll one execution on the detail cadence until it reaches a terminal
/// status, the backend reports it missing, or the operator hits Ctrl-C.
pub async fn cmd_watch(config: &Config, id: i64) -> Result<()> {
    let client = Arc::new(PipelineClient::new(&config.api_url));
    let controller = PollingController::new(client.clone());
    let mut sub = controller.subscribe(Subject::Execution(id), config.detail_interval);

    let board = StageBoard::new();
    let mut last_results: Vec<TestResult> = Vec::new();
    let mut final_record = None;

    loop {
        let event = tokio::select! {
            event = sub.next_event() => event,
            _ = tokio::signal::ctrl_c() => {
                sub.unsubscribe().await;
                board.print_line(format!("{}", style("Stopped watching.").dim()));
                return Ok(());
            }
        };
        match event {
            Some(PollEvent::Update(record)) => {
                if record.has_tests() {
                    // Results may lag the execution record; keep whatever
                    // we managed to fetch last.
                    match client.get_test_results(id).await {
                        Ok(results) if !results.is_empty() => last_results = results,
                        Ok(_) => {}
                        Err(err) => tracing::debug!(error = %err, "test results not ready"),
                    }
                }
                if record.is_terminal() {
                    board.finish(&record);
                    final_record = Some(record);
                } else {
                    board.update(&record);
                }
            }
            Some(PollEvent::Stale(err)) => {
                board.print_line(format!(
                    "{} {}",
                    style("stale:").yellow().bold(),
                    style(format!("{} (still polling)", err)).dim()
                ));
            }
            Some(PollEvent::Gone(id)) => {
                board.print_line(format!("{}Execution {} not found", CROSS, id));
                break;
            }
            Some(PollEvent::Snapshot(_)) => {
                // Not produced for a detail subject.
            }
            // Channel closed: the poller stopped after a terminal update.
            None => break,
        }
    }

    if let Some(record) = final_record {
        let icon = if record.status_kind() == crate::status::StatusKind::Success {
            CHECK
        } else {
            CROSS
        };
        println!(
            "\n{}Build {} finished: {}",
            icon,
            record.display_build(),
            crate::status::badge(Some(&record.status))
        );
        if record.has_tests() {
            println!(
                "\n{}",
                style(format!(
                    "Tests: {} total, {} passed, {} failed",
                    record.total_tests.unwrap_or(0),
                    record.tests_passed(),
                    record.tests_failed()
                ))
                .bold()
            );
            println!("{}", ui::render_test_results(&last_results));
        }
        if let Some(message) = &record.error_message {
            println!("\n{} {}", style("Error:").red().bold(), message);
        }
    }
    Ok(())
}
