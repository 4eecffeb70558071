//! `pipewatch trigger` — start a new pipeline execution.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;

use crate::client::{PipelineClient, TriggerRequest, github};
use crate::config::Config;
use crate::ui::ROCKET;

/// Trigger an execution, prompting for any required field not given as a
/// flag, then switch into the watch view unless `no_watch` is set.
pub async fn cmd_trigger(
    config: &Config,
    student: Option<String>,
    repo: Option<String>,
    branch: String,
    commit: Option<String>,
    no_watch: bool,
) -> Result<()> {
    let student = match student {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("Student name")
            .interact_text()
            .context("Failed to read student name")?,
    };
    let repo = match repo {
        Some(url) => url,
        None => Input::<String>::new()
            .with_prompt("GitHub repository URL")
            .interact_text()
            .context("Failed to read repository URL")?,
    };

    // Resolve the branch head so the execution record carries a commit
    // hash, the way the original trigger form did. Best effort only.
    let commit = match commit {
        Some(sha) => Some(sha),
        None => {
            let resolved = github::latest_commit_sha(&repo, &branch).await;
            if let Some(sha) = &resolved {
                tracing::debug!(%sha, "resolved branch head");
            }
            resolved
        }
    };

    let client = PipelineClient::new(&config.api_url);
    let request = TriggerRequest {
        student_name: student,
        repository_url: repo,
        branch_name: branch,
        commit_hash: commit,
    };
    let execution = client
        .trigger_execution(&request)
        .await
        .context("Failed to trigger pipeline")?;

    println!(
        "{}Pipeline triggered: build {} (execution id {})",
        ROCKET,
        style(execution.display_build()).green().bold(),
        execution.id
    );

    if no_watch {
        println!(
            "Follow it with: {}",
            style(format!("pipewatch watch {}", execution.id)).cyan()
        );
        return Ok(());
    }
    super::cmd_watch(config, execution.id).await
}
