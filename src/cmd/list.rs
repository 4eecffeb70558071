//! `pipewatch list` — one-shot execution listing.

use anyhow::{Context, Result};
use console::style;

use crate::client::PipelineClient;
use crate::config::Config;
use crate::summary::summarize;
use crate::ui;

pub async fn cmd_list(config: &Config, student: Option<String>) -> Result<()> {
    let client = PipelineClient::new(&config.api_url);
    let records = match &student {
        Some(name) => client
            .executions_by_student(name)
            .await
            .with_context(|| format!("Failed to fetch executions for {}", name))?,
        None => client
            .list_executions()
            .await
            .context("Failed to fetch executions")?,
    };

    if let Some(name) = &student {
        println!("{}\n", style(format!("Executions for {}", name)).bold());
    }
    println!("{}\n", ui::render_summary(&summarize(&records)));
    println!("{}", ui::render_execution_table(&records));
    Ok(())
}
