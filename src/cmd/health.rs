//! `pipewatch health` — backend liveness probe.

use anyhow::Result;
use console::style;

use crate::client::PipelineClient;
use crate::config::Config;
use crate::ui::{CHECK, CROSS};

/// Probe the backend. Exits non-zero when it is unreachable or down, so
/// the command is usable from scripts.
pub async fn cmd_health(config: &Config) -> Result<()> {
    let client = PipelineClient::new(&config.api_url);
    match client.check_health().await {
        Ok(true) => {
            println!("{}Backend is {} at {}", CHECK, style("UP").green().bold(), config.api_url);
            Ok(())
        }
        Ok(false) => {
            println!("{}Backend at {} is {}", CROSS, config.api_url, style("DOWN").red().bold());
            std::process::exit(1);
        }
        Err(err) => {
            println!(
                "{}Backend at {} is unreachable: {}",
                CROSS,
                config.api_url,
                style(err).red()
            );
            std::process::exit(1);
        }
    }
}
