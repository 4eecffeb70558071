use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pipewatch::cmd;
use pipewatch::config::Config;

#[derive(Parser)]
#[command(name = "pipewatch")]
#[command(version, about = "Terminal monitoring console for a CI/CD pipeline runner")]
pub struct Cli {
    /// Verbose logging (debug-level for pipewatch modules)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides PIPEWATCH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trigger a new pipeline execution and watch it
    Trigger {
        /// Student/developer name (prompted when omitted)
        #[arg(short, long)]
        student: Option<String>,

        /// GitHub repository URL (prompted when omitted)
        #[arg(short, long)]
        repo: Option<String>,

        /// Branch to build
        #[arg(short, long, default_value = "main")]
        branch: String,

        /// Commit SHA to record (resolved from GitHub when omitted)
        #[arg(long)]
        commit: Option<String>,

        /// Print the execution id and exit instead of watching
        #[arg(long)]
        no_watch: bool,
    },
    /// Watch one execution until it reaches a terminal state
    Watch {
        /// Execution id
        id: i64,
    },
    /// Live dashboard of all executions
    Dashboard {
        /// Repository URL for the recent-commits panel
        #[arg(short, long)]
        repo: Option<String>,
    },
    /// One-shot listing of executions
    List {
        /// Only executions triggered by this student
        #[arg(short, long)]
        student: Option<String>,
    },
    /// Check backend liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "pipewatch=debug" } else { "pipewatch=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env(cli.api_url.as_deref());

    match cli.command {
        Commands::Trigger {
            student,
            repo,
            branch,
            commit,
            no_watch,
        } => cmd::cmd_trigger(&config, student, repo, branch, commit, no_watch).await?,
        Commands::Watch { id } => cmd::cmd_watch(&config, id).await?,
        Commands::Dashboard { repo } => cmd::cmd_dashboard(&config, repo).await?,
        Commands::List { student } => cmd::cmd_list(&config, student).await?,
        Commands::Health => cmd::cmd_health(&config).await?,
    }

    Ok(())
}
