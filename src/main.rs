use std::path::PathBuf;

use clap::Parser;
use colored::*;
use log::error;

use nervix_delegator::{logging, Delegator, DelegatorConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the Nervix task-source API
    #[arg(short, long)]
    api_url: Option<String>,

    /// Path to the fleet status snapshot file
    #[arg(short, long)]
    fleet_file: Option<PathBuf>,

    /// Path to the assignment history file
    #[arg(short = 's', long)]
    assignments_file: Option<PathBuf>,

    /// Maximum number of tasks to delegate this cycle
    #[arg(short, long)]
    max_tasks: Option<usize>,

    /// Print the delegation status without running a cycle
    #[arg(long)]
    status: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let mut config = match DelegatorConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".bright_red(), e);
            return std::process::ExitCode::FAILURE;
        }
    };

    // CLI flags override the config file.
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(fleet_file) = cli.fleet_file {
        config.fleet_file = fleet_file;
    }
    if let Some(assignments_file) = cli.assignments_file {
        config.assignments_file = assignments_file;
    }
    let max_tasks = cli.max_tasks.unwrap_or(config.max_tasks_per_cycle);

    let mut delegator = match Delegator::new(config).await {
        Ok(delegator) => delegator,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".bright_red(), e);
            return std::process::ExitCode::FAILURE;
        }
    };

    if !cli.status {
        // Remote failures are already degraded inside the cycle; only a
        // failed store write lands here, and the run still reports status.
        if let Err(e) = delegator.delegate_tasks(max_tasks).await {
            error!("Failed to persist delegation state: {}", e);
        }
    }

    delegator.print_status().await;
    std::process::ExitCode::SUCCESS
}
