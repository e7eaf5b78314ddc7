//! vcf-tasks: wait for a VCF control-plane task from the command line.
//!
//! Polls the task until it finishes and mirrors sub-task progress to the log.
//! Ctrl-C or `--timeout` abandon the wait.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vcf_tasks::{ClientConfig, TaskTracker, TrackerError, VcfClient};

/// Exit status reported when the wait was cancelled (128 + SIGINT).
const EXIT_CANCELLED: u8 = 130;

/// VCF task tracker
#[derive(Parser, Debug)]
#[command(name = "vcf-tasks", version, about)]
struct Cli {
    /// VCF API endpoint (e.g., https://sddc-manager.example.com)
    #[arg(long, env = "VCF_API_ENDPOINT", default_value = "https://localhost")]
    api_endpoint: String,

    /// API bearer token
    #[arg(long, env = "VCF_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, env = "VCF_INSECURE")]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Wait for a task to finish
    Wait {
        /// Task ID
        task_id: String,

        /// Seconds between status queries
        #[arg(long, default_value = "20", value_parser = clap::value_parser!(u64).range(1..))]
        poll_interval: u64,

        /// Seconds before a single status query is abandoned
        #[arg(long, default_value = "120", value_parser = clap::value_parser!(u64).range(1..))]
        query_timeout: u64,

        /// Give up after this many seconds (0 = wait indefinitely)
        #[arg(short, long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vcf_tasks=info,reqwest=warn,hyper=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let cancelled = e
                .downcast_ref::<TrackerError>()
                .is_some_and(TrackerError::is_cancelled);
            if cancelled {
                warn!("{:#}", e);
                ExitCode::from(EXIT_CANCELLED)
            } else {
                error!("{:#}", e);
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = VcfClient::new(ClientConfig {
        api_endpoint: cli.api_endpoint,
        token: cli.token,
        accept_invalid_certs: cli.insecure,
        ..Default::default()
    })
    .context("Failed to create VCF client")?;

    match cli.command {
        Commands::Wait {
            task_id,
            poll_interval,
            query_timeout,
            timeout,
        } => {
            let deadline = timeout.filter(|secs| *secs > 0).map(Duration::from_secs);
            wait(client, task_id, poll_interval, query_timeout, deadline).await
        }
    }
}

async fn wait(
    client: VcfClient,
    task_id: String,
    poll_interval: u64,
    query_timeout: u64,
    deadline: Option<Duration>,
) -> Result<()> {
    info!(
        "Waiting for task {} on {} (poll every {}s)",
        task_id,
        client.base_url(),
        poll_interval
    );

    let cancel = CancellationToken::new();
    let tracker = TaskTracker::with_polling_interval(
        client,
        task_id,
        cancel.clone(),
        Duration::from_secs(poll_interval),
    )?
    .with_query_timeout(Duration::from_secs(query_timeout));

    let watcher = tokio::spawn(async move {
        let expired = async {
            match deadline {
                Some(d) => tokio::time::sleep(d).await,
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => info!("Interrupted, cancelling wait"),
            _ = expired => warn!("Deadline reached, cancelling wait"),
        }
        cancel.cancel();
    });

    let result = tracker.wait().await;
    watcher.abort();
    result?;

    Ok(())
}
