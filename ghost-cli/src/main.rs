//! ghost — remote-control CLI for the event recorder.
//!
//! ```text
//! ghost play                 Replay the recorded event log
//! ghost step                 Replay a single event
//! ghost rec                  Start recording
//! ghost stop                 Stop recording
//! ghost get [FILE]           Download the event log (default ghoststream.json)
//! ghost set [FILE]           Upload an event log
//! ghost ver                  Print local and remote versions
//! ```

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ghost_core::{ClientConfig, GhostClient, WireFormat};

use crate::config::CliConfig;

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ghost", about = "Remote-control client for the event recorder", version)]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "ghost.toml")]
    config: PathBuf,

    /// Remote host (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Remote port (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Speak the legacy text framing instead of the binary header.
    #[arg(long)]
    legacy: bool,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    gen_config: bool,

    #[command(subcommand)]
    command: Option<Action>,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Replay the recorded event log on the remote.
    Play,
    /// Replay a single event.
    Step,
    /// Start recording.
    Rec,
    /// Stop recording.
    Stop,
    /// Download the recorded event log.
    Get {
        /// Destination file (default from config).
        file: Option<PathBuf>,
    },
    /// Upload an event log.
    Set {
        /// Source file (default from config).
        file: Option<PathBuf>,
    },
    /// Print local and remote versions.
    Ver,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.gen_config {
        let text = toml::to_string_pretty(&CliConfig::default())?;
        println!("{text}");
        return Ok(());
    }

    let mut config = CliConfig::load(&cli.config);
    if let Some(host) = cli.host {
        config.network.host = host;
    }
    if let Some(port) = cli.port {
        config.network.port = port;
    }
    if cli.legacy {
        config.network.wire = "legacy".into();
    }

    // Init tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let action = cli
        .command
        .context("no command given; try `ghost --help`")?;

    let wire: WireFormat = config
        .network
        .wire
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let client_config = ClientConfig::default()
        .with_connect_timeout(Duration::from_millis(config.network.connect_timeout_ms))
        .with_exchange_timeout(Duration::from_millis(config.network.exchange_timeout_ms))
        .with_wire(wire)
        .with_validate_json(config.transfer.validate_json);

    let host = config.network.host.clone();
    let port = config.network.port;
    let mut client = GhostClient::connect(&host, port, client_config)
        .await
        .with_context(|| format!("cannot reach recorder at {host}:{port}"))?;
    debug!(?action, "dispatching");

    let default_file = PathBuf::from(&config.transfer.file);
    match action {
        Action::Play => client.play().await?,
        Action::Step => client.step().await?,
        Action::Rec => client.record().await?,
        Action::Stop => client.stop_record().await?,
        Action::Get { file } => {
            let path = file.unwrap_or(default_file);
            client.get_json(&path).await?;
            println!("saved event log to {}", path.display());
        }
        Action::Set { file } => {
            let path = file.unwrap_or(default_file);
            client.set_json(&path).await?;
            println!("sent event log from {}", path.display());
        }
        Action::Ver => {
            let remote = client.remote_version().await?;
            println!("local: {}  remote: {}", GhostClient::local_version(), remote);
        }
    }

    client.disconnect().await?;
    Ok(())
}
