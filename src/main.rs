//! Strictly Othello - CLI client
//!
//! Plays against a remote authority over TCP.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_othello::{print_subscriber, run_relay, ClientConfig, GameSession};
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Connect { addr, quiet } => {
            let show_board = *config.render() && !quiet;
            let config = match addr {
                Some(addr) => config.with_server_addr(addr),
                None => config,
            };
            run_connect(config.with_render(show_board)).await
        }
    }
}

/// Play a match against a TCP authority
#[instrument(skip(config), fields(addr = %config.server_addr()))]
async fn run_connect(config: ClientConfig) -> Result<()> {
    info!("Connecting to authority");
    let stream = TcpStream::connect(config.server_addr().as_str())
        .await
        .with_context(|| format!("Failed to connect to {}", config.server_addr()))?;
    let (reader, writer) = stream.into_split();

    let (tx, mut rx) = unbounded_channel();
    let mut session = GameSession::new(*config.event_log_capacity(), tx);
    if *config.render() {
        session.subscribe(print_subscriber());
    }

    println!("Commands: preview X Y | undo | commit | show | hide | quit");
    let exit = run_relay(
        &mut session,
        &mut rx,
        BufReader::new(reader),
        BufReader::new(tokio::io::stdin()),
        writer,
    )
    .await?;

    info!(%exit, "Session ended");
    Ok(())
}

