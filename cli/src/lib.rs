use crate::cli::{Cli, RootCommands};
use clap::Parser;
use kiwi_clients::api::full_node::FullnodeAPI;
use kiwi_clients::rpc::full_node::{FullnodeClient, DEFAULT_TIMEOUT_SECS};
use kiwi_core::config::HistoryConfig;
use kiwi_history::coins::{balance, unspent_coins};
use kiwi_history::{reconstruct_history, HistoryOptions};
use log::{info, warn, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::env;
use std::io::{Error, ErrorKind};

pub mod cli;

/// Reads the config file named by `--config` or `CONFIG_PATH` and applies the
/// command line overrides on top of it.
pub fn load_config(cli: &Cli) -> Result<HistoryConfig, Error> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| env::var("CONFIG_PATH").unwrap_or_else(|_| "./kiwi.yaml".to_string()));
    let mut config = HistoryConfig::load_or_default(&path)?;
    if let Some(host) = &cli.fullnode_host {
        config.full_node_hostname = host.clone();
    }
    if let Some(port) = cli.fullnode_port {
        config.full_node_rpc_port = port;
    }
    if let Some(ssl_path) = &cli.ssl_path {
        config.full_node_ssl = Some(ssl_path.clone());
    }
    if let Some(network) = &cli.network {
        config.selected_network = network.clone();
    }
    if let Some(limit) = cli.max_concurrent_lookups {
        config.max_concurrent_lookups = limit;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::new(ErrorKind::InvalidData, format!("{e:?}")))?;
    println!("{json}");
    Ok(())
}

pub async fn run_cli() -> Result<(), Error> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .unwrap_or_default();
    let config = load_config(&cli)?;
    let options = HistoryOptions::try_from(&config)?;
    let client = FullnodeClient::new(
        &config.full_node_hostname,
        config.full_node_rpc_port,
        cli.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        config.full_node_ssl.clone(),
        &config.additional_headers,
    )?;
    match cli.action {
        RootCommands::History {
            address,
            chronological,
        } => {
            let history = reconstruct_history(&client, &address, &options).await?;
            for failure in &history.lookup_failures {
                warn!("Incomplete history, {failure}");
            }
            if chronological {
                print_json(&history.sorted())?;
            } else {
                print_json(&history)?;
            }
        }
        RootCommands::Utxos { address } => {
            print_json(&unspent_coins(&client, &address, &options).await?)?;
        }
        RootCommands::Balance { address } => {
            print_json(&balance(&client, &address, &options).await?)?;
        }
        RootCommands::Status => {
            let state = client.get_blockchain_state().await?;
            info!(
                "Connected to {}:{} on {}, peak: {:?}, synced: {}",
                config.full_node_hostname,
                config.full_node_rpc_port,
                config.selected_network,
                state.peak_height(),
                state.sync.synced
            );
            print_json(&state)?;
        }
    }
    Ok(())
}
