use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, value_name = "Path to a yaml config file")]
    pub config: Option<String>,

    #[arg(short, long, value_name = "Path to the chia ssl folder")]
    pub ssl_path: Option<String>,

    #[arg(long, value_name = "Fullnode Hostname")]
    pub fullnode_host: Option<String>,
    #[arg(long, value_name = "Fullnode Port")]
    pub fullnode_port: Option<u16>,
    #[arg(long, value_name = "Request timeout in seconds")]
    pub timeout: Option<u64>,
    #[arg(short, long, value_name = "Selected Network")]
    pub network: Option<String>,
    #[arg(long, value_name = "Parallel lookups against the fullnode")]
    pub max_concurrent_lookups: Option<usize>,

    #[command(subcommand)]
    pub action: RootCommands,
}

#[derive(Debug, Subcommand)]
pub enum RootCommands {
    #[command(about = "Reconstructs the send and receive history of an address", long_about = None)]
    History {
        #[arg(short, long)]
        address: String,
        #[arg(long, help = "Order events by block height instead of discovery order")]
        chronological: bool,
    },
    #[command(about = "Lists the unspent coins of an address", long_about = None)]
    Utxos {
        #[arg(short, long)]
        address: String,
    },
    #[command(about = "Sums the unspent coins of an address", long_about = None)]
    Balance {
        #[arg(short, long)]
        address: String,
    },
    #[command(about = "Checks the fullnode connection and prints its peak", long_about = None)]
    Status,
}
