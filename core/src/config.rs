use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

fn full_node_hostname() -> String {
    "localhost".to_string()
}
const fn full_node_rpc_port() -> u16 {
    8555
}
fn selected_network() -> String {
    "mainnet".to_string()
}
fn network_overrides() -> HashMap<String, NetworkOverride> {
    HashMap::from([
        ("mainnet".to_string(), NetworkOverride::new("xch")),
        ("testnet10".to_string(), NetworkOverride::new("txch")),
        ("testnet11".to_string(), NetworkOverride::new("txch")),
    ])
}
const fn max_concurrent_lookups() -> usize {
    16
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkOverride {
    pub address_prefix: String,
}
impl NetworkOverride {
    pub fn new(address_prefix: &str) -> Self {
        Self {
            address_prefix: address_prefix.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "full_node_hostname")]
    pub full_node_hostname: String,
    #[serde(default = "full_node_rpc_port")]
    pub full_node_rpc_port: u16,
    /// Path to the chia `ssl` directory holding `full_node/private_full_node.{crt,key}`.
    #[serde(default)]
    pub full_node_ssl: Option<String>,
    #[serde(default)]
    pub additional_headers: Option<HashMap<String, String>>,
    #[serde(default = "selected_network")]
    pub selected_network: String,
    #[serde(default = "network_overrides")]
    pub network_overrides: HashMap<String, NetworkOverride>,
    #[serde(default = "max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
}

impl HistoryConfig {
    pub fn address_prefix(&self) -> Result<&str, Error> {
        self.network_overrides
            .get(&self.selected_network)
            .map(|o| o.address_prefix.as_str())
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::NotFound,
                    format!(
                        "No address prefix configured for network {}",
                        self.selected_network
                    ),
                )
            })
    }

    /// Loads the file at `path`, falling back to defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if path.exists() {
            Self::try_from(path)
        } else {
            warn!("No Config Found at {path:?}, will use default");
            Ok(Self::default())
        }
    }

    pub fn save_as_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        fs::write(
            path.as_ref(),
            serde_yaml::to_string(&self).map_err(|e| Error::new(ErrorKind::Other, format!("{e:?}")))?,
        )
    }
}

impl TryFrom<&Path> for HistoryConfig {
    type Error = Error;
    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        serde_yaml::from_str::<HistoryConfig>(&fs::read_to_string(value)?)
            .map_err(|e| Error::new(ErrorKind::InvalidData, format!("{e:?}")))
    }
}
impl TryFrom<&PathBuf> for HistoryConfig {
    type Error = Error;
    fn try_from(value: &PathBuf) -> Result<Self, Self::Error> {
        Self::try_from(value.as_path())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            full_node_hostname: full_node_hostname(),
            full_node_rpc_port: full_node_rpc_port(),
            full_node_ssl: None,
            additional_headers: None,
            selected_network: selected_network(),
            network_overrides: network_overrides(),
            max_concurrent_lookups: max_concurrent_lookups(),
        }
    }
}
