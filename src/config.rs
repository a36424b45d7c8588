use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::selection::AddAccountStrategy;
use crate::domain::wallet::DEFAULT_PASSWORD;

/// Available networks: (key, display name, API URL).
pub const NETWORKS: [(&str, &str, &str); 3] = [
    ("mainnet", "Stacks Mainnet", "https://stacks-node-api.mainnet.stacks.co"),
    ("testnet", "Stacks Testnet", "https://stacks-node-api.testnet.stacks.co"),
    ("localhost", "Localhost", "http://localhost:3999"),
];

pub const DEFAULT_NETWORK: &str = "mainnet";

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("STACKS_WALLET_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("co", "stacks", "stacks-wallet") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    /// Route "Add a new account" through username registration.
    pub usernames_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_network(DEFAULT_NETWORK)
    }
}

impl Config {
    /// Create config from CLI args.
    pub fn new(network: &str, url: Option<&str>, usernames_enabled: bool) -> Self {
        let mut config = Self::from_network(network);
        if let Some(url) = url {
            config.network.url = url.to_string();
        }
        config.usernames_enabled = usernames_enabled;
        config
    }

    /// Preset for a network key. Unknown keys fall back to mainnet.
    pub fn from_network(network: &str) -> Self {
        let (name, _, url) = NETWORKS
            .iter()
            .find(|(name, _, _)| *name == network)
            .copied()
            .unwrap_or(NETWORKS[0]);
        Self {
            network: NetworkConfig {
                name: name.to_string(),
                url: url.to_string(),
            },
            usernames_enabled: false,
        }
    }

    /// Switch network, keeping the rest of the config.
    pub fn with_network(&self, network: &str) -> Self {
        Self {
            network: Self::from_network(network).network,
            usernames_enabled: self.usernames_enabled,
        }
    }

    pub fn add_account_strategy(&self) -> AddAccountStrategy {
        AddAccountStrategy::from_usernames_enabled(self.usernames_enabled, DEFAULT_PASSWORD)
    }
}
