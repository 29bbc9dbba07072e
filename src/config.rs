use crate::{
    consts::{UNION_DASHBOARD_URL, UNION_GRAPHQL_URL},
    indexer::PollSettings,
    prelude::Result,
    Error, Network,
};
use ethers::signers::LocalWallet;
use std::env;
use std::time::Duration;

/// Settings read from the environment (and a `.env` file, when present).
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub graphql_url: String,
    pub dashboard_url: String,
    pub poll: PollSettings,
}

fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    var(name)
        .map(|value| {
            value
                .parse()
                .map_err(|_| Error::GenericParse(format!("{name}={value:?} is not a valid number")))
        })
        .transpose()
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let defaults = PollSettings::default();
        let poll = PollSettings {
            retries: parse_var("PACKET_POLL_RETRIES")?.unwrap_or(defaults.retries),
            interval: parse_var::<u64>("PACKET_POLL_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.interval),
        };
        Ok(BotConfig {
            graphql_url: var("UNION_GRAPHQL_URL").unwrap_or_else(|| UNION_GRAPHQL_URL.to_string()),
            dashboard_url: var("UNION_DASHBOARD_URL")
                .unwrap_or_else(|| UNION_DASHBOARD_URL.to_string()),
            poll,
        })
    }

    pub fn rpc_url(&self, network: Network) -> String {
        var(network.rpc_env_var()).unwrap_or_else(|| network.default_rpc_url().to_string())
    }

    pub fn wallet(&self) -> Result<LocalWallet> {
        let key = var("PRIVATE_KEY").ok_or_else(|| Error::ConfigMissing("PRIVATE_KEY".to_string()))?;
        parse_private_key(&key)
    }

    pub fn jwt(&self) -> Result<String> {
        var("UNION_JWT").ok_or_else(|| Error::ConfigMissing("UNION_JWT".to_string()))
    }
}

/// Accepts 64 hex characters with or without a `0x` prefix.
pub fn parse_private_key(key: &str) -> Result<LocalWallet> {
    let key = key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::PrivateKeyParse(
            "expected 32 bytes of hex".to_string(),
        ));
    }
    key.parse()
        .map_err(|e: ethers::signers::WalletError| Error::PrivateKeyParse(e.to_string()))
}
