use crate::{prelude::Result, Error};
use ethers::types::U256;
use ethers::utils::parse_units;
use std::fmt;
use std::str::FromStr;

/// EVM networks the bridge routes touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Sepolia,
    Holesky,
    SeiTestnet,
    CornTestnet,
    BscTestnet,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Sepolia,
        Network::Holesky,
        Network::SeiTestnet,
        Network::CornTestnet,
        Network::BscTestnet,
    ];

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Sepolia => 11_155_111,
            Network::Holesky => 17_000,
            Network::SeiTestnet => 1328,
            Network::CornTestnet => 21_000_001,
            Network::BscTestnet => 97,
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Sepolia => "https://sepolia.drpc.org",
            Network::Holesky => "https://ethereum-holesky-rpc.publicnode.com",
            Network::SeiTestnet => "https://evm-rpc-testnet.sei-apis.com",
            Network::CornTestnet => "https://21000001.rpc.thirdweb.com",
            Network::BscTestnet => "https://bsc-testnet.public.blastapi.io",
        }
    }

    /// Environment variable that overrides [`Network::default_rpc_url`].
    pub fn rpc_env_var(&self) -> &'static str {
        match self {
            Network::Sepolia => "SEPOLIA_RPC_URL",
            Network::Holesky => "HOLESKY_RPC_URL",
            Network::SeiTestnet => "SEI_TESTNET_RPC_URL",
            Network::CornTestnet => "CORN_TESTNET_RPC_URL",
            Network::BscTestnet => "BSC_TESTNET_RPC_URL",
        }
    }

    pub fn native_symbol(&self) -> &'static str {
        match self {
            Network::Sepolia | Network::Holesky => "ETH",
            Network::SeiTestnet => "SEI",
            Network::CornTestnet => "BTCN",
            Network::BscTestnet => "tBNB",
        }
    }

    pub fn explorer_url(&self) -> &'static str {
        match self {
            Network::Sepolia => "https://sepolia.etherscan.io",
            Network::Holesky => "https://holesky.etherscan.io",
            Network::SeiTestnet => "https://seitrace.com",
            Network::CornTestnet => "https://testnet.cornscan.io",
            Network::BscTestnet => "https://testnet.bscscan.com",
        }
    }

    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url())
    }

    /// Priority fee used when the node does not report one
    pub fn fallback_priority_fee(&self) -> U256 {
        let gwei = match self {
            Network::Holesky => "2",
            _ => "1",
        };
        gwei_to_wei(gwei)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Sepolia => "sepolia",
            Network::Holesky => "holesky",
            Network::SeiTestnet => "sei",
            Network::CornTestnet => "corn",
            Network::BscTestnet => "bsc",
        }
    }
}

pub(crate) fn gwei_to_wei(gwei: &str) -> U256 {
    parse_units(gwei, "gwei")
        .map(Into::into)
        .unwrap_or_default()
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sepolia" => Ok(Network::Sepolia),
            "holesky" => Ok(Network::Holesky),
            "sei" | "sei-testnet" => Ok(Network::SeiTestnet),
            "corn" | "corn-testnet" => Ok(Network::CornTestnet),
            "bsc" | "bsc-testnet" => Ok(Network::BscTestnet),
            other => Err(Error::UnknownNetwork(other.to_string())),
        }
    }
}
