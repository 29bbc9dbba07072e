//! Route registry: one entry per source chain, destination chain and asset.

mod registry;

use crate::{consts::UNION_CONTRACT_ADDRESS, payload::PayloadTemplate, prelude::Result, Error, Network};
use ethers::types::Address;
use std::fmt;
use std::str::FromStr;

pub use registry::ROUTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Eth,
    Usdc,
    Link,
    Eurc,
    Sei,
}

impl Asset {
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Eth => "ETH",
            Asset::Usdc => "USDC",
            Asset::Link => "LINK",
            Asset::Eurc => "EURC",
            Asset::Sei => "SEI",
        }
    }

    /// Native assets travel as transaction value instead of an ERC-20 pull.
    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Eth | Asset::Sei)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Asset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ETH" => Ok(Asset::Eth),
            "USDC" => Ok(Asset::Usdc),
            "LINK" => Ok(Asset::Link),
            "EURC" => Ok(Asset::Eurc),
            "SEI" => Ok(Asset::Sei),
            other => Err(Error::GenericParse(format!("unknown asset {other}"))),
        }
    }
}

/// How the bridge contract gets allowance to pull an ERC-20 asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalPolicy {
    None,
    /// One approval for the whole batch, skipped when the allowance already covers it
    Upfront { gas_limit: u64 },
    /// Balance check and approval before every transfer
    PerTransfer { gas_limit: u64 },
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub source: Network,
    pub destination: Network,
    pub asset: Asset,
    pub decimals: u32,
    pub token_contract: Option<&'static str>,
    pub template: PayloadTemplate,
    pub approval: ApprovalPolicy,
    pub gas_limit: u64,
    pub default_amount: &'static str,
}

impl Route {
    pub fn all() -> &'static [Route] {
        ROUTES.as_slice()
    }

    pub fn find(source: Network, destination: Network, asset: Asset) -> Result<&'static Route> {
        ROUTES
            .iter()
            .find(|r| r.source == source && r.destination == destination && r.asset == asset)
            .ok_or_else(|| Error::RouteNotFound {
                from: source.to_string(),
                to: destination.to_string(),
                asset: asset.to_string(),
            })
    }

    /// Parses keys such as `holesky-sepolia-usdc`.
    pub fn from_key(key: &str) -> Result<&'static Route> {
        let parts: Vec<&str> = key.trim().split('-').collect();
        match parts.as_slice() {
            [source, destination, asset] => {
                Route::find(source.parse()?, destination.parse()?, asset.parse()?)
            }
            _ => Err(Error::GenericParse(format!(
                "route key {key:?} should look like <source>-<destination>-<asset>"
            ))),
        }
    }

    pub fn key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.source,
            self.destination,
            self.asset.symbol().to_ascii_lowercase()
        )
    }

    pub fn bridge_address(&self) -> Result<Address> {
        parse_address(UNION_CONTRACT_ADDRESS)
    }

    pub fn token_address(&self) -> Result<Option<Address>> {
        self.token_contract.map(parse_address).transpose()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.destination, self.asset)
    }
}

fn parse_address(address: &str) -> Result<Address> {
    address
        .parse()
        .map_err(|e| Error::GenericParse(format!("invalid address {address}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_is_spliceable() {
        for route in Route::all() {
            route
                .template
                .verify()
                .unwrap_or_else(|e| panic!("{}: {e}", route.key()));
            assert_eq!(route.template.selector(), "ff0d7c2f", "{}", route.key());
        }
    }

    #[test]
    fn keys_are_unique_and_resolve() {
        for route in Route::all() {
            let found = Route::from_key(&route.key()).unwrap();
            assert_eq!(found.key(), route.key());
        }
    }

    #[test]
    fn native_routes_need_no_approval() {
        for route in Route::all() {
            assert_eq!(route.asset.is_native(), route.token_contract.is_none());
            assert_eq!(
                route.asset.is_native(),
                route.approval == ApprovalPolicy::None,
                "{}",
                route.key()
            );
            assert!(route.token_address().is_ok());
        }
    }

    #[test]
    fn default_amounts_parse() {
        for route in Route::all() {
            crate::helpers::parse_amount(route.default_amount, route.decimals).unwrap();
        }
    }

    #[test]
    fn unknown_route_is_reported() {
        let err = Route::find(Network::BscTestnet, Network::Sepolia, Asset::Usdc).unwrap_err();
        assert!(matches!(err, Error::RouteNotFound { .. }));
        assert!(Route::from_key("holesky-sepolia").is_err());
    }

    #[test]
    fn bridge_contract_is_shared() {
        let expected: Address = UNION_CONTRACT_ADDRESS.parse().unwrap();
        for route in Route::all() {
            assert_eq!(route.bridge_address().unwrap(), expected);
        }
    }
}
