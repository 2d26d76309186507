use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::Chain;

pub const ETHEREUM_RESERVE_ADDRESS: &str = "0xd0697f70E79476195B742d5aFAb14BE50f98CC1E";
pub const CELO_RESERVE_ADDRESS: &str = "0x9380fA34Fd9e4Fd14c06305fd7B6199089eD4eb9";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TargetsError {
    #[error("at least one reserve address must be configured")]
    Empty,
    #[error("invalid reserve address entry '{0}', expected <chain>:<0x address>")]
    InvalidEntry(String),
    #[error("unknown chain '{0}'")]
    UnknownChain(String),
    #[error("malformed address '{0}', expected 0x followed by 40 hex characters")]
    MalformedAddress(String),
    #[error("duplicate reserve address {address} on {chain}")]
    Duplicate { chain: Chain, address: String },
}

/// A reserve-held address on a specific chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReserveAddress {
    pub chain: Chain,
    pub address: String,
}

impl ReserveAddress {
    pub fn new(chain: Chain, address: &str) -> Self {
        Self {
            chain,
            address: address.to_owned(),
        }
    }
}

/// Parses `<chain>:<address>`, e.g. `celo:0x9380fA34Fd9e4Fd14c06305fd7B6199089eD4eb9`.
impl FromStr for ReserveAddress {
    type Err = TargetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chain, address) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TargetsError::InvalidEntry(s.to_owned()))?;

        let chain = chain
            .trim()
            .parse::<Chain>()
            .map_err(|_| TargetsError::UnknownChain(chain.trim().to_owned()))?;

        Ok(Self::new(chain, address.trim()))
    }
}

fn is_evm_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// The fixed set of addresses and chains queried upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReserveTargets {
    pub addresses: Vec<ReserveAddress>,
}

impl Default for ReserveTargets {
    fn default() -> Self {
        Self {
            addresses: vec![
                ReserveAddress::new(Chain::Ethereum, ETHEREUM_RESERVE_ADDRESS),
                ReserveAddress::new(Chain::Celo, CELO_RESERVE_ADDRESS),
            ],
        }
    }
}

impl ReserveTargets {
    /// Builds validated targets. Rejects empty sets, malformed addresses and
    /// the same address listed twice for one chain.
    pub fn new(addresses: Vec<ReserveAddress>) -> Result<Self, TargetsError> {
        let targets = Self { addresses };
        targets.validate()?;
        Ok(targets)
    }

    pub fn validate(&self) -> Result<(), TargetsError> {
        if self.addresses.is_empty() {
            return Err(TargetsError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &self.addresses {
            if !is_evm_address(&entry.address) {
                return Err(TargetsError::MalformedAddress(entry.address.clone()));
            }
            if !seen.insert((entry.chain, entry.address.to_lowercase())) {
                return Err(TargetsError::Duplicate {
                    chain: entry.chain,
                    address: entry.address.clone(),
                });
            }
        }

        Ok(())
    }

    /// Distinct addresses in configuration order. The same address may be a
    /// reserve on several chains but is only queried once.
    pub fn unique_addresses(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.addresses
            .iter()
            .filter(|entry| seen.insert(entry.address.to_lowercase()))
            .map(|entry| entry.address.clone())
            .collect()
    }

    /// Distinct chain ids in configuration order.
    pub fn chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = Vec::with_capacity(self.addresses.len());
        for entry in &self.addresses {
            let id = entry.chain.chain_id();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}
