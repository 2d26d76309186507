use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
    Ethereum,
    Celo,
}

impl Chain {
    /// EVM chain id, as expected by the portfolio API `chainIds` filter.
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Ethereum => 1,
            Self::Celo => 42220,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_parsing_is_case_insensitive() {
        assert_eq!("ethereum".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert_eq!("CELO".parse::<Chain>().unwrap(), Chain::Celo);
        assert!("solana".parse::<Chain>().is_err());
    }

    #[test]
    fn test_chain_display_and_ids() {
        assert_eq!(Chain::Ethereum.to_string(), "ETHEREUM");
        assert_eq!(Chain::Ethereum.chain_id(), 1);
        assert_eq!(Chain::Celo.chain_id(), 42220);
    }
}
