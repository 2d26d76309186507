use mento_types::ReserveTargets;
use serde_json::{Value, json};

/// Token, app and NFT balances for a set of addresses. App-token trees are
/// requested two levels deep, contract position legs one level deep.
pub const PORTFOLIO_QUERY: &str = r"
query ReservePortfolio($addresses: [Address!]!, $chainIds: [Int!]) {
  portfolioV2(addresses: $addresses, chainIds: $chainIds) {
    tokenBalances {
      totalBalanceUSD
      byToken(first: 100, filters: { minBalanceUSD: 1 }) {
        totalCount
        edges { node { symbol tokenAddress balance balanceUSD price name decimals network { name chainId } } }
      }
      byNetwork(first: 20) { edges { node { network { name chainId } balanceUSD } } }
    }
    appBalances {
      totalBalanceUSD
      byApp(first: 50) {
        totalCount
        edges {
          node {
            balanceUSD
            app { displayName slug description category { name } url }
            network { name chainId }
            positionBalances(first: 20) {
              edges {
                node {
                  ... on AppTokenPositionBalance {
                    type address network symbol decimals balance balanceUSD price
                    appId groupId groupLabel supply pricePerShare
                    tokens {
                      ...BaseTokenFields
                      ... on AppTokenPositionBalance {
                        type address network balance balanceUSD price symbol decimals appId
                        tokens { ...BaseTokenFields }
                      }
                    }
                    displayProps { label images }
                  }
                  ... on ContractPositionBalance {
                    type address network appId groupId groupLabel balanceUSD
                    tokens {
                      metaType
                      token {
                        ...BaseTokenFields
                        ... on AppTokenPositionBalance {
                          type address network balance balanceUSD price symbol decimals appId
                          tokens { ...BaseTokenFields }
                        }
                      }
                    }
                    displayProps { label images }
                  }
                }
              }
            }
          }
        }
      }
      byMetaType(first: 10) { edges { node { metaType positionCount balanceUSD } } }
      byNetwork(first: 20) { edges { node { network { name chainId } balanceUSD } } }
    }
    nftBalances {
      totalBalanceUSD
      totalTokensOwned
      byNetwork(first: 10) { edges { node { network { name chainId } balanceUSD } } }
    }
  }
}

fragment BaseTokenFields on BaseTokenPositionBalance {
  type address network balance balanceUSD price symbol decimals
}
";

pub fn portfolio_variables(targets: &ReserveTargets) -> Value {
    json!({
        "addresses": targets.unique_addresses(),
        "chainIds": targets.chain_ids(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mento_types::{Chain, ReserveAddress};

    #[test]
    fn test_variables_from_default_targets() {
        let variables = portfolio_variables(&ReserveTargets::default());
        assert_eq!(
            variables,
            json!({
                "addresses": [
                    "0xd0697f70E79476195B742d5aFAb14BE50f98CC1E",
                    "0x9380fA34Fd9e4Fd14c06305fd7B6199089eD4eb9"
                ],
                "chainIds": [1, 42220]
            })
        );
    }

    #[test]
    fn test_variables_deduplicate_shared_addresses() {
        let address = "0x9380fA34Fd9e4Fd14c06305fd7B6199089eD4eb9";
        let targets = ReserveTargets::new(vec![
            ReserveAddress::new(Chain::Celo, address),
            ReserveAddress::new(Chain::Ethereum, address),
        ])
        .unwrap();

        let variables = portfolio_variables(&targets);
        assert_eq!(variables["addresses"], json!([address]));
        assert_eq!(variables["chainIds"], json!([42220, 1]));
    }
}
