use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// Treats an explicit `null` the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The GraphQL `data` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    #[serde(default)]
    pub portfolio_v2: Option<PortfolioV2>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioV2 {
    #[serde(default)]
    pub token_balances: Option<TokenBalances>,
    #[serde(default)]
    pub app_balances: Option<AppBalances>,
    #[serde(default)]
    pub nft_balances: Option<NftBalances>,
}

/// Relay-style connection (`{ totalCount, edges: [{ node }] }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub total_count: Option<u64>,
    pub edges: Option<Vec<Edge<T>>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            total_count: None,
            edges: None,
        }
    }
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().flatten().map(|edge| &edge.node)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Iterates the nodes of an optional connection, yielding nothing when the
/// connection itself is absent.
pub fn nodes_of<T>(connection: Option<&Connection<T>>) -> impl Iterator<Item = &T> {
    connection.into_iter().flat_map(|connection| connection.nodes())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub chain_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkBalance {
    #[serde(default, deserialize_with = "nullable")]
    pub network: Network,
    #[serde(rename = "balanceUSD", default, deserialize_with = "nullable")]
    pub balance_usd: f64,
}

// ============================================================================
// Wallet token balances
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalances {
    #[serde(rename = "totalBalanceUSD", default, deserialize_with = "nullable")]
    pub total_balance_usd: f64,
    #[serde(default)]
    pub by_token: Option<Connection<TokenNode>>,
    #[serde(default)]
    pub by_network: Option<Connection<NetworkBalance>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenNode {
    #[serde(default, deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(default, deserialize_with = "nullable")]
    pub token_address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub balance: f64,
    #[serde(rename = "balanceUSD", default, deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub price: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub network: Network,
}

// ============================================================================
// App (DeFi protocol) balances
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppBalances {
    #[serde(rename = "totalBalanceUSD", default, deserialize_with = "nullable")]
    pub total_balance_usd: f64,
    #[serde(default)]
    pub by_app: Option<Connection<AppBalance>>,
    #[serde(default)]
    pub by_meta_type: Option<Connection<MetaTypeBalance>>,
    #[serde(default)]
    pub by_network: Option<Connection<NetworkBalance>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppBalance {
    #[serde(rename = "balanceUSD", default, deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub app: App,
    #[serde(default, deserialize_with = "nullable")]
    pub network: Network,
    #[serde(default)]
    pub position_balances: Option<Connection<PositionBalance>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(default, deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<AppCategory>,
    #[serde(default)]
    pub url: Option<String>,
}

impl App {
    /// Declared category name, empty when the API did not classify the app.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map_or("", |category| category.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppCategory {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTypeBalance {
    #[serde(default, deserialize_with = "nullable")]
    pub meta_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub position_count: u64,
    #[serde(rename = "balanceUSD", default, deserialize_with = "nullable")]
    pub balance_usd: f64,
}

/// A position held inside an app, discriminated by its `type` field.
///
/// Nodes with an unrecognised, null or missing `type` (an empty `{}` is what
/// the API sends for union members no fragment selected) become `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PositionBalance {
    #[serde(rename = "app-token")]
    AppToken(AppTokenPosition),
    #[serde(rename = "contract-position")]
    ContractPosition(ContractPosition),
    Unknown,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum TaggedPosition {
    #[serde(rename = "app-token")]
    AppToken(AppTokenPosition),
    #[serde(rename = "contract-position")]
    ContractPosition(ContractPosition),
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionNode {
    Tagged(TaggedPosition),
    Untagged(IgnoredAny),
}

impl<'de> Deserialize<'de> for PositionBalance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PositionNode::deserialize(deserializer)? {
            PositionNode::Tagged(TaggedPosition::AppToken(position)) => Self::AppToken(position),
            PositionNode::Tagged(TaggedPosition::ContractPosition(position)) => {
                Self::ContractPosition(position)
            }
            PositionNode::Tagged(TaggedPosition::Unknown) | PositionNode::Untagged(_) => {
                Self::Unknown
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTokenPosition {
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub network: String,
    #[serde(default, deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub balance: f64,
    #[serde(rename = "balanceUSD", default, deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub price: f64,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(default)]
    pub supply: Option<f64>,
    #[serde(default)]
    pub price_per_share: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub tokens: Vec<PositionToken>,
    #[serde(default)]
    pub display_props: Option<DisplayProps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPosition {
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub network: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(rename = "balanceUSD", default, deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub tokens: Vec<ContractPositionToken>,
    #[serde(default)]
    pub display_props: Option<DisplayProps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayProps {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<String>,
}

/// One leg of a contract position, tagged with its economic role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPositionToken {
    #[serde(default, deserialize_with = "nullable")]
    pub meta_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub token: PositionToken,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    BaseToken,
    AppToken,
    #[default]
    #[serde(other)]
    Other,
}

/// A token node inside a position. App tokens carry their own nested
/// `tokens`, which may nest again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionToken {
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: TokenKind,
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub network: String,
    #[serde(default, deserialize_with = "nullable")]
    pub balance: f64,
    #[serde(rename = "balanceUSD", default, deserialize_with = "nullable")]
    pub balance_usd: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub price: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tokens: Vec<PositionToken>,
}

// ============================================================================
// NFT balances
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftBalances {
    #[serde(rename = "totalBalanceUSD", default, deserialize_with = "nullable")]
    pub total_balance_usd: f64,
    #[serde(default)]
    pub total_tokens_owned: Option<f64>,
    #[serde(default)]
    pub by_network: Option<Connection<NetworkBalance>>,
}
