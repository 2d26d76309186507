pub const OTHER_PROTOCOL: &str = "Other Protocol";

/// Substring rules on the lower-cased app slug.
const SLUG_RULES: &[(&[&str], &str)] = &[
    (&["spark", "sdai"], "Savings (Spark/sDAI)"),
    (&["aave"], "Lending (Aave)"),
    (&["compound"], "Lending (Compound)"),
    (&["maker", "makerdao"], "Savings (MakerDAO)"),
    (&["uniswap"], "DEX (Uniswap)"),
    (&["sushiswap"], "DEX (SushiSwap)"),
    (&["curve"], "DEX (Curve)"),
    (&["balancer"], "DEX (Balancer)"),
    (&["lido"], "Liquid Staking (Lido)"),
    (&["rocket", "reth"], "Liquid Staking (Rocket Pool)"),
    (&["mento"], "Mento Protocol"),
    (&["ubeswap"], "DEX (Ubeswap)"),
    (&["moola"], "Lending (Moola)"),
];

/// Substring rules on the lower-cased declared category, used when no slug
/// rule matched.
const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["dex", "exchange"], "DEX/AMM"),
    (&["lending"], "Lending"),
    (&["staking"], "Staking"),
    (&["yield"], "Yield Farming"),
    (&["savings"], "Savings"),
];

fn first_match(haystack: &str, rules: &[(&[&str], &'static str)]) -> Option<&'static str> {
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| haystack.contains(needle)))
        .map(|(_, label)| *label)
}

/// Classifies an app by slug first, then by its declared category.
pub fn categorize_protocol(slug: &str, declared_category: &str) -> &'static str {
    first_match(&slug.to_lowercase(), SLUG_RULES)
        .or_else(|| first_match(&declared_category.to_lowercase(), CATEGORY_RULES))
        .unwrap_or(OTHER_PROTOCOL)
}

/// Strategy used by the normalizer to label apps.
pub trait Categorizer {
    fn categorize(&self, slug: &str, declared_category: &str) -> String;
}

/// The fixed rule table above.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolCategorizer;

impl Categorizer for ProtocolCategorizer {
    fn categorize(&self, slug: &str, declared_category: &str) -> String {
        categorize_protocol(slug, declared_category).to_owned()
    }
}
