use mento_types::{ContractPositionToken, PositionToken, TokenKind};

use crate::model::ExtractedToken;

/// Deepest app-token nesting level that is still emitted. The portfolio API
/// can return very deep or self-referencing composed positions, anything
/// below this level is dropped.
pub const MAX_TOKEN_DEPTH: u32 = 3;

/// Meta-type of contract legs that represent unclaimed rewards.
pub const CLAIMABLE_META_TYPE: &str = "CLAIMABLE";

fn extracted(token: &PositionToken) -> ExtractedToken {
    ExtractedToken {
        symbol: token.symbol.clone(),
        balance: token.balance,
        balance_usd: token.balance_usd,
        price: token.price,
        address: token.address.clone(),
        network: token.network.clone(),
        ..Default::default()
    }
}

fn push_underlying(tokens: &[PositionToken], level: u32, out: &mut Vec<ExtractedToken>) {
    if level > MAX_TOKEN_DEPTH {
        return;
    }

    for token in tokens {
        match token.kind {
            TokenKind::BaseToken => out.push(ExtractedToken {
                level: Some(level),
                ..extracted(token)
            }),
            TokenKind::AppToken => {
                out.push(ExtractedToken {
                    app_id: token.app_id.clone(),
                    level: Some(level),
                    ..extracted(token)
                });
                push_underlying(&token.tokens, level + 1, out);
            }
            TokenKind::Other => {}
        }
    }
}

/// Flattens an app-token tree depth first, starting at `level`.
///
/// Base tokens are leaves. App tokens are emitted themselves and then
/// expanded one level deeper. Nothing is emitted past [`MAX_TOKEN_DEPTH`].
pub fn extract_underlying_tokens(tokens: &[PositionToken], level: u32) -> Vec<ExtractedToken> {
    let mut out = Vec::new();
    push_underlying(tokens, level, &mut out);
    out
}

/// Flattens the legs of a contract position, tagging each with its
/// meta-type.
///
/// Legs carry no level. An app-token leg is expanded with the app-token
/// rule starting at level 1, so contract positions reach one level less
/// deep than app-token positions.
pub fn extract_contract_tokens(legs: &[ContractPositionToken]) -> Vec<ExtractedToken> {
    let mut out = Vec::new();

    for leg in legs {
        let token = &leg.token;
        let meta_type = (!leg.meta_type.is_empty()).then(|| leg.meta_type.clone());

        match token.kind {
            TokenKind::BaseToken => out.push(ExtractedToken {
                meta_type,
                ..extracted(token)
            }),
            TokenKind::AppToken => {
                out.push(ExtractedToken {
                    app_id: token.app_id.clone(),
                    meta_type,
                    ..extracted(token)
                });
                push_underlying(&token.tokens, 1, &mut out);
            }
            TokenKind::Other => {}
        }
    }

    out
}

pub fn is_claimable(token: &ExtractedToken) -> bool {
    token.meta_type.as_deref() == Some(CLAIMABLE_META_TYPE)
}
