use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("portfolio response has no portfolioV2 object")]
    MissingPortfolio,
}
