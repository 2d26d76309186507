pub mod client;
pub mod error;
pub mod query;
pub mod traits;

pub use client::{ZAPPER_API_BASE, ZapperClient};
pub use error::ZapperError;
pub use traits::PortfolioProvider;
