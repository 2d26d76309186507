pub mod breakdown;
pub mod categorize;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalizer;

pub use breakdown::{CategoryBreakdown, ProtocolSummary};
pub use categorize::{Categorizer, ProtocolCategorizer, categorize_protocol};
pub use error::NormalizeError;
pub use model::*;
pub use normalizer::{Normalizer, normalize};
