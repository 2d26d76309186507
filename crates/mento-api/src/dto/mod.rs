pub mod error;
pub mod reserve;

pub use error::*;
pub use reserve::*;
