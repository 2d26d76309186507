pub mod reserve;
pub mod targets;

pub use reserve::{
    get_reserve, get_reserve_categories, get_reserve_claimables, get_reserve_networks,
    get_reserve_protocols,
};
pub use targets::get_reserve_targets;
