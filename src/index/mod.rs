pub mod bitset;
pub mod stats;
pub mod store;
pub mod types;

pub use bitset::Bitset;
pub use stats::StoreStats;
pub use store::TagStore;
pub use types::*;
