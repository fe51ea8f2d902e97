pub mod builder;
pub mod error;
pub mod pool;

pub use builder::Query;
pub use error::{QueryError, Result};
pub use pool::QueryPool;
