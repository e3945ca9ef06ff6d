//! Rate table loading and input cleaning for the conveyance cost engine.

pub mod amount;
pub mod loader;
pub mod validate;

pub use amount::{amount_from_f64, parse_amount};
pub use loader::{DutyBracketRecord, RateTableLoader, RateTableLoaderError};
pub use validate::{ValidationError, validate_rate_tables};
