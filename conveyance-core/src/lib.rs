pub mod calculations;
pub mod models;

pub use calculations::{CostEstimator, DutyAssessment};
pub use models::*;
