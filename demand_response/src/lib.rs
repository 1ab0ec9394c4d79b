pub mod error;
pub mod generator;
pub mod models;
pub mod transform;

pub use error::{DemandResponseError, Result};
pub use generator::{generate_day, generate_unboosted, DataGenerator};
pub use models::{DaySeries, GeneratorConfig, HourlyPoint, ShiftOutcome, ShiftPolicy, ShiftSummary, HOURS_PER_DAY};
pub use transform::{demand_response, DemandResponder};
