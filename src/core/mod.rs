pub mod client;
pub mod query;

pub use crate::domain::model::{FormInput, Observation, Outcome, SeriesQuery, SeriesResult};
pub use crate::domain::ports::{ConfigProvider, SeriesSource};
pub use crate::utils::error::Result;
