pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::Settings;
pub use crate::core::client::BlsClient;
pub use utils::error::{PullerError, Result};
pub use web::{create_router, AppState};
