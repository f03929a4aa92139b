pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, file_config::FileConfig, Settings};
pub use core::triangle::{classify, Triangle, TriangleKind};
pub use core::{ledger::LedgerService, rates::RateService};
pub use utils::error::{FinError, Result};
