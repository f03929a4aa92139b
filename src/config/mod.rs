pub mod cli;
pub mod file_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use file_config::FileConfig;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_CURRENCIES_FILE: &str = "currencies.json";
pub const DEFAULT_LEDGER_FILE: &str = "ledger.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "small-fin")]
#[command(about = "Currency rate table and personal finance ledger over local JSON storage")]
pub struct CliConfig {
    /// Directory holding the JSON data files
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the data directory and empty tables
    Init {
        /// Also insert the built-in static rates
        #[arg(long)]
        seed: bool,
    },
    /// Manage the currency rate table
    #[command(subcommand)]
    Currency(CurrencyCommand),
    /// Manage the personal finance ledger
    #[command(subcommand)]
    Ledger(LedgerCommand),
    /// Classify a triangle by its three side lengths
    Triangle { a: f64, b: f64, c: f64 },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum CurrencyCommand {
    /// Add a new currency with its rate to the ruble
    Add { name: String, rate: f64 },
    /// Change the rate of an existing currency
    Update { name: String, rate: f64 },
    /// Delete a currency
    Remove { name: String },
    /// Print all currencies
    List,
    /// Convert an amount of a currency into rubles
    Convert { name: String, amount: f64 },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum LedgerCommand {
    /// Register a chat with a login
    Register { chat_id: i64, login: String },
    /// Add an operation category for a chat
    AddCategory { chat_id: i64, name: String },
    /// Record an income or expense operation
    AddOperation {
        chat_id: i64,
        /// 'income' or 'expense'
        kind: String,
        /// Amount in rubles
        amount: f64,
        /// Operation date, YYYY-MM-DD
        date: String,
        category: String,
    },
    /// Print a chat's operations with totals
    Report {
        chat_id: i64,
        /// Display currency for the report
        #[arg(long, default_value = "RUB")]
        currency: String,
    },
}

/// Final storage settings after merging CLI flags over the optional TOML
/// file over the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    pub currencies_file: String,
    pub ledger_file: String,
}

impl Settings {
    pub fn resolve(data_dir_override: Option<String>, file: Option<&FileConfig>) -> Self {
        let storage = file.and_then(|f| f.storage.as_ref());

        Settings {
            data_dir: data_dir_override
                .or_else(|| storage.and_then(|s| s.data_dir.clone()))
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            currencies_file: storage
                .and_then(|s| s.currencies_file.clone())
                .unwrap_or_else(|| DEFAULT_CURRENCIES_FILE.to_string()),
            ledger_file: storage
                .and_then(|s| s.ledger_file.clone())
                .unwrap_or_else(|| DEFAULT_LEDGER_FILE.to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_non_empty_string("currencies_file", &self.currencies_file)?;
        validation::validate_non_empty_string("ledger_file", &self.ledger_file)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn currencies_file(&self) -> &str {
        &self.currencies_file
    }

    fn ledger_file(&self) -> &str {
        &self.ledger_file
    }
}
