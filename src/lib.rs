//! Finance Tracker - personal income and expense tracking
//!
//! This library records income and expense transactions, groups them into
//! user-defined categories with optional monthly budgets, and derives the
//! monthly summaries, category breakdowns and budget alerts shown by the
//! `finance` command line tool.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, money, months)
//! - `storage`: Key-value persistence with legacy data migration
//! - `services`: Business logic layer
//! - `reports`: Monthly aggregation, breakdowns and budget alerts
//! - `export`: HTML, CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::paths::FinancePaths;
//! use finance_tracker::storage::initialize_storage;
//!
//! let paths = FinancePaths::new()?;
//! let (storage, report) = initialize_storage(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

use std::sync::Once;

pub use error::{FinanceError, FinanceResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence. Otherwise the level follows `verbosity`:
/// warnings by default, `1` for info, `2` or more for debug. Logs go to
/// stderr so command output stays clean.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let level = match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("finance_tracker={}", level)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
