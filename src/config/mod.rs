//! Configuration for the finance tracker
//!
//! - data directory resolution (env override, XDG, APPDATA)
//! - user settings persisted as `config.json`

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
