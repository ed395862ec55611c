//! First-run setup

use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::FinanceError;

use super::{LoadReport, Storage};

/// Prepare a data directory for use
///
/// Creates directories, writes default settings if there are none, and runs
/// the load step so built-in categories are seeded and any legacy data is
/// migrated. Existing data is never overwritten.
pub fn initialize_storage(paths: &FinancePaths) -> Result<(Storage, LoadReport), FinanceError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    let storage = Storage::new(paths)?;
    let report = storage.load_all()?;
    Ok((storage, report))
}
