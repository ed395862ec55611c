//! Theme command

use crate::error::FinanceResult;
use crate::models::Theme;
use crate::storage::Storage;

/// Show the stored theme, or store a new one
pub fn handle_theme_command(storage: &Storage, theme: Option<Theme>) -> FinanceResult<()> {
    match theme {
        Some(theme) => {
            storage.set_theme(theme)?;
            println!("Theme set to {}", theme);
        }
        None => println!("{}", storage.theme()?),
    }
    Ok(())
}
