//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;

use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::export::{self, report_filename, FullExport, HtmlReport};
use crate::reports::MonthReport;
use crate::storage::Storage;

use super::resolve_month;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Printable HTML report of a month's expenses
    Html {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Output file (defaults to exports/finance-report-YYYY-MM.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export transactions to CSV
    Csv {
        /// Output file path
        output: PathBuf,
        /// Only transactions from this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export a month summary (totals and category breakdowns) to CSV
    Summary {
        /// Output file path
        output: PathBuf,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export all data to JSON
    Json {
        /// Output file path
        output: PathBuf,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export all data to YAML
    Yaml {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

fn create_output(path: &Path) -> FinanceResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FinanceError::Export(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>, path: &Path) -> FinanceResult<()> {
    writer.flush().map_err(|e| {
        FinanceError::Export(format!("Failed to write {}: {}", path.display(), e))
    })
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    paths: &FinancePaths,
    cmd: ExportCommands,
) -> FinanceResult<()> {
    match cmd {
        ExportCommands::Html { month, output } => {
            let month = resolve_month(month.as_deref())?;
            let output =
                output.unwrap_or_else(|| paths.exports_dir().join(report_filename(month)));

            let transactions = storage.transactions.get_all()?;
            let categories = storage.categories.get_all()?;
            let report = MonthReport::generate(&transactions, &categories, month);

            let html = HtmlReport::new(
                &report.expenses,
                report.total_expenses(),
                month,
                Local::now().date_naive(),
            )
            .categories(&categories)
            .currency_symbol(&settings.currency_symbol)
            .date_format(&settings.date_format);

            let mut writer = create_output(&output)?;
            html.write_to(&mut writer)?;
            finish(writer, &output)?;

            tracing::info!(path = %output.display(), %month, "wrote HTML report");
            println!(
                "Report for {} written to: {}",
                month.long_label(),
                output.display()
            );
        }

        ExportCommands::Csv { output, month } => {
            let month = month.as_deref().map(|m| resolve_month(Some(m))).transpose()?;

            let mut writer = create_output(&output)?;
            let count = export::export_transactions_csv(storage, &mut writer, month)?;
            finish(writer, &output)?;

            println!("Exported {} transactions to: {}", count, output.display());
        }

        ExportCommands::Summary { output, month } => {
            let month = resolve_month(month.as_deref())?;
            let transactions = storage.transactions.get_all()?;
            let categories = storage.categories.get_all()?;
            let report = MonthReport::generate(&transactions, &categories, month);

            let mut writer = create_output(&output)?;
            report.export_csv(&mut writer)?;
            finish(writer, &output)?;

            println!(
                "Summary for {} exported to: {}",
                month.long_label(),
                output.display()
            );
        }

        ExportCommands::Json { output, pretty } => {
            let mut writer = create_output(&output)?;
            export::export_full_json(storage, &mut writer, pretty)?;
            finish(writer, &output)?;

            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Yaml { output } => {
            let mut writer = create_output(&output)?;
            export::export_full_yaml(storage, &mut writer)?;
            finish(writer, &output)?;

            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;

            println!("Export Information");
            println!("==================\n");

            println!("Schema Version: {}", export.schema_version);
            println!("App Version:    {}", export.app_version);
            println!("Theme:          {}", export.theme);
            println!();

            println!("Data Summary:");
            println!("  Transactions:  {}", export.metadata.transaction_count);
            println!("  Categories:    {}", export.metadata.category_count);

            if let Some(earliest) = &export.metadata.earliest_transaction {
                println!("\nTransaction Date Range:");
                println!("  Earliest: {}", earliest);
            }
            if let Some(latest) = &export.metadata.latest_transaction {
                println!("  Latest:   {}", latest);
            }

            println!("\nReports are written to: {}", paths.exports_dir().display());
        }
    }

    Ok(())
}
