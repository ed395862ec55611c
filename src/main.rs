use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_category_command, handle_export_command, handle_report_command, handle_theme_command,
    handle_transaction_command, CategoryCommands, ExportCommands, ReportCommands,
    TransactionCommands,
};
use finance_tracker::config::{paths::FinancePaths, settings::Settings};
use finance_tracker::init_tracing;
use finance_tracker::models::Theme;
use finance_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal finance tracker",
    long_about = "Track income and expenses by category, set monthly budgets, \
                  and review monthly summaries, trends and budget alerts from \
                  the command line."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Monthly summaries, trends and budget alerts
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data and reports
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show or set the color theme
    Theme {
        /// light or dark
        theme: Option<Theme>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = FinancePaths::new()?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Finance Tracker - personal income and expense tracking");
            println!();
            println!("Run 'finance --help' for usage information.");
            println!("Run 'finance init' to set up the data directory.");
            return Ok(());
        }
    };

    if let Commands::Init = command {
        println!("Initializing Finance Tracker at: {}", paths.base_dir().display());
        let (storage, report) = initialize_storage(&paths)?;
        println!("Initialization complete!");
        println!();
        if report.migrated_transactions {
            println!("Converted stored expenses to transactions.");
        }
        if report.migrated_categories {
            println!("Assigned the expense type to untyped categories.");
        }
        if report.seeded_categories {
            println!("Created {} default categories.", storage.categories.count()?);
        }
        if report.skipped > 0 {
            println!(
                "Moved {} unreadable records to their -unreadable keys.",
                report.skipped
            );
        }
        println!(
            "{} transactions, {} categories.",
            report.transactions, report.categories
        );
        println!();
        println!("Run 'finance category list' to see all categories.");
        return Ok(());
    }

    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(&paths)?;
    let report = storage.load_all()?;
    if report.skipped > 0 {
        eprintln!(
            "Warning: moved {} unreadable records to their -unreadable keys",
            report.skipped
        );
    }

    match command {
        Commands::Init => {}
        Commands::Config => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Export directory: {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Series window:   {} months", settings.series_window);
            println!("  Theme:           {}", storage.theme()?);
        }
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, &settings, &paths, cmd)?,
        Commands::Theme { theme } => handle_theme_command(&storage, theme)?,
    }

    Ok(())
}
