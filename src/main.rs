use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use pocket_ledger::cli::{Console, Session};
use pocket_ledger::config::{LedgerPaths, RowPolicy, Settings};
use pocket_ledger::storage::{LedgerStore, LoadOutcome};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Terminal-based personal finance ledger",
    long_about = "Pocket Ledger records deposits and payments in a single \
                  pipe-delimited file and lets you browse them through simple \
                  text menus: all transactions, deposits, payments, date-range \
                  reports and vendor search."
)]
struct Cli {
    /// Ledger file to read and append to
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Optional JSON settings file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip malformed ledger rows instead of stopping at the first one
    #[arg(long)]
    skip_bad_rows: bool,

    /// Write a settings file with the default values to the --config path and exit
    #[arg(long)]
    init_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::resolve(cli.file, cli.config);
    if cli.init_config {
        return init_config(&paths);
    }

    let mut settings = Settings::load_or_default(&paths)?;
    if cli.skip_bad_rows {
        settings.row_policy = RowPolicy::Skip;
    }

    init_tracing(&settings.log_level, cli.verbose);

    let mut store = LedgerStore::new(paths.ledger_file());
    match store.load(settings.row_policy) {
        Ok(LoadOutcome::Created) => {
            println!("Ledger file does not exist! Creating file...");
        }
        Ok(LoadOutcome::Loaded { count, skipped }) => {
            for err in &skipped {
                println!("WARNING: skipped row: {}", err);
            }
            println!("Ledger loaded! ({} transactions)", count);
        }
        Err(err) => {
            // Rows read before the failure stay available
            println!("ERROR: {}", err);
            println!("Continuing with {} transactions", store.len());
        }
    }

    let mut session = Session::new(Console::stdio(), store, settings);
    session.run()?;

    Ok(())
}

fn init_config(paths: &LedgerPaths) -> Result<()> {
    let Some(path) = paths.settings_file() else {
        bail!("--init-config needs a settings path (--config or LEDGER_CONFIG)");
    };
    if path.exists() {
        println!("Settings file already exists: {}", path.display());
        return Ok(());
    }

    Settings::default().save(path)?;
    println!("Settings written to {}", path.display());
    Ok(())
}

fn init_tracing(configured: &str, verbose: u8) {
    let level = match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pocket_ledger={}", level)));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
