//! gitsheet CLI: export the current repository's git log to a spreadsheet.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use gitsheet::GitSheet;
use log::info;

#[derive(Parser)]
#[command(name = "gitsheet")]
#[command(about = "Extract a conventional-commit git log into a spreadsheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Only include commits after this date (YYYY-MM-DD)
    #[arg(short, long)]
    after: Option<String>,

    /// Only include commits before this date (YYYY-MM-DD)
    #[arg(short, long)]
    before: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut sheet = GitSheet::new().context("Failed to load configuration")?;
    if let Some(after) = cli.after {
        sheet = sheet.after(after);
    }
    if let Some(before) = cli.before {
        sheet = sheet.before(before);
    }

    let written = sheet
        .write_table()
        .context("Failed to export git log")?;
    match written {
        Some(path) => println!("Git log saved to {}", path.display()),
        None => info!("No commits in range, nothing written"),
    }

    Ok(())
}
