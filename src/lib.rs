//! Turns a `git log` into a table with one row per commit.
//!
//! Commit messages are read as conventional commits with a fixed type
//! vocabulary (`build`, `ci`, `docs`, `feat`, `fix`, `pref`, `refactor`,
//! `style`, `test`), plus `BREAKING CHANGE` and `Closes` footers. The
//! resulting rows are written as an `.xlsx` workbook or as JSON.
//!
//! ```no_run
//! # use gitsheet::GitSheet;
//! let sheet = GitSheet::new().unwrap().after("2024-01-01");
//! if let Some(path) = sheet.write_table().unwrap() {
//!     println!("Git log saved to {}", path.display());
//! }
//! ```

mod config;
pub mod error;
pub mod fmt;
pub mod git;
mod gitsheet;
pub mod parser;
mod table;

pub use git::{Commit, CommitType, Commits};
pub use gitsheet::GitSheet;
pub use parser::{parse, parse_with_diagnostics, Diagnostic, ParsedLog};
pub use table::{sanitize_cell, Table, COLUMNS};

// The default config file
const DEFAULT_CONFIG_FILE: &str = ".gitsheet.toml";
