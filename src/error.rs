use std::{io, path::PathBuf, process::ExitStatus, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling various errors encountered while
/// retrieving a git log, or writing the resulting table.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse config file: {0}")]
    ConfigParse(PathBuf),

    #[error("cannot get current directory")]
    CurrentDir,

    #[error("fatal I/O error with config or output file")]
    Io(#[from] io::Error),

    #[error("failed to run `git`, is it installed and on PATH?")]
    GitUnavailable(#[source] io::Error),

    #[error("`git log` exited with {status}: {stderr}")]
    GitLog { status: ExitStatus, stderr: String },

    #[error("failed to build spreadsheet")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to serialize JSON table")]
    Json(#[from] serde_json::Error),

    #[error("failed to convert date/time to string format")]
    TimeFormat(#[from] time::error::Format),

    #[error("failed to convert {0} to valid TableFormat")]
    TableFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_message_names_config_and_output() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "fatal I/O error with config or output file");
    }
}
