mod json_writer;
mod xlsx_writer;

use std::{result::Result as StdResult, str::FromStr};

use strum::{Display, EnumString};

pub use self::{json_writer::JsonWriter, xlsx_writer::XlsxWriter};
use crate::{error::Result, table::Table};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Xlsx,
    Json,
}

impl TableFormat {
    /// File extension used for the default output file
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Xlsx => "xlsx",
            TableFormat::Json => "json",
        }
    }
}

impl<'de> serde::de::Deserialize<'de> for TableFormat {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A trait that allows writing the parsed commits in an arbitrary format.
/// The single required function `write_table()` accepts a
/// `gitsheet::Table`, the ten-column projection of the commits.
///
/// `gitsheet` provides two default implementors of this trait,
/// `gitsheet::fmt::XlsxWriter` and `gitsheet::fmt::JsonWriter` for writing
/// spreadsheets and JSON respectively
pub trait TableWriter {
    /// Writes every row of `table`, preceded by the column headers where the
    /// format has a header row
    fn write_table(&mut self, table: &Table) -> Result<()>;
}
