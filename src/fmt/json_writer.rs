use std::io;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use time::{macros::format_description, OffsetDateTime};

use crate::{
    error::Result,
    fmt::TableWriter,
    table::{Table, COLUMNS},
};

/// Wraps a `std::io::Write` object to write the table in a JSON format
///
/// # Example
///
/// ```no_run
/// # use std::fs::File;
/// # use gitsheet::{GitSheet, fmt::JsonWriter};
/// let sheet = GitSheet::new().unwrap();
///
/// // Create a file to hold our results, which the JsonWriter will wrap (note, .unwrap() is only
/// // used to keep the example short and concise)
/// let mut file = File::create("git_log.json").unwrap();
///
/// // Create the JSON Writer
/// let mut writer = JsonWriter::new(&mut file);
///
/// // Use the JsonWriter to write the commits
/// let commits = sheet.get_commits().unwrap();
/// sheet.write_table_with(&mut writer, &commits).unwrap();
/// ```
pub struct JsonWriter<'a>(&'a mut dyn io::Write);

#[derive(Serialize)]
struct Document<'t> {
    generated: String,
    commits: Vec<IndexMap<&'static str, &'t str>>,
}

impl<'a> JsonWriter<'a> {
    /// Creates a new instance of the `JsonWriter` struct using a
    /// `std::io::Write` object.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use std::io::{stdout, BufWriter};
    /// # use gitsheet::fmt::JsonWriter;
    /// // Create a JsonWriter to wrap stdout
    /// let out = stdout();
    /// let mut out_buf = BufWriter::new(out.lock());
    /// let mut writer = JsonWriter::new(&mut out_buf);
    /// ```
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> JsonWriter<'a> { JsonWriter(writer) }
}

impl<'a> TableWriter for JsonWriter<'a> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        debug!("Writing JSON table");
        let generated =
            OffsetDateTime::now_utc().format(format_description!("[year]-[month]-[day]"))?;

        // keys keep column order
        let commits: Vec<IndexMap<_, _>> = table
            .rows
            .iter()
            .map(|row| COLUMNS.into_iter().zip(row.iter().map(String::as_str)).collect())
            .collect();

        serde_json::to_writer_pretty(&mut *self.0, &Document { generated, commits })?;
        writeln!(self.0)?;
        debug!("Finished writing rows, flushing");
        self.0.flush().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::git::{Commit, CommitType};

    fn render(table: &Table) -> String {
        let mut out = Vec::new();
        JsonWriter::new(&mut out).write_table(table).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn rows_keyed_by_column() {
        let commit = Commit {
            commit_type: Some(CommitType::Feat),
            subject: Some("add \"quotes\"".into()),
            ..Commit::new("abc123")
        };
        let json = render(&Table::from_commits(&[commit]));
        let doc: Value = serde_json::from_str(&json).unwrap();

        let row = &doc["commits"][0];
        assert_eq!(row["Commit Hash"], "abc123");
        assert_eq!(row["Type"], "feat");
        assert_eq!(row["Subject"], "add \"quotes\"");
        assert_eq!(row["Author"], "");
        assert_eq!(doc["generated"].as_str().map(str::len), Some(10));
    }

    #[test]
    fn keys_in_column_order() {
        let json = render(&Table::from_commits(&[Commit::new("abc")]));
        let positions: Vec<usize> = COLUMNS
            .iter()
            .map(|c| json.find(&format!("\"{c}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_table() {
        let doc: Value = serde_json::from_str(&render(&Table::default())).unwrap();
        assert_eq!(doc["commits"], Value::Array(vec![]));
    }
}
