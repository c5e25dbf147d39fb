use std::io;

use log::debug;
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    error::Result,
    fmt::TableWriter,
    table::{Table, COLUMNS},
};

/// Name of the single worksheet in the workbook
const SHEET_NAME: &str = "Git Log";

/// Wraps a `std::io::Write` object to write the table as an `.xlsx`
/// workbook
///
/// # Example
///
/// ```no_run
/// # use std::fs::File;
/// # use gitsheet::{GitSheet, fmt::XlsxWriter};
/// let sheet = GitSheet::new().unwrap();
///
/// // Create a file to hold our results, which the XlsxWriter will wrap (note, .unwrap() is only
/// // used to keep the example short and concise)
/// let mut file = File::create("git_log.xlsx").unwrap();
///
/// // Create the XlsxWriter
/// let mut writer = XlsxWriter::new(&mut file);
///
/// // Use the XlsxWriter to write the commits
/// let commits = sheet.get_commits().unwrap();
/// sheet.write_table_with(&mut writer, &commits).unwrap();
/// ```
pub struct XlsxWriter<'a>(&'a mut dyn io::Write);

impl<'a> XlsxWriter<'a> {
    /// Creates a new instance of the `XlsxWriter` struct using a
    /// `std::io::Write` object.
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> XlsxWriter<'a> { XlsxWriter(writer) }

    fn build_workbook(table: &Table) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        for (col, title) in (0u16..).zip(COLUMNS) {
            worksheet.write_string_with_format(0, col, title, &header)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (row, cells) in (1u32..).zip(&table.rows) {
            for (col, cell) in (0u16..).zip(cells) {
                // blank stays blank, no empty string cell
                if !cell.is_empty() {
                    worksheet.write_string(row, col, cell)?;
                }
            }
        }
        worksheet.autofit();

        Ok(workbook)
    }
}

impl<'a> TableWriter for XlsxWriter<'a> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        debug!("Writing {} rows to workbook", table.rows.len());
        let mut workbook = Self::build_workbook(table)?;
        let buf = workbook.save_to_buffer()?;

        self.0.write_all(&buf)?;
        self.0.flush().map_err(Into::into)
    }
}
