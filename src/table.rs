use std::borrow::Cow;

use crate::git::Commit;

/// Column headers of the exported table, in order.
pub const COLUMNS: [&str; 10] = [
    "Commit Hash",
    "Author",
    "Email",
    "Date",
    "Type",
    "Scope",
    "Subject",
    "Body",
    "Issues",
    "BreakingChange",
];

/// One table row; unset commit fields are empty strings.
pub type Row = [String; 10];

/// The rows a [`TableWriter`](crate::fmt::TableWriter) writes, one per
/// commit, already sanitized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Creates a table from commits, which we can then hand to a writer
    ///
    /// # Example
    ///
    /// ```
    /// # use gitsheet::{Commit, Table};
    /// let table = Table::from_commits(&[Commit::new("abc123")]);
    ///
    /// assert_eq!(table.rows[0][0], "abc123");
    /// assert_eq!(table.rows[0][1], "");
    /// ```
    pub fn from_commits(commits: &[Commit]) -> Table {
        let rows = commits
            .iter()
            .map(|commit| {
                commit
                    .cells()
                    .map(|cell| cell.map(sanitize_cell).unwrap_or_default().into_owned())
            })
            .collect();

        Table { rows }
    }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// Strips the control characters spreadsheet XML cannot hold:
/// U+0000 to U+0008, U+000B and U+000E to U+001F.
pub fn sanitize_cell(cell: &str) -> Cow<'_, str> {
    if cell.chars().any(is_illegal) {
        Cow::Owned(cell.chars().filter(|&c| !is_illegal(c)).collect())
    } else {
        Cow::Borrowed(cell)
    }
}

fn is_illegal(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0E}'..='\u{1F}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommitType;

    #[test]
    fn sanitize_strips_control_chars() {
        assert_eq!(sanitize_cell("a\u{0}b\u{8}c\u{b}d\u{e}e\u{1f}f"), "abcdef");
    }

    #[test]
    fn sanitize_keeps_tabs_and_newlines() {
        let cell = "line\tone\nline two\r\u{c}";
        assert!(matches!(sanitize_cell(cell), Cow::Borrowed(_)));
        assert_eq!(sanitize_cell(cell), cell);
    }

    #[test]
    fn rows_follow_column_order() {
        let commit = Commit {
            author: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            date: Some("2024-01-05".into()),
            commit_type: Some(CommitType::Fix),
            scope: Some("core".into()),
            subject: Some("correct null check".into()),
            issue: Some("#7".into()),
            ..Commit::new("abc123")
        };
        let table = Table::from_commits(&[commit]);

        assert_eq!(
            table.rows,
            vec![[
                "abc123",
                "Jane Doe",
                "jane@example.com",
                "2024-01-05",
                "fix",
                "core",
                "correct null check",
                "",
                "#7",
                ""
            ]
            .map(String::from)]
        );
    }

    #[test]
    fn cells_are_sanitized() {
        let commit = Commit {
            body: Some("bell\u{7} in body".into()),
            ..Commit::new("abc")
        };
        let table = Table::from_commits(&[commit]);
        assert_eq!(table.rows[0][7], "bell in body");
    }

    #[test]
    fn empty_table() {
        assert!(Table::from_commits(&[]).is_empty());
    }
}
