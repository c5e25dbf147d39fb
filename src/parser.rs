//! The commit log parser.
//!
//! Reads the text printed by `git log --date=short` one line at a time and
//! folds it into a list of [`Commit`]s. Each line is classified against a
//! small ordered table of prefixes; indented message lines are then run
//! through the message grammar (type header, footers, body).

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use strum::{Display, IntoEnumIterator};
use thiserror::Error;

use crate::git::{Commit, CommitType, Commits};

/// Message lines in `git log` output carry this indent.
const MESSAGE_INDENT: &str = "    ";

/// `Name Surname <email>`, the remainder of an `Author:` line.
static AUTHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s*<(?P<email>[^<>]*)>$").expect("Invalid regex")
});

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum HeaderLine {
    Commit,
    MergeSummary,
    MergeParents,
    Author,
    Date,
}

/// Header line prefixes, in priority order. Matching ignores ASCII case.
const HEADER_RULES: &[(&str, HeaderLine)] = &[
    ("commit", HeaderLine::Commit),
    ("merge ", HeaderLine::MergeSummary),
    ("merge:", HeaderLine::MergeParents),
    ("author:", HeaderLine::Author),
    ("date:", HeaderLine::Date),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Footer {
    BreakingChange,
    Closes,
    ChangeId,
}

/// Footer keywords, in priority order. Matching ignores ASCII case.
const FOOTER_RULES: &[(&str, Footer)] = &[
    ("BREAKING CHANGE", Footer::BreakingChange),
    ("Closes", Footer::Closes),
    ("Change-Id", Footer::ChangeId),
];

/// The header whose content could not be extracted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum HeaderField {
    Commit,
    Author,
    Date,
}

/// A non-fatal condition met while parsing. Diagnostics are logged as
/// warnings and never stop the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("unexpected line {line_no}: {line:?}")]
    UnexpectedLine { line_no: usize, line: String },

    #[error("malformed {field} header on line {line_no}: {line:?}")]
    MalformedHeader {
        line_no: usize,
        field: HeaderField,
        line: String,
    },
}

/// Everything a parse produces: the commits in encounter order and the
/// diagnostics reported along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub commits: Commits,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses `git log` output lines into commits.
///
/// # Example
///
/// ```
/// let log = "commit abc123\nAuthor: Jane Doe <jane@example.com>\n\n    feat: add it";
/// let commits = gitsheet::parse(log.lines());
///
/// assert_eq!(commits.len(), 1);
/// assert_eq!(commits[0].subject.as_deref(), Some("add it"));
/// ```
pub fn parse<I>(lines: I) -> Commits
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    parse_with_diagnostics(lines).commits
}

/// Like [`parse`], but also hands back every diagnostic that was logged.
pub fn parse_with_diagnostics<I>(lines: I) -> ParsedLog
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut parser = LogParser::default();
    for (idx, line) in lines.into_iter().enumerate() {
        parser.feed(idx + 1, line.as_ref());
    }
    parser.finish()
}

#[derive(Default)]
struct LogParser {
    open: Option<Commit>,
    out: ParsedLog,
}

impl LogParser {
    fn feed(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return;
        }

        if let Some((kind, rest)) = match_header(line) {
            self.header(line_no, line, kind, rest);
        } else if let Some(message) = line.strip_prefix(MESSAGE_INDENT) {
            match self.open.as_mut() {
                Some(commit) => apply_message(commit, message.trim()),
                None => self.unexpected(line_no, line),
            }
        } else {
            self.unexpected(line_no, line);
        }
    }

    fn header(&mut self, line_no: usize, line: &str, kind: HeaderLine, rest: &str) {
        if kind == HeaderLine::Commit {
            let hash = rest.trim();
            if hash.is_empty() {
                self.malformed(line_no, HeaderField::Commit, line);
            }
            if let Some(done) = self.open.replace(Commit::new(hash)) {
                self.out.commits.push(done);
            }
            return;
        }

        let Some(commit) = self.open.as_mut() else {
            self.unexpected(line_no, line);
            return;
        };

        let malformed = match kind {
            HeaderLine::Author => match AUTHOR_REGEX.captures(rest.trim()) {
                Some(caps) => {
                    commit.author = non_empty(&caps["name"]);
                    commit.email = non_empty(&caps["email"]);
                    None
                }
                None => Some(HeaderField::Author),
            },
            HeaderLine::Date => match non_empty(rest.trim()) {
                Some(date) => {
                    commit.date = Some(date);
                    None
                }
                None => Some(HeaderField::Date),
            },
            HeaderLine::Commit | HeaderLine::MergeSummary | HeaderLine::MergeParents => None,
        };

        if let Some(field) = malformed {
            self.malformed(line_no, field, line);
        }
    }

    fn unexpected(&mut self, line_no: usize, line: &str) {
        self.report(Diagnostic::UnexpectedLine {
            line_no,
            line: line.to_owned(),
        });
    }

    fn malformed(&mut self, line_no: usize, field: HeaderField, line: &str) {
        self.report(Diagnostic::MalformedHeader {
            line_no,
            field,
            line: line.to_owned(),
        });
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.out.diagnostics.push(diagnostic);
    }

    fn finish(mut self) -> ParsedLog {
        if let Some(last) = self.open.take() {
            self.out.commits.push(last);
        }
        debug!(
            "Parsed {} commits with {} diagnostics",
            self.out.commits.len(),
            self.out.diagnostics.len()
        );
        self.out
    }
}

/// Applies one trimmed message line to the open commit.
fn apply_message(commit: &mut Commit, message: &str) {
    if message.is_empty() {
        return;
    }

    // Only the first header line of a message may set the type; once it is
    // set, later type-looking lines fall through to footers and body.
    if commit.commit_type.is_none() {
        let type_newly_set = apply_type_header(commit, message);
        if type_newly_set {
            return;
        }
    }

    if let Some((footer, rest)) = match_footer(message) {
        apply_footer(commit, footer, rest);
        return;
    }

    commit.body = Some(message.to_owned());
}

/// Sets type, and scope and subject when present. Returns whether a type
/// keyword prefixed the line.
fn apply_type_header(commit: &mut Commit, message: &str) -> bool {
    let Some((commit_type, rest)) = CommitType::iter()
        .find_map(|t| strip_prefix_ignore_case(message, t.as_ref()).map(|rest| (t, rest)))
    else {
        return false;
    };

    commit.commit_type = Some(commit_type);
    if let Some(subject) = rest.strip_prefix(':') {
        commit.subject = non_empty(subject.trim());
    } else if let Some((scope, subject)) = rest.strip_prefix('(').and_then(|r| r.split_once("):")) {
        commit.scope = non_empty(scope);
        commit.subject = non_empty(subject.trim());
    }
    true
}

fn apply_footer(commit: &mut Commit, footer: Footer, rest: &str) {
    let rest = rest.trim_start();
    let value = non_empty(rest.strip_prefix(':').unwrap_or(rest).trim());

    match (footer, value) {
        (Footer::BreakingChange, Some(value)) => commit.breaking_change = Some(value),
        (Footer::Closes, Some(value)) => match commit.issue.as_mut() {
            Some(issue) => {
                issue.push(',');
                issue.push_str(&value);
            }
            None => commit.issue = Some(value),
        },
        _ => {}
    }
}

/// `commit` only counts as a whole word, with or without a hash after it.
fn match_header(line: &str) -> Option<(HeaderLine, &str)> {
    match_rule(line, HEADER_RULES)
        .filter(|&(kind, rest)| kind != HeaderLine::Commit || ends_keyword(rest, false))
}

/// `Closes` and `BREAKING CHANGE` only count as whole words: `Closes #1`
/// and `Closes: #1` match, `Closest match` does not. `Change-Id` is a
/// plain prefix.
fn match_footer(message: &str) -> Option<(Footer, &str)> {
    match_rule(message, FOOTER_RULES)
        .filter(|&(footer, rest)| footer == Footer::ChangeId || ends_keyword(rest, true))
}

fn ends_keyword(rest: &str, colon: bool) -> bool {
    rest.chars()
        .next()
        .map_or(true, |c| c.is_whitespace() || (colon && c == ':'))
}

fn match_rule<'a, K: Copy>(line: &'a str, rules: &[(&str, K)]) -> Option<(K, &'a str)> {
    rules
        .iter()
        .find_map(|&(prefix, kind)| strip_prefix_ignore_case(line, prefix).map(|rest| (kind, rest)))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}
