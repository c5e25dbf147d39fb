use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The fixed vocabulary of commit types recognized in a message header.
///
/// Declaration order is matching priority: when a message line is checked
/// for a type keyword, variants are tried in this order and the first one
/// that prefixes the line wins.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommitType {
    Build,
    Ci,
    Docs,
    Feat,
    Fix,
    Pref,
    Refactor,
    Style,
    Test,
}

/// The struct representation of a `Commit`, filled in line by line as the
/// log is read. Anything that was never seen stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// The hash following the `commit` keyword
    pub hash: String,
    /// The author name
    pub author: Option<String>,
    /// The author email, without the angle brackets
    pub email: Option<String>,
    /// The date exactly as printed by `git log`
    pub date: Option<String>,
    /// The commit type, taken from the first header line of the message
    pub commit_type: Option<CommitType>,
    /// The parenthesized scope after the type (if any)
    pub scope: Option<String>,
    /// The summary after `type:` or `type(scope):`
    pub subject: Option<String>,
    /// The last free-form message line
    pub body: Option<String>,
    /// Comma-joined references from every `Closes` footer
    pub issue: Option<String>,
    /// Text of the `BREAKING CHANGE` footer
    pub breaking_change: Option<String>,
}

impl Commit {
    /// Opens a commit with only its hash known.
    pub fn new<S: Into<String>>(hash: S) -> Self {
        Commit {
            hash: hash.into(),
            ..Commit::default()
        }
    }

    /// Projects the commit onto the ten table columns, in
    /// [`COLUMNS`](crate::COLUMNS) order.
    pub fn cells(&self) -> [Option<&str>; 10] {
        [
            Some(self.hash.as_str()),
            self.author.as_deref(),
            self.email.as_deref(),
            self.date.as_deref(),
            self.commit_type.as_ref().map(|t| t.as_ref()),
            self.scope.as_deref(),
            self.subject.as_deref(),
            self.body.as_deref(),
            self.issue.as_deref(),
            self.breaking_change.as_deref(),
        ]
    }
}

/// A convienience type for multiple commits
pub type Commits = Vec<Commit>;
