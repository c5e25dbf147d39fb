use std::{
    env,
    ffi::OsString,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    process::Command,
};

use log::debug;

use crate::{
    config::RawCfg,
    error::{Error, Result},
    fmt::{JsonWriter, TableFormat, TableWriter, XlsxWriter},
    git::{Commit, Commits},
    parser,
    table::Table,
    DEFAULT_CONFIG_FILE,
};

/// The base struct used to set options and interact with the library.
#[derive(Debug, Clone, Default)]
pub struct GitSheet {
    /// Only include commits after this date, passed through to
    /// `git log --since`
    pub after: Option<String>,
    /// Only include commits before this date, passed through to
    /// `git log --before`
    pub before: Option<String>,
    /// The git dir with all the meta-data (Typically the `.git` sub-directory
    /// of the project)
    pub git_dir: Option<PathBuf>,
    /// The working directory of the git project (typically the project
    /// directory, or parent of the `.git` directory)
    pub git_work_tree: Option<PathBuf>,
    /// The file to write the table to (Defaults to `git_log.<extension>`)
    pub outfile: Option<String>,
    /// The format to output the table in (Defaults to Xlsx)
    pub out_format: TableFormat,
}

impl GitSheet {
    /// Creates a `GitSheet` struct for the current working directory, using
    /// the default `.gitsheet.toml` configuration file when there is one.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        debug!("Creating default gitsheet with new()");
        let cwd = env::current_dir().map_err(|_| Error::CurrentDir)?;
        let cfg_file = cwd.join(DEFAULT_CONFIG_FILE);
        if cfg_file.is_file() {
            GitSheet::default().try_config_file(&cfg_file)
        } else {
            debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(GitSheet::default())
        }
    }

    /// Creates a `GitSheet` struct from a custom named TOML configuration
    /// file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::from_file("/myproject/gitsheet.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Creating gitsheet with \n\tfile: {:?}", file.as_ref());
        GitSheet::default().try_config_file(file.as_ref())
    }

    /// Creates a `GitSheet` struct using a specific git working directory OR
    /// git directory.
    ///
    /// **NOTE:** If you specify a `.git` folder the parent will be used as the
    /// working tree, and vice versa.
    ///
    /// # Example
    ///
    /// ```
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::with_dir("/myproject");
    /// assert_eq!(sheet.git_dir.as_deref(), Some("/myproject/.git".as_ref()));
    /// ```
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        debug!("Creating gitsheet with \n\tdir: {:?}", dir.as_ref());
        let dir = dir.as_ref();
        if dir.ends_with(".git") {
            GitSheet {
                git_dir: Some(dir.to_path_buf()),
                git_work_tree: dir.parent().map(Path::to_path_buf),
                ..GitSheet::default()
            }
        } else {
            GitSheet {
                git_dir: Some(dir.join(".git")),
                git_work_tree: Some(dir.to_path_buf()),
                ..GitSheet::default()
            }
        }
    }

    // Apply every option set in a config file
    fn try_config_file(mut self, cfg_file: &Path) -> Result<Self> {
        debug!("Trying to use config file: {:?}", cfg_file);
        let toml_s = fs::read_to_string(cfg_file)?;
        let cfg: RawCfg =
            toml::from_str(&toml_s).map_err(|_| Error::ConfigParse(cfg_file.to_path_buf()))?;
        let cfg = cfg.gitsheet;

        if cfg.after.is_some() {
            self.after = cfg.after;
        }
        if cfg.before.is_some() {
            self.before = cfg.before;
        }
        if cfg.outfile.is_some() {
            self.outfile = cfg.outfile;
        }
        if let Some(format) = cfg.output_format {
            self.out_format = format;
        }
        if cfg.git_dir.is_some() {
            self.git_dir = cfg.git_dir;
        }
        if cfg.git_work_tree.is_some() {
            self.git_work_tree = cfg.git_work_tree;
        }

        debug!("Returning gitsheet:\n{:?}", self);
        Ok(self)
    }

    /// Only include commits after this date (anything `git log --since`
    /// accepts, conventionally `YYYY-MM-DD`)
    ///
    /// **NOTE:** Anything set here will override anything in a configuration
    /// TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::new().unwrap().after("2024-01-01");
    /// ```
    pub fn after<S: Into<String>>(mut self, date: S) -> GitSheet {
        self.after = Some(date.into());
        self
    }

    /// Only include commits before this date (anything `git log --before`
    /// accepts, conventionally `YYYY-MM-DD`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::new().unwrap().before("2024-07-01");
    /// ```
    pub fn before<S: Into<String>>(mut self, date: S) -> GitSheet {
        self.before = Some(date.into());
        self
    }

    /// Sets the `git` metadata directory (typically `.git` child of your
    /// project working tree)
    pub fn git_dir<P: AsRef<Path>>(mut self, d: P) -> GitSheet {
        self.git_dir = Some(d.as_ref().to_path_buf());
        self
    }

    /// Sets the `git` working tree directory (typically your project directory)
    pub fn git_work_tree<P: AsRef<Path>>(mut self, d: P) -> GitSheet {
        self.git_work_tree = Some(d.as_ref().to_path_buf());
        self
    }

    /// Sets the file the table is written to
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::new().unwrap().outfile("/reports/q1.xlsx");
    /// ```
    pub fn outfile<S: Into<String>>(mut self, f: S) -> GitSheet {
        self.outfile = Some(f.into());
        self
    }

    /// The format of output for the table (Defaults to Xlsx)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::{fmt::TableFormat, GitSheet};
    /// let sheet = GitSheet::new().unwrap().output_format(TableFormat::Json);
    /// ```
    pub fn output_format(mut self, f: TableFormat) -> GitSheet {
        self.out_format = f;
        self
    }

    /// The arguments `git` is run with to print the log
    pub fn log_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(dir) = &self.git_dir {
            let mut arg = OsString::from("--git-dir=");
            arg.push(dir);
            args.push(arg);
        }
        if let Some(tree) = &self.git_work_tree {
            let mut arg = OsString::from("--work-tree=");
            arg.push(tree);
            args.push(arg);
        }
        args.extend(["log", "--date=short", "--no-decorate", "--no-color"].map(OsString::from));
        if let Some(after) = &self.after {
            args.push(format!("--since={after}").into());
        }
        if let Some(before) = &self.before {
            args.push(format!("--before={before}").into());
        }
        args
    }

    /// Runs `git log` and returns its output, one entry per line.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::new().unwrap();
    /// let lines = sheet.get_log_lines().unwrap();
    /// ```
    pub fn get_log_lines(&self) -> Result<Vec<String>> {
        let args = self.log_args();
        debug!("Running git with {:?}", args);
        let output = Command::new("git")
            .args(&args)
            .output()
            .map_err(Error::GitUnavailable)?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::GitLog {
                status: output.status,
                stderr: stderr.trim().to_owned(),
            });
        }
        if !stderr.trim().is_empty() {
            debug!("git log stderr: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_owned)
            .collect())
    }

    /// Retrieves and parses every commit in the configured date range.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::new().unwrap().after("2024-01-01");
    /// let commits = sheet.get_commits().unwrap();
    /// ```
    pub fn get_commits(&self) -> Result<Commits> {
        Ok(parser::parse(self.get_log_lines()?))
    }

    /// The file `write_table()` writes to
    pub fn output_path(&self) -> PathBuf {
        match &self.outfile {
            Some(f) => PathBuf::from(f),
            None => PathBuf::from(format!("git_log.{}", self.out_format.extension())),
        }
    }

    /// Retrieves the commits and writes them to `output_path()`. Returns the
    /// path written, or `None` when there were no commits, in which case no
    /// file is created.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gitsheet::GitSheet;
    /// let sheet = GitSheet::new().unwrap();
    /// if let Some(path) = sheet.write_table().unwrap() {
    ///     println!("Git log saved to {}", path.display());
    /// }
    /// ```
    pub fn write_table(&self) -> Result<Option<PathBuf>> {
        let commits = self.get_commits()?;
        self.write_commits_to(self.output_path(), &commits)
    }

    /// Writes `commits` to the file `path` in the configured format, unless
    /// there are none.
    pub fn write_commits_to<P: AsRef<Path>>(
        &self,
        path: P,
        commits: &[Commit],
    ) -> Result<Option<PathBuf>> {
        if commits.is_empty() {
            debug!("No commits, not writing {:?}", path.as_ref());
            return Ok(None);
        }

        debug!("Writing table to file: {:?}", path.as_ref());
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        match self.out_format {
            TableFormat::Xlsx => self.write_table_with(&mut XlsxWriter::new(&mut out), commits)?,
            TableFormat::Json => self.write_table_with(&mut JsonWriter::new(&mut out), commits)?,
        }

        Ok(Some(path.as_ref().to_path_buf()))
    }

    /// Writes commits with a specified `TableWriter` format
    ///
    /// # Examples
    ///
    /// ```
    /// # use gitsheet::{Commit, GitSheet, fmt::JsonWriter};
    /// let sheet = GitSheet::default();
    /// let mut out = Vec::new();
    ///
    /// sheet
    ///     .write_table_with(&mut JsonWriter::new(&mut out), &[Commit::new("abc123")])
    ///     .unwrap();
    /// assert!(String::from_utf8(out).unwrap().contains("abc123"));
    /// ```
    pub fn write_table_with<W>(&self, writer: &mut W, commits: &[Commit]) -> Result<()>
    where
        W: TableWriter,
    {
        debug!("Writing {} commits with writer", commits.len());
        writer.write_table(&Table::from_commits(commits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(sheet: &GitSheet) -> Vec<String> {
        sheet
            .log_args()
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn default_log_args() {
        assert_eq!(
            args(&GitSheet::default()),
            ["log", "--date=short", "--no-decorate", "--no-color"]
        );
    }

    #[test]
    fn date_range_args() {
        let sheet = GitSheet::default().after("2024-01-01").before("2024-02-01");
        assert_eq!(
            args(&sheet),
            [
                "log",
                "--date=short",
                "--no-decorate",
                "--no-color",
                "--since=2024-01-01",
                "--before=2024-02-01"
            ]
        );
    }

    #[test]
    fn dir_args() {
        let sheet = GitSheet::with_dir("/myproject/.git");
        assert_eq!(sheet.git_work_tree, Some(PathBuf::from("/myproject")));
        assert_eq!(
            &args(&sheet)[..2],
            ["--git-dir=/myproject/.git", "--work-tree=/myproject"]
        );
    }

    #[test]
    fn output_path_follows_format() {
        assert_eq!(GitSheet::default().output_path(), PathBuf::from("git_log.xlsx"));
        assert_eq!(
            GitSheet::default()
                .output_format(TableFormat::Json)
                .output_path(),
            PathBuf::from("git_log.json")
        );
        assert_eq!(
            GitSheet::default().outfile("out.xlsx").output_path(),
            PathBuf::from("out.xlsx")
        );
    }

    #[test]
    fn config_file_then_builder() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("gitsheet.toml");
        fs::write(
            &cfg,
            "[gitsheet]\nafter = \"2024-01-01\"\noutput-format = \"json\"\n",
        )
        .unwrap();

        let sheet = GitSheet::from_file(&cfg).unwrap().after("2024-03-01");
        assert_eq!(sheet.after.as_deref(), Some("2024-03-01"));
        assert_eq!(sheet.out_format, TableFormat::Json);
    }

    #[test]
    fn bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("gitsheet.toml");
        fs::write(&cfg, "[gitsheet\n").unwrap();

        assert!(matches!(GitSheet::from_file(&cfg), Err(Error::ConfigParse(_))));
        assert!(matches!(
            GitSheet::from_file(dir.path().join("missing.toml")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn no_commits_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("git_log.xlsx");

        let written = GitSheet::default().write_commits_to(&path, &[]).unwrap();
        assert_eq!(written, None);
        assert!(!path.exists());
    }

    #[test]
    fn commits_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("git_log.json");
        let commits = parser::parse(["commit abc123", "    feat: export"]);

        let sheet = GitSheet::default().output_format(TableFormat::Json);
        let written = sheet.write_commits_to(&path, &commits).unwrap();
        assert_eq!(written, Some(path.clone()));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Subject\": \"export\""));
    }
}
