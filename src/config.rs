use std::path::PathBuf;

use serde::Deserialize;

use crate::fmt::TableFormat;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCfg {
    #[serde(default)]
    pub gitsheet: RawSheetCfg,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawSheetCfg {
    pub after: Option<String>,
    pub before: Option<String>,
    pub outfile: Option<String>,
    pub output_format: Option<TableFormat>,
    pub git_dir: Option<PathBuf>,
    pub git_work_tree: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config() {
        let cfg = include_str!("../demos/gitsheet.toml");
        let res = toml::from_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg: RawCfg = res.unwrap();

        assert_eq!(cfg.gitsheet.after, Some("2024-01-01".into()));
        assert_eq!(cfg.gitsheet.before, Some("2024-07-01".into()));
        assert_eq!(cfg.gitsheet.outfile, Some("H1_report.xlsx".into()));
        assert_eq!(cfg.gitsheet.output_format, Some(TableFormat::Xlsx));
        assert_eq!(cfg.gitsheet.git_work_tree, Some("/myproject".into()));
        assert_eq!(cfg.gitsheet.git_dir, Some("/myproject/.git".into()));
    }

    #[test]
    fn dogfood_config() {
        let cfg = include_str!("../.gitsheet.toml");
        let res = toml::from_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg: RawCfg = res.unwrap();

        assert_eq!(cfg.gitsheet.outfile, Some("git_log.xlsx".into()));
        assert_eq!(cfg.gitsheet.after, None);
    }

    #[test]
    fn empty_config() {
        let cfg: RawCfg = toml::from_str("").unwrap();
        assert!(cfg.gitsheet.outfile.is_none());
        assert!(cfg.gitsheet.output_format.is_none());
    }

    #[test]
    fn format_ignores_case() {
        let cfg: RawCfg = toml::from_str("[gitsheet]\noutput-format = \"JSON\"").unwrap();
        assert_eq!(cfg.gitsheet.output_format, Some(TableFormat::Json));
    }

    #[test]
    fn bad_format_is_rejected() {
        let res: Result<RawCfg, _> = toml::from_str("[gitsheet]\noutput-format = \"csv\"");
        assert!(res.is_err());
    }
}
