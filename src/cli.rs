//! sfind 的命令行接口
//!
//! 本模块提供了命令行参数解析、`--from` 日期解析，
//! 以及从参数构建查找选项的功能。

use std::path::PathBuf;

use chrono::{DateTime, Days, Local, NaiveDate};
use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::errors::{FindError, FindResult};
use crate::finder::options::FindOptions;

/// Searches for matching files
#[derive(Parser, Debug, Default)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Paths to search [default: .]
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// The earliest date to search from: 'today', 'yesterday', an int (up
    /// to that many days ago), or an ISO 8601 date such as 2023-05-22
    /// [default: any date]
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Comma-separated file globs to match, e.g. '*.py,*.pyw' [default: any file]
    #[arg(short, long, value_name = "GLOBS", value_delimiter = ',')]
    pub glob: Vec<String>,

    /// Comma-separated suffixes to match, e.g. 'py,pyw'
    #[arg(short, long, visible_alias = "extension", value_name = "SUFFIXES", value_delimiter = ',')]
    pub suffixes: Vec<String>,

    /// Comma-separated substrings the file name must contain
    #[arg(short, long, value_name = "TEXTS", value_delimiter = ',')]
    pub contains: Vec<String>,

    /// Comma-separated directory names to skip [default: none]
    #[arg(short = 'x', long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Compare globs and excluded names case-insensitively
    #[arg(short, long)]
    pub ignorecase: bool,

    /// Print the resolved configuration and exit without searching
    #[arg(long)]
    pub debug: bool,

    /// Log progress to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// 日志级别
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// 验证命令行参数
    ///
    /// 给出了选项却没有任何非空值（例如 `--glob ,`）视为错误。
    pub fn validate(&self) -> FindResult<()> {
        let lists: [(&'static str, &[String]); 4] = [
            ("glob", &self.glob),
            ("suffixes", &self.suffixes),
            ("contains", &self.contains),
            ("exclude", &self.exclude),
        ];
        for (option, values) in lists {
            if !values.is_empty() && non_empty(values).next().is_none() {
                return Err(FindError::EmptyOption { option });
            }
        }
        Ok(())
    }

    /// 构建查找选项，`--from` 相对于当前时间解析
    pub fn build_options(&self) -> FindResult<FindOptions> {
        self.build_options_at(Local::now())
    }

    /// 构建查找选项，`--from` 相对于 `now` 解析
    pub fn build_options_at(&self, now: DateTime<Local>) -> FindResult<FindOptions> {
        self.validate()?;

        let mut options = FindOptions::new()
            .with_globs(self.name_patterns())
            .with_excludes(non_empty(&self.exclude).map(str::to_string))
            .with_paths(self.paths.iter().cloned())
            .with_casefold(self.ignorecase);
        if let Some(text) = &self.from {
            options = options.with_from(parse_from(text, now)?);
        }
        Ok(options)
    }

    /// 获取名称模式：`--glob`、`--suffixes`、`--contains` 按此顺序合并
    pub fn name_patterns(&self) -> Vec<String> {
        let globs = non_empty(&self.glob).map(str::to_string);
        let suffixes = non_empty(&self.suffixes).map(|s| format!("*.{}", s.trim_start_matches('.')));
        let contains = non_empty(&self.contains).map(|s| format!("*{}*", s));
        globs.chain(suffixes).chain(contains).collect()
    }
}

fn non_empty(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// 解析 `--from` 的值
///
/// 接受 `today`、`yesterday`、非负整数 N（N 天前）或 `YYYY-MM-DD`，
/// 结果都是当地时间的午夜。
pub fn parse_from(text: &str, now: DateTime<Local>) -> FindResult<DateTime<Local>> {
    let today = now.date_naive();
    let lowered = text.trim().to_lowercase();

    let date = match lowered.as_str() {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        other => match other.parse::<u64>() {
            Ok(days) => today.checked_sub_days(Days::new(days)),
            Err(_) => NaiveDate::parse_from_str(other, "%Y-%m-%d").ok(),
        },
    };

    date.and_then(local_midnight)
        .ok_or_else(|| FindError::InvalidDate {
            value: text.to_string(),
        })
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    date.and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_from_keywords() {
        assert_eq!(parse_from("today", now()).unwrap(), midnight(2024, 3, 15));
        assert_eq!(parse_from("Yesterday", now()).unwrap(), midnight(2024, 3, 14));
    }

    #[test]
    fn test_parse_from_days_ago() {
        assert_eq!(parse_from("0", now()).unwrap(), midnight(2024, 3, 15));
        assert_eq!(parse_from("15", now()).unwrap(), midnight(2024, 2, 29));
    }

    #[test]
    fn test_parse_from_iso_date() {
        assert_eq!(parse_from("2023-05-22", now()).unwrap(), midnight(2023, 5, 22));
    }

    #[test]
    fn test_parse_from_rejects_garbage() {
        for bad in ["", "tomorrow", "-3", "2023-13-01", "22/05/2023"] {
            match parse_from(bad, now()) {
                Err(FindError::InvalidDate { value }) => assert_eq!(value, bad),
                other => panic!("Expected InvalidDate for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_cli_parses_comma_lists() {
        let cli = Cli::parse_from([
            "sfind", "-g", "*.py,*.pyw", "--extension", "rs", "-c", "test",
            "-x", "target,.git", "-i", "src", "tests",
        ]);
        assert_eq!(cli.glob, ["*.py", "*.pyw"]);
        assert_eq!(cli.suffixes, ["rs"]);
        assert_eq!(cli.exclude, ["target", ".git"]);
        assert!(cli.ignorecase);
        assert_eq!(cli.paths, [PathBuf::from("src"), PathBuf::from("tests")]);
    }

    #[test]
    fn test_name_patterns_merge_in_order() {
        let cli = Cli {
            glob: vec!["*.md".to_string()],
            suffixes: vec!["py".to_string(), ".rs".to_string()],
            contains: vec!["draft".to_string()],
            ..Default::default()
        };
        assert_eq!(cli.name_patterns(), ["*.md", "*.py", "*.rs", "*draft*"]);
    }

    #[test]
    fn test_cli_defaults_build_match_all_config() {
        let cli = Cli::parse_from(["sfind"]);
        let config = cli.build_options_at(now()).unwrap().build().unwrap();
        assert_eq!(config.globs(), ["*"]);
        assert_eq!(config.paths(), [PathBuf::from(".")]);
        assert!(!config.casefold());
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_cli_invalid_pattern() {
        let cli = Cli {
            glob: vec!["[".to_string()],
            ..Default::default()
        };
        let result = cli.build_options_at(now()).unwrap().build();
        assert!(matches!(result, Err(FindError::PatternError { .. })));
    }

    #[test]
    fn test_cli_invalid_from() {
        let cli = Cli {
            from: Some("someday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            cli.build_options_at(now()),
            Err(FindError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_cli_empty_option_value() {
        let cli = Cli::parse_from(["sfind", "--glob", ","]);
        assert!(matches!(
            cli.validate(),
            Err(FindError::EmptyOption { option: "glob" })
        ));
    }

    #[test]
    fn test_cli_verbosity() {
        assert_eq!(Cli::parse_from(["sfind", "-v"]).log_level(), LevelFilter::Info);
        assert_eq!(Cli::parse_from(["sfind", "-vv"]).log_level(), LevelFilter::Debug);
    }
}
