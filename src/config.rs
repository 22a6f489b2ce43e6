//! 設定とコマンドライン引数
//!
//! 設定ファイル（JSON）とコマンドライン指定を統合する。コマンドライン側が優先。

use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "salvare";

/// 実行時オプション
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// ブックマーク保存先（未指定時は `<data_dir>/salvare/bookmarks.json`）
    pub store_path: Option<PathBuf>,
    /// デバッグログ出力先（未指定時はログファイルなし）
    pub debug_log_path: Option<PathBuf>,
    /// ログレベル名
    pub log_level: Option<String>,
}

impl Options {
    /// 設定ファイルを読み込む（存在しなければ既定値）
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let invalid = |message: String| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
        let options = serde_json::from_str(&content).map_err(|err| invalid(err.to_string()))?;
        Ok(options)
    }

    pub fn merged_with(&self, overrides: &Options) -> Options {
        Options {
            store_path: overrides
                .store_path
                .clone()
                .or_else(|| self.store_path.clone()),
            debug_log_path: overrides
                .debug_log_path
                .clone()
                .or_else(|| self.debug_log_path.clone()),
            log_level: overrides
                .log_level
                .clone()
                .or_else(|| self.log_level.clone()),
        }
    }

    /// ストアのパスを確定（`~` と環境変数を展開）
    pub fn resolve_store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => expand_path(path),
            None => default_store_path().ok_or_else(|| {
                ConfigError::InvalidValue {
                    key: "storePath".to_string(),
                    value: "<no data directory>".to_string(),
                }
                .into()
            }),
        }
    }

    pub fn resolve_log_path(&self) -> Result<Option<PathBuf>> {
        self.debug_log_path.as_deref().map(expand_path).transpose()
    }

    pub fn log_level(&self) -> Result<LogLevel> {
        match &self.log_level {
            Some(name) => Ok(name.parse()?),
            None => Ok(LogLevel::Info),
        }
    }
}

/// 既定の設定ファイルパス
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("bookmarks.json"))
}

/// `~` と `$VAR` を展開
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|err| ConfigError::InvalidValue {
        key: "path".to_string(),
        value: format!("{} ({})", raw, err),
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// ヘルパー：親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// 実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// 対話的なTUI
    Tui,
    /// URLを取得して保存
    Add(String),
    /// 一覧表示（検索語つき）
    List(Vec<String>),
    /// URLのブックマークを削除
    Delete(String),
    /// 使い方を表示
    Help,
}

/// 解析済みのコマンドライン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub overrides: Options,
    pub command: CliCommand,
}

pub const USAGE: &str = "\
Usage: salvare [OPTIONS] [COMMAND]

Commands:
  add <URL>          fetch the page and save it as a bookmark
  list [TERMS...]    print bookmarks matching the search terms
  delete <URL>       remove a bookmark
  (none)             open the interactive view

Options:
  --store <PATH>       bookmark file
  --config <PATH>      configuration file
  --debug-log <PATH>   write logs to PATH
  --log-level <LEVEL>  trace, debug, info, warn or error
  -h, --help           show this message";

impl CliArgs {
    /// 引数（プログラム名を除く）を解析
    pub fn parse<I>(args: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config_path = None;
        let mut overrides = Options::default();
        let mut positional = Vec::new();

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let mut value_for = |option: &str| {
                iter.next()
                    .filter(|value| !value.starts_with("--"))
                    .ok_or_else(|| ConfigError::MissingValue {
                        option: option.to_string(),
                    })
            };

            match arg.as_str() {
                "--store" => overrides.store_path = Some(PathBuf::from(value_for("--store")?)),
                "--config" => config_path = Some(PathBuf::from(value_for("--config")?)),
                "--debug-log" => {
                    overrides.debug_log_path = Some(PathBuf::from(value_for("--debug-log")?))
                }
                "--log-level" => overrides.log_level = Some(value_for("--log-level")?),
                "-h" | "--help" => {
                    return Ok(Self {
                        config_path,
                        overrides,
                        command: CliCommand::Help,
                    })
                }
                other if other.starts_with("--") => {
                    return Err(ConfigError::UnknownArgument { arg: other.to_string() })
                }
                _ => positional.push(arg),
            }
        }

        let command = Self::parse_command(positional)?;
        Ok(Self {
            config_path,
            overrides,
            command,
        })
    }

    fn parse_command(positional: Vec<String>) -> std::result::Result<CliCommand, ConfigError> {
        let mut iter = positional.into_iter();
        let Some(name) = iter.next() else {
            return Ok(CliCommand::Tui);
        };

        let mut single_url = |command: &str| {
            let url = iter.next().ok_or_else(|| ConfigError::MissingValue {
                option: command.to_string(),
            })?;
            match iter.next() {
                Some(extra) => Err(ConfigError::UnknownArgument { arg: extra }),
                None => Ok(url),
            }
        };

        match name.as_str() {
            "add" => Ok(CliCommand::Add(single_url("add")?)),
            "delete" => Ok(CliCommand::Delete(single_url("delete")?)),
            "list" => Ok(CliCommand::List(iter.collect())),
            "help" => Ok(CliCommand::Help),
            _ => Err(ConfigError::UnknownArgument { arg: name }),
        }
    }

    /// 設定ファイルとコマンドライン指定を統合したオプション
    pub fn resolve_options(&self) -> Result<Options> {
        let file_options = match self.config_path.as_deref() {
            Some(path) => Options::load(&expand_path(path)?)?,
            None => match default_config_path() {
                Some(path) => Options::load(&path)?,
                None => Options::default(),
            },
        };
        Ok(file_options.merged_with(&self.overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments_opens_tui() {
        let parsed = CliArgs::parse(Vec::new()).unwrap();
        assert_eq!(parsed.command, CliCommand::Tui);
        assert_eq!(parsed.overrides, Options::default());
    }

    #[test]
    fn parses_options_and_command() {
        let parsed = CliArgs::parse(args(&[
            "--store",
            "/tmp/marks.json",
            "--log-level",
            "debug",
            "add",
            "https://example.com",
        ]))
        .unwrap();

        assert_eq!(parsed.overrides.store_path, Some(PathBuf::from("/tmp/marks.json")));
        assert_eq!(parsed.overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(parsed.command, CliCommand::Add("https://example.com".to_string()));
    }

    #[test]
    fn list_collects_terms() {
        let parsed = CliArgs::parse(args(&["list", "rust", "tag:cli"])).unwrap();
        assert_eq!(
            parsed.command,
            CliCommand::List(vec!["rust".to_string(), "tag:cli".to_string()])
        );
    }

    #[test]
    fn reports_bad_arguments() {
        assert!(matches!(
            CliArgs::parse(args(&["--store"])),
            Err(ConfigError::MissingValue { .. })
        ));
        assert!(matches!(
            CliArgs::parse(args(&["--verbose"])),
            Err(ConfigError::UnknownArgument { .. })
        ));
        assert!(matches!(
            CliArgs::parse(args(&["delete"])),
            Err(ConfigError::MissingValue { .. })
        ));
        assert!(matches!(
            CliArgs::parse(args(&["frobnicate"])),
            Err(ConfigError::UnknownArgument { .. })
        ));
    }

    #[test]
    fn overrides_win_over_file_options() {
        let file = Options {
            store_path: Some(PathBuf::from("/file/store.json")),
            debug_log_path: Some(PathBuf::from("/file/debug.log")),
            log_level: None,
        };
        let cli = Options {
            store_path: Some(PathBuf::from("/cli/store.json")),
            ..Options::default()
        };

        let merged = file.merged_with(&cli);
        assert_eq!(merged.store_path, Some(PathBuf::from("/cli/store.json")));
        assert_eq!(merged.debug_log_path, Some(PathBuf::from("/file/debug.log")));
    }

    #[test]
    fn loads_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"storePath": "/data/marks.json", "logLevel": "warn"}"#).unwrap();

        let options = Options::load(&path).unwrap();
        assert_eq!(options.store_path, Some(PathBuf::from("/data/marks.json")));
        assert_eq!(options.log_level().unwrap(), LogLevel::Warning);

        std::fs::write(&path, "[1, 2").unwrap();
        assert!(Options::load(&path).is_err());
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let options = Options::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.log_level().unwrap(), LogLevel::Info);
    }

    #[test]
    fn expands_home_directory() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_path(Path::new("~/marks.json")).unwrap();
            assert_eq!(expanded, home.join("marks.json"));
        }
    }
}
