//! ロギングシステム
//!
//! `log` クレートのバックエンドとして、stderr とファイルへ行単位でログを出力する

use crate::error::{ConfigError, Result, SalvareError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Error => LogLevel::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::InvalidValue {
                key: "logLevel".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// ロガー
///
/// TUI実行中は画面を壊さないよう stderr 出力を止め、ファイルだけに書く。
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn format_line(level: LogLevel, target: &str, message: &str) -> String {
        format!(
            "{} {} [{}] {}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            level.tag(),
            target,
            message
        )
    }

    fn write_line(&self, line: &str) {
        if self.output_stderr {
            eprintln!("{}", line);
        }

        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", line);
            }
        }
    }

    /// `log` クレートのグローバルロガーとして登録
    pub fn install(self) -> Result<()> {
        if let Some(path) = &self.output_file {
            crate::config::ensure_parent_dir(path)?;
        }

        let filter = self.level.to_filter();
        log::set_boxed_logger(Box::new(self))
            .map_err(|err| SalvareError::Application(format!("logger already installed: {}", err)))?;
        log::set_max_level(filter);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.should_log(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_line(record.level().into(), record.target(), &record.args().to_string());
        self.write_line(&line);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::TempDir;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::for_development().without_stderr();
        assert!(logger.should_log(LogLevel::Debug));
        assert!(logger.should_log(LogLevel::Error));
        assert!(!logger.should_log(LogLevel::Trace));

        let info_logger = Logger::for_development().with_level(LogLevel::Info).without_stderr();
        assert!(!info_logger.should_log(LogLevel::Debug));
        assert!(info_logger.should_log(LogLevel::Warning));
    }

    #[test]
    fn parses_level_names() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn install_registers_global_logger_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("debug.log");
        Logger::new(LogLevel::Info)
            .without_stderr()
            .with_file_output(&path)
            .install()
            .unwrap();

        log::warn!(target: "salvare::logging", "installed");
        assert!(std::fs::read_to_string(&path).unwrap().contains("installed"));
        assert!(Logger::new(LogLevel::Info).without_stderr().install().is_err());
    }

    #[test]
    fn writes_records_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("debug.log");
        let logger = Logger::new(LogLevel::Info).without_stderr().with_file_output(&path);

        logger.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .target("salvare::store")
                .args(format_args!("saved {}", "https://example.com"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO [salvare::store] saved https://example.com"));
        assert!(!content.contains("hidden"));
    }
}
