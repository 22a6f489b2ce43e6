//! エラーハンドリングシステム
//!
//! salvare 全体で使用される統一されたエラー型とユーティリティを定義
//! タグエディタのコアはエラーを返さない（無効操作はすべて no-op）

use std::time::{Duration, Instant};
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum SalvareError {
    /// レコードストアのエラー
    #[error("Record store operation failed: {0}")]
    Store(#[from] StoreError),

    /// メタデータ取得エラー
    #[error("Metadata retrieval failed: {0}")]
    Metadata(#[from] MetadataError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// レコードストア固有のエラー
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Record not found: {url}")]
    NotFound { url: String },

    #[error("Corrupted store file {path}: {message}")]
    Corrupted { path: String, message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// メタデータ取得固有のエラー
#[derive(Error, Debug, Clone)]
pub enum MetadataError {
    #[error("Invalid url: {url}")]
    InvalidUrl { url: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Too many redirects starting at {url}")]
    TooManyRedirects { url: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Screen size too small: {width}x{height}")]
    ScreenTooSmall { width: u16, height: u16 },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Missing value for option {option}")]
    MissingValue { option: String },

    #[error("Unknown argument: {arg}")]
    UnknownArgument { arg: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// ステータスラインに表示するエラー情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &SalvareError) -> Self {
        let (message, level) = Self::format_error(error);
        Self {
            message,
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    /// エラー以外の通知（保存完了など）
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ErrorLevel::Info,
            start_time: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    fn format_error(error: &SalvareError) -> (String, ErrorLevel) {
        match error {
            SalvareError::Store(StoreError::NotFound { url }) => {
                (format!("ブックマークが見つかりません: {}", url), ErrorLevel::Warning)
            }
            SalvareError::Store(StoreError::Corrupted { path, .. }) => {
                (format!("保存ファイルが壊れています: {}", path), ErrorLevel::Error)
            }
            SalvareError::Store(StoreError::Io { message }) => {
                (format!("保存に失敗しました: {}", message), ErrorLevel::Error)
            }
            SalvareError::Metadata(MetadataError::InvalidUrl { url }) => {
                (format!("無効なURLです: {}", url), ErrorLevel::Warning)
            }
            SalvareError::Metadata(MetadataError::Request { url, .. }) => {
                (format!("ページを取得できません: {}", url), ErrorLevel::Error)
            }
            SalvareError::Ui(UiError::TerminalInit) => {
                ("ターミナル初期化に失敗しました".to_string(), ErrorLevel::Fatal)
            }
            SalvareError::Ui(UiError::ScreenTooSmall { width, height }) => {
                (format!("画面サイズが小さすぎます: {}x{}", width, height), ErrorLevel::Error)
            }
            _ => (format!("エラーが発生しました: {}", error), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        // TUI表示中でも読めるよう、端末を元に戻してから出力する
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen
        );

        log::error!("panic at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, SalvareError>;

/// 各モジュール固有のResult型
pub mod store {
    pub type Result<T> = std::result::Result<T, super::StoreError>;
}

// std::io::Error から StoreError への変換
impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        StoreError::Io { message: error.to_string() }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialization { message: error.to_string() }
    }
}

impl From<std::io::Error> for SalvareError {
    fn from(error: std::io::Error) -> Self {
        SalvareError::Store(error.into())
    }
}
