//! salvare - terminal bookmark manager
//!
//! タグトークンエディタを中心としたブックマーク管理

// コアモジュール
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod metadata;
pub mod store;

// ロジック層
pub mod input;
pub mod search;
pub mod tags;

// 表示層
pub mod app;
pub mod ui;

// 公開API
pub use app::App;
pub use error::{Result, SalvareError};
pub use frontend::TuiApplication;
pub use store::{Bookmark, JsonFileStore, MemoryStore, RecordStore};
pub use tags::{TagEditor, TagInput, TagKey, TokenSequence};
