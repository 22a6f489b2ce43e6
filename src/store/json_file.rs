//! JSONファイルを使うレコードストア
//!
//! ファイルはURLをキーにしたJSONオブジェクト。書き込みは一時ファイル経由でアトミックに行う。

use super::{apply_save, record, Bookmark, BookmarkMap, RecordStore};
use crate::error::store::Result;
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// JSONファイルストア
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    date_source: fn() -> String,
}

impl JsonFileStore {
    /// 指定パスのストアを開く（ファイルは最初の保存時に作成）
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            date_source: record::today,
        }
    }

    /// 日付の取得元を差し替える
    pub fn with_date_source(mut self, date_source: fn() -> String) -> Self {
        self.date_source = date_source;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BookmarkMap> {
        if !self.path.exists() {
            return Ok(BookmarkMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BookmarkMap::new());
        }

        serde_json::from_str(&content).map_err(|err| StoreError::Corrupted {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })
    }

    fn persist(&self, records: &BookmarkMap) -> Result<()> {
        crate::config::ensure_parent_dir(&self.path)?;

        let content = serde_json::to_string_pretty(records)?;

        // 一時ファイルに書き込んでからアトミックに移動
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn get(&self, url: &str) -> Result<Option<Bookmark>> {
        Ok(self.load()?.remove(url))
    }

    fn list_all(&self) -> Result<Vec<Bookmark>> {
        Ok(self.load()?.into_values().collect())
    }

    fn save_replacing(&mut self, old_url: Option<&str>, record: Bookmark) -> Result<Bookmark> {
        let mut records = self.load()?;
        let today = (self.date_source)();
        let saved = apply_save(&mut records, old_url, record, &today);
        self.persist(&records)?;
        log::debug!("saved {} to {}", saved.url, self.path.display());
        Ok(saved)
    }

    fn delete(&mut self, url: &str) -> Result<bool> {
        let mut records = self.load()?;
        if records.remove(url).is_none() {
            return Ok(false);
        }
        self.persist(&records)?;
        log::info!("{} has been removed", url);
        Ok(true)
    }
}
