//! メモリ上のレコードストア（テスト・一時利用向け）

use super::{apply_save, record, Bookmark, BookmarkMap, RecordStore};
use crate::error::store::Result;

/// プロセス内だけで保持するストア
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: BookmarkMap,
    date_source: fn() -> String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: BookmarkMap::new(),
            date_source: record::today,
        }
    }

    /// 日付の取得元を差し替える
    pub fn with_date_source(mut self, date_source: fn() -> String) -> Self {
        self.date_source = date_source;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, url: &str) -> Result<Option<Bookmark>> {
        Ok(self.records.get(url).cloned())
    }

    fn list_all(&self) -> Result<Vec<Bookmark>> {
        Ok(self.records.values().cloned().collect())
    }

    fn save_replacing(&mut self, old_url: Option<&str>, record: Bookmark) -> Result<Bookmark> {
        let today = (self.date_source)();
        Ok(apply_save(&mut self.records, old_url, record, &today))
    }

    fn delete(&mut self, url: &str) -> Result<bool> {
        Ok(self.records.remove(url).is_some())
    }
}
