//! レコードストア
//!
//! URLをキーにブックマークを永続化する。作成日・更新日の管理はストアの責務。

pub mod json_file;
pub mod memory;
pub mod record;

// 公開API
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{parse_date, today, Bookmark};

use crate::error::store::Result;
use std::collections::BTreeMap;

/// URL → レコードの対応表
pub type BookmarkMap = BTreeMap<String, Bookmark>;

/// ストア操作のトレイト
pub trait RecordStore {
    /// URLでレコードを取得
    fn get(&self, url: &str) -> Result<Option<Bookmark>>;

    /// 全レコードを取得（順序はストア依存）
    fn list_all(&self) -> Result<Vec<Bookmark>>;

    /// URLが変わった場合に旧キーを削除しつつ保存
    fn save_replacing(&mut self, old_url: Option<&str>, record: Bookmark) -> Result<Bookmark>;

    /// レコードを削除（存在しなければ `false`）
    fn delete(&mut self, url: &str) -> Result<bool>;

    /// レコードを保存し、日付を設定した結果を返す
    fn save(&mut self, record: Bookmark) -> Result<Bookmark> {
        self.save_replacing(None, record)
    }
}

/// 保存処理の共通部分
///
/// 既存レコードがあれば作成日を引き継ぎ、更新日は常に `today` にする。
pub(crate) fn apply_save(
    records: &mut BookmarkMap,
    old_url: Option<&str>,
    mut record: Bookmark,
    today: &str,
) -> Bookmark {
    record.last_modified_date = today.to_string();
    record.created_date = match records.get(&record.url) {
        Some(existing) if !existing.created_date.is_empty() => existing.created_date.clone(),
        _ => today.to_string(),
    };

    if let Some(old_url) = old_url.filter(|old| *old != record.url) {
        if records.remove(old_url).is_some() {
            log::info!("bookmark moved from {} to {}", old_url, record.url);
        }
    }

    records.insert(record.url.clone(), record.clone());
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_save_sets_both_dates_for_new_record() {
        let mut records = BookmarkMap::new();
        let saved = apply_save(&mut records, None, Bookmark::new("https://a.example", "A", ""), "2024-3-1");

        assert_eq!(saved.created_date, "2024-3-1");
        assert_eq!(saved.last_modified_date, "2024-3-1");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn apply_save_keeps_created_date() {
        let mut records = BookmarkMap::new();
        apply_save(&mut records, None, Bookmark::new("https://a.example", "A", ""), "2024-3-1");
        let saved = apply_save(&mut records, None, Bookmark::new("https://a.example", "A2", ""), "2024-4-2");

        assert_eq!(saved.created_date, "2024-3-1");
        assert_eq!(saved.last_modified_date, "2024-4-2");
        assert_eq!(records["https://a.example"].title, "A2");
    }

    #[test]
    fn apply_save_removes_old_key_on_url_change() {
        let mut records = BookmarkMap::new();
        apply_save(&mut records, None, Bookmark::new("http://a.example", "A", ""), "2024-3-1");
        apply_save(
            &mut records,
            Some("http://a.example"),
            Bookmark::new("https://a.example", "A", ""),
            "2024-3-2",
        );

        assert!(!records.contains_key("http://a.example"));
        assert!(records.contains_key("https://a.example"));
    }
}
