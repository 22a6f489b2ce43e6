//! カード検索
//!
//! 自由語と `tag:` 指定によるブックマークの絞り込みと並び替え

pub mod filter;

// 公開API
pub use filter::{filter_records, matches, sort_by_recent, SearchQuery};
