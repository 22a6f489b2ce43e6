//! 検索条件の判定

use crate::store::Bookmark;
use std::cmp::Ordering;

const TAG_PREFIX: &str = "tag:";

/// 解析済みの検索語
///
/// 語は半角スペース1つで区切る。いずれか1語が一致すれば表示対象。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self { terms: Vec::new() };
        }

        Self {
            terms: trimmed.split(' ').map(str::to_lowercase).collect(),
        }
    }

    /// 空クエリ（全件一致）か
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// レコードがクエリに一致するか
    pub fn matches(&self, record: &Bookmark) -> bool {
        if self.is_empty() {
            return true;
        }

        let title = record.title.to_lowercase();
        let description = record.description.to_lowercase();

        self.terms.iter().any(|term| {
            match term.strip_prefix(TAG_PREFIX) {
                Some(tag) if !record.tags.is_empty() => {
                    // `tag:machine-learning` は "machine learning" タグに一致
                    let wanted = tag.replace('-', " ");
                    record.tags.iter().any(|existing| existing.to_lowercase() == wanted)
                }
                _ => title.contains(term.as_str()) || description.contains(term.as_str()),
            }
        })
    }
}

/// 単発判定の便利関数
pub fn matches(record: &Bookmark, query: &str) -> bool {
    SearchQuery::parse(query).matches(record)
}

/// クエリに一致するレコードだけを返す
pub fn filter_records<'a>(records: &'a [Bookmark], query: &str) -> Vec<&'a Bookmark> {
    let query = SearchQuery::parse(query);
    records.iter().filter(|record| query.matches(record)).collect()
}

/// 最終更新日の新しい順に並べる（日付不明は末尾、同日はタイトル順）
pub fn sort_by_recent(records: &mut [Bookmark]) {
    records.sort_by(|a, b| match (a.last_modified(), b.last_modified()) {
        (Some(left), Some(right)) => right.cmp(&left).then_with(|| a.title.cmp(&b.title)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, description: &str, tags: &[&str]) -> Bookmark {
        let mut record = Bookmark::new(format!("https://{}.example", title.len()), title, description);
        record.tags = tags.iter().map(|tag| tag.to_string()).collect();
        record
    }

    #[test]
    fn empty_query_matches_everything() {
        let record = record("Rust", "", &[]);
        assert!(matches(&record, ""));
        assert!(matches(&record, "   "));
    }

    #[test]
    fn free_text_matches_title_or_description() {
        let record = record("The Rust Book", "Learn systems programming", &[]);
        assert!(matches(&record, "rust"));
        assert!(matches(&record, "SYSTEMS"));
        assert!(!matches(&record, "python"));
        assert!(matches(&record, "python book"));
    }

    #[test]
    fn tag_terms_match_exact_tags() {
        let record = record("Paper", "", &["Machine Learning", "ai"]);
        assert!(matches(&record, "tag:machine-learning"));
        assert!(matches(&record, "tag:AI"));
        assert!(!matches(&record, "tag:machine"));
    }

    #[test]
    fn tag_term_falls_back_to_text_when_untagged() {
        let untagged = record("notes on tag:rust syntax", "", &[]);
        assert!(matches(&untagged, "tag:rust"));
    }

    #[test]
    fn filter_keeps_order() {
        let records = vec![record("alpha", "", &[]), record("beta", "", &[]), record("alphabet", "", &[])];
        let titles: Vec<_> = filter_records(&records, "alpha")
            .into_iter()
            .map(|record| record.title.as_str())
            .collect();
        assert_eq!(titles, vec!["alpha", "alphabet"]);
    }

    #[test]
    fn sorts_newest_first() {
        let mut old = record("old", "", &[]);
        old.last_modified_date = "2023-12-31".to_string();
        let mut new = record("new", "", &[]);
        new.last_modified_date = "2024-1-2".to_string();
        let undated = record("undated", "", &[]);

        let mut records = vec![undated, old, new];
        sort_by_recent(&mut records);
        let titles: Vec<_> = records.iter().map(|record| record.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old", "undated"]);
    }
}
