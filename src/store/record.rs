//! ブックマークレコード

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// 保存済みのブックマーク
///
/// 日付は `YYYY-M-D`（ゼロ埋めなし）の文字列。作成日と更新日はストアが設定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_modified_date: String,
}

impl Bookmark {
    /// タグなし・日付未設定のレコードを作成
    pub fn new(url: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            tags: Vec::new(),
            created_date: String::new(),
            last_modified_date: String::new(),
        }
    }

    /// 表示用タイトル（空ならURL）
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    /// タイトル・URL・説明を書き換えたレコードを返す
    ///
    /// 空白のみの入力は元の値を残す。タグはそのまま引き継ぐ。
    pub fn with_edits(&self, title: &str, url: &str, description: &str) -> Self {
        fn pick(input: &str, current: &str) -> String {
            match input.trim() {
                "" => current.to_string(),
                value => value.to_string(),
            }
        }

        Self {
            url: pick(url, &self.url),
            title: pick(title, &self.title),
            description: pick(description, &self.description),
            ..self.clone()
        }
    }

    /// 最終更新日
    pub fn last_modified(&self) -> Option<NaiveDate> {
        parse_date(&self.last_modified_date)
    }
}

/// 今日の日付を `YYYY-M-D` 形式で返す
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%-m-%-d").to_string()
}

/// `YYYY-M-D` / `YYYY-MM-DD` 形式の日付を解釈
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
