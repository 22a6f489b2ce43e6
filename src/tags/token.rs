//! タグトークン列
//!
//! タグを表すトークンと、その並びの中に置かれる入力スロット（カーソル）を管理する

use std::fmt;

/// タグ1つ分の不変テキスト
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// トークンのテキストを取得
    pub fn text(&self) -> &str {
        &self.0
    }

    /// 所有しているテキストを取り出す
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 順序付きトークン列と入力スロットの位置
///
/// カーソルは `0..=len()` の範囲を取る。0 は全トークンの前、`len()` は全トークンの後ろ。
/// トークンの並び順がそのまま表示順・保存順になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenSequence {
    /// 空のトークン列を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みのタグ一覧から作成（カーソルは末尾）
    ///
    /// 保存済みのテキストは加工せずにそのまま読み込む。
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<Token> = tags
            .into_iter()
            .map(|tag| Token(tag.as_ref().to_string()))
            .collect();
        let cursor = tokens.len();
        Self { tokens, cursor }
    }

    /// 末尾にトークンを追加
    ///
    /// 前後の空白を除いたテキストが空なら何もしない。挿入位置はカーソルに関係なく常に末尾。
    /// カーソルが末尾にあった場合だけ、カーソルも新しい末尾へ追従する。
    pub fn append_token(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        let cursor_at_tail = self.cursor == self.tokens.len();
        self.tokens.push(Token(trimmed.to_string()));
        if cursor_at_tail {
            self.cursor = self.tokens.len();
        }
        true
    }

    /// 指定位置のトークンを削除（範囲外は no-op）
    pub fn remove_token(&mut self, index: usize) -> Option<Token> {
        if index >= self.tokens.len() {
            return None;
        }

        let removed = self.tokens.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        Some(removed)
    }

    /// 保存用にトークンのテキストを順番どおり返す
    pub fn as_ordered_list(&self) -> Vec<String> {
        self.tokens.iter().map(|token| token.text().to_string()).collect()
    }

    /// トークン数
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// 入力スロットの現在位置
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// カーソル直前のトークン位置
    pub fn token_before_cursor(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    /// カーソル直後のトークン位置
    pub fn token_after_cursor(&self) -> Option<usize> {
        (self.cursor < self.tokens.len()).then_some(self.cursor)
    }

    /// カーソルを1つ前へ（先頭では no-op）
    pub(crate) fn move_cursor_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// カーソルを1つ後ろへ（末尾では no-op）
    pub(crate) fn move_cursor_forward(&mut self) -> bool {
        if self.cursor >= self.tokens.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
