//! タグエディタの選択状態

use super::token::TokenSequence;

/// ハイライト中のトークン
///
/// ナビゲーションの移動先プレビューと削除対象の両方を、この1つのフィールドで表す。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorState {
    highlighted: Option<usize>,
}

impl EditorState {
    /// ハイライトなしの状態を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ハイライト中のトークン位置
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// ハイライトがあるか
    pub fn has_highlight(&self) -> bool {
        self.highlighted.is_some()
    }

    /// トークンをハイライト（範囲外なら何もしない）
    pub fn highlight(&mut self, index: usize, sequence: &TokenSequence) -> bool {
        if index >= sequence.len() {
            return false;
        }
        self.highlighted = Some(index);
        true
    }

    /// ハイライトを解除し、解除されたかどうかを返す
    pub fn clear(&mut self) -> bool {
        self.highlighted.take().is_some()
    }

    /// `index` のトークンが削除されたあとに位置を合わせる
    pub fn on_token_removed(&mut self, index: usize) {
        self.highlighted = match self.highlighted {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
    }

    /// ハイライトがトークン列の範囲内にあるか
    pub fn is_consistent_with(&self, sequence: &TokenSequence) -> bool {
        self.highlighted.map_or(true, |index| index < sequence.len())
    }
}
