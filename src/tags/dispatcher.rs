//! タグエディタの入力ディスパッチ
//!
//! キー入力・ポインタ操作をトークン列とハイライト状態の遷移へ変換する。
//! 下書きテキストが（空白を除いて）空のときだけ、矢印キーとバックスペースがトークンに作用する。

use super::state::EditorState;
use super::token::{Token, TokenSequence};

/// タグエディタが解釈するキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Left,
    Up,
    Right,
    Down,
    Backspace,
    Enter,
    Char(char),
    /// 上記以外のキー（Tab、Delete、ファンクションキーなど）
    Other,
}

impl TagKey {
    fn is_backward_navigation(self) -> bool {
        matches!(self, TagKey::Left | TagKey::Up)
    }

    fn is_forward_navigation(self) -> bool {
        matches!(self, TagKey::Right | TagKey::Down)
    }
}

/// タグエディタへの入力イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagInput {
    /// キー押下
    Key(TagKey),
    /// トークン本体のクリック
    ClickToken(usize),
    /// トークンの削除マーク（×）のクリック
    ClickRemove(usize),
    /// トークン以外の場所のクリック
    ClickOutside,
}

/// 1イベント分の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// トークンをハイライトした
    Highlighted(usize),
    /// 入力スロットが移動した（移動後の位置）
    CursorMoved(usize),
    /// トークンを削除した
    Removed(Token),
    /// 下書きをトークンとして末尾に追加した
    Appended(String),
    /// ハイライトを解除した
    HighlightCleared,
    /// 下書きテキストだけが変化した
    DraftEdited,
    /// 変化なし
    Unchanged,
}

/// 入力ディスパッチャ
///
/// 状態を持たず、編集中のトークン列・ハイライト・下書きを借用して遷移させる。
pub struct InputDispatcher<'a> {
    tokens: &'a mut TokenSequence,
    state: &'a mut EditorState,
    draft: &'a mut String,
}

impl<'a> InputDispatcher<'a> {
    pub fn new(
        tokens: &'a mut TokenSequence,
        state: &'a mut EditorState,
        draft: &'a mut String,
    ) -> Self {
        Self { tokens, state, draft }
    }

    /// 入力イベントを1つ処理
    pub fn dispatch(&mut self, input: TagInput) -> DispatchOutcome {
        let outcome = match input {
            TagInput::Key(key) => self.dispatch_key(key),
            TagInput::ClickToken(index) => {
                if self.state.highlight(index, self.tokens) {
                    DispatchOutcome::Highlighted(index)
                } else {
                    DispatchOutcome::Unchanged
                }
            }
            TagInput::ClickRemove(index) => match self.tokens.remove_token(index) {
                Some(token) => {
                    self.state.on_token_removed(index);
                    DispatchOutcome::Removed(token)
                }
                None => DispatchOutcome::Unchanged,
            },
            TagInput::ClickOutside => self.clear_highlight(),
        };

        debug_assert!(self.state.is_consistent_with(self.tokens));
        debug_assert!(self.tokens.cursor() <= self.tokens.len());
        outcome
    }

    fn dispatch_key(&mut self, key: TagKey) -> DispatchOutcome {
        // 判定はキー自身の文字入力効果が反映される前の下書きで行う
        let draft_empty = self.draft.trim().is_empty();

        match key {
            TagKey::Enter => self.commit_draft(),
            key if draft_empty && key.is_backward_navigation() => self.navigate_backward(),
            key if draft_empty && key.is_forward_navigation() => self.navigate_forward(),
            TagKey::Backspace if draft_empty => {
                let outcome = self.delete_backward();
                let popped = self.draft.pop().is_some();
                if popped && outcome == DispatchOutcome::Unchanged {
                    DispatchOutcome::DraftEdited
                } else {
                    outcome
                }
            }
            TagKey::Char(ch) => {
                let cleared = self.state.clear();
                self.draft.push(ch);
                if cleared {
                    DispatchOutcome::HighlightCleared
                } else {
                    DispatchOutcome::DraftEdited
                }
            }
            TagKey::Backspace => {
                let cleared = self.state.clear();
                self.draft.pop();
                if cleared {
                    DispatchOutcome::HighlightCleared
                } else {
                    DispatchOutcome::DraftEdited
                }
            }
            _ => self.clear_highlight(),
        }
    }

    fn commit_draft(&mut self) -> DispatchOutcome {
        if self.draft.trim().is_empty() {
            return DispatchOutcome::Unchanged;
        }

        let text = std::mem::take(self.draft);
        self.tokens.append_token(&text);
        DispatchOutcome::Appended(text.trim().to_string())
    }

    fn navigate_backward(&mut self) -> DispatchOutcome {
        let Some(before) = self.tokens.token_before_cursor() else {
            return DispatchOutcome::Unchanged;
        };

        if self.state.clear() {
            self.tokens.move_cursor_backward();
            DispatchOutcome::CursorMoved(self.tokens.cursor())
        } else {
            self.state.highlight(before, self.tokens);
            DispatchOutcome::Highlighted(before)
        }
    }

    fn navigate_forward(&mut self) -> DispatchOutcome {
        let Some(after) = self.tokens.token_after_cursor() else {
            return DispatchOutcome::Unchanged;
        };

        if self.state.clear() {
            self.tokens.move_cursor_forward();
            DispatchOutcome::CursorMoved(self.tokens.cursor())
        } else {
            self.state.highlight(after, self.tokens);
            DispatchOutcome::Highlighted(after)
        }
    }

    fn delete_backward(&mut self) -> DispatchOutcome {
        if let Some(index) = self.state.highlighted() {
            self.state.clear();
            return match self.tokens.remove_token(index) {
                Some(token) => DispatchOutcome::Removed(token),
                None => DispatchOutcome::HighlightCleared,
            };
        }

        match self.tokens.token_before_cursor() {
            Some(before) => {
                self.state.highlight(before, self.tokens);
                DispatchOutcome::Highlighted(before)
            }
            None => DispatchOutcome::Unchanged,
        }
    }

    fn clear_highlight(&mut self) -> DispatchOutcome {
        if self.state.clear() {
            DispatchOutcome::HighlightCleared
        } else {
            DispatchOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        tokens: TokenSequence,
        state: EditorState,
        draft: String,
    }

    impl Fixture {
        fn new(tags: &[&str]) -> Self {
            Self {
                tokens: TokenSequence::from_tags(tags),
                state: EditorState::new(),
                draft: String::new(),
            }
        }

        fn send(&mut self, input: TagInput) -> DispatchOutcome {
            InputDispatcher::new(&mut self.tokens, &mut self.state, &mut self.draft).dispatch(input)
        }

        fn key(&mut self, key: TagKey) -> DispatchOutcome {
            self.send(TagInput::Key(key))
        }
    }

    #[test]
    fn backward_navigation_is_two_phase() {
        let mut fx = Fixture::new(&["A", "B", "C"]);

        assert_eq!(fx.key(TagKey::Left), DispatchOutcome::Highlighted(2));
        assert_eq!(fx.key(TagKey::Left), DispatchOutcome::CursorMoved(2));
        assert_eq!(fx.state.highlighted(), None);
        assert_eq!(fx.tokens.as_ordered_list(), vec!["A", "B", "C"]);

        assert_eq!(fx.key(TagKey::Up), DispatchOutcome::Highlighted(1));
    }

    #[test]
    fn forward_navigation_is_two_phase() {
        let mut fx = Fixture::new(&["A", "B"]);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left); // | A B
        assert_eq!(fx.tokens.cursor(), 0);

        assert_eq!(fx.key(TagKey::Right), DispatchOutcome::Highlighted(0));
        assert_eq!(fx.key(TagKey::Down), DispatchOutcome::CursorMoved(1));
        assert_eq!(fx.state.highlighted(), None);
    }

    #[test]
    fn navigation_at_bounds_is_noop() {
        let mut fx = Fixture::new(&["A"]);
        assert_eq!(fx.key(TagKey::Right), DispatchOutcome::Unchanged);

        fx.key(TagKey::Left);
        fx.key(TagKey::Left); // | A
        assert_eq!(fx.key(TagKey::Left), DispatchOutcome::Unchanged);
        assert_eq!(fx.tokens.cursor(), 0);
        assert_eq!(fx.state.highlighted(), None);

        let mut empty = Fixture::new(&[]);
        assert_eq!(empty.key(TagKey::Left), DispatchOutcome::Unchanged);
        assert_eq!(empty.key(TagKey::Backspace), DispatchOutcome::Unchanged);
    }

    #[test]
    fn backward_with_clicked_highlight_at_start_keeps_highlight() {
        let mut fx = Fixture::new(&["A", "B"]);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left); // | A B

        fx.send(TagInput::ClickToken(1));
        assert_eq!(fx.key(TagKey::Left), DispatchOutcome::Unchanged);
        assert_eq!(fx.state.highlighted(), Some(1));
    }

    #[test]
    fn backspace_highlights_then_deletes() {
        let mut fx = Fixture::new(&["A", "B", "C"]);

        assert_eq!(fx.key(TagKey::Backspace), DispatchOutcome::Highlighted(2));
        assert_eq!(fx.tokens.len(), 3);

        let outcome = fx.key(TagKey::Backspace);
        assert_eq!(outcome, DispatchOutcome::Removed(fx_token("C")));
        assert_eq!(fx.tokens.as_ordered_list(), vec!["A", "B"]);
        assert_eq!(fx.state.highlighted(), None);
        assert_eq!(fx.tokens.cursor(), 2);
    }

    #[test]
    fn backspace_removes_clicked_token_after_cursor() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left); // A | B C

        fx.send(TagInput::ClickToken(2));
        fx.key(TagKey::Backspace);
        assert_eq!(fx.tokens.as_ordered_list(), vec!["A", "B"]);
        assert_eq!(fx.tokens.cursor(), 1);
    }

    #[test]
    fn backspace_removes_clicked_token_before_cursor() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.send(TagInput::ClickToken(0));
        fx.key(TagKey::Backspace);
        assert_eq!(fx.tokens.as_ordered_list(), vec!["B", "C"]);
        assert_eq!(fx.tokens.cursor(), 2);
    }

    #[test]
    fn click_overrides_and_outside_clears() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.key(TagKey::Left); // highlight C

        assert_eq!(fx.send(TagInput::ClickToken(1)), DispatchOutcome::Highlighted(1));
        assert_eq!(fx.state.highlighted(), Some(1));

        assert_eq!(fx.send(TagInput::ClickOutside), DispatchOutcome::HighlightCleared);
        assert_eq!(fx.state.highlighted(), None);
        assert_eq!(fx.send(TagInput::ClickOutside), DispatchOutcome::Unchanged);
    }

    #[test]
    fn click_out_of_range_is_ignored() {
        let mut fx = Fixture::new(&["A"]);
        assert_eq!(fx.send(TagInput::ClickToken(5)), DispatchOutcome::Unchanged);
        assert_eq!(fx.send(TagInput::ClickRemove(5)), DispatchOutcome::Unchanged);
    }

    #[test]
    fn remove_glyph_adjusts_highlight() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.send(TagInput::ClickToken(2));

        fx.send(TagInput::ClickRemove(0));
        assert_eq!(fx.tokens.as_ordered_list(), vec!["B", "C"]);
        assert_eq!(fx.state.highlighted(), Some(1));

        fx.send(TagInput::ClickRemove(1));
        assert_eq!(fx.state.highlighted(), None);
    }

    #[test]
    fn typing_clears_highlight_without_other_effects() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.key(TagKey::Left);

        assert_eq!(fx.key(TagKey::Char('x')), DispatchOutcome::HighlightCleared);
        assert_eq!(fx.state.highlighted(), None);
        assert_eq!(fx.tokens.as_ordered_list(), vec!["A", "B", "C"]);
        assert_eq!(fx.tokens.cursor(), 3);
        assert_eq!(fx.draft, "x");
    }

    #[test]
    fn non_empty_draft_disables_token_rules() {
        let mut fx = Fixture::new(&["A", "B"]);
        fx.draft.push_str("ab");

        assert_eq!(fx.key(TagKey::Left), DispatchOutcome::Unchanged);
        assert_eq!(fx.key(TagKey::Backspace), DispatchOutcome::DraftEdited);
        assert_eq!(fx.draft, "a");
        assert_eq!(fx.tokens.len(), 2);
        assert_eq!(fx.state.highlighted(), None);
    }

    #[test]
    fn other_keys_clear_highlight() {
        let mut fx = Fixture::new(&["A"]);
        fx.key(TagKey::Backspace);
        assert_eq!(fx.key(TagKey::Other), DispatchOutcome::HighlightCleared);
        assert_eq!(fx.tokens.len(), 1);
    }

    #[test]
    fn enter_appends_draft_at_tail() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left);
        fx.key(TagKey::Left); // A | B C
        for ch in "foo".chars() {
            fx.key(TagKey::Char(ch));
        }

        assert_eq!(fx.key(TagKey::Enter), DispatchOutcome::Appended("foo".to_string()));
        assert_eq!(fx.tokens.as_ordered_list(), vec!["A", "B", "C", "foo"]);
        assert!(fx.draft.is_empty());
        assert_eq!(fx.tokens.cursor(), 1);
    }

    #[test]
    fn enter_leaves_highlight_untouched() {
        let mut fx = Fixture::new(&["A"]);
        fx.send(TagInput::ClickToken(0));
        fx.draft.push_str("new");

        fx.key(TagKey::Enter);
        assert_eq!(fx.state.highlighted(), Some(0));
        assert_eq!(fx.tokens.as_ordered_list(), vec!["A", "new"]);
    }

    #[test]
    fn enter_with_blank_draft_is_ignored() {
        let mut fx = Fixture::new(&["A"]);
        fx.draft.push_str("   ");
        assert_eq!(fx.key(TagKey::Enter), DispatchOutcome::Unchanged);
        assert_eq!(fx.tokens.len(), 1);
    }

    fn fx_token(text: &str) -> Token {
        TokenSequence::from_tags([text]).get(0).cloned().unwrap()
    }
}
