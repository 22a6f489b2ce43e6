//! タグエディタ本体
//!
//! 編集対象のブックマーク、トークン列、ハイライト、下書きをまとめて保持し、
//! 保存時にタグ一覧をレコードストアへ渡す。

use super::dispatcher::{DispatchOutcome, InputDispatcher, TagInput};
use super::state::EditorState;
use super::token::TokenSequence;
use crate::error::Result;
use crate::store::{Bookmark, RecordStore};

/// 1件のブックマークに対するタグ編集セッション
///
/// 保存せずに破棄した場合、変更はすべて捨てられる。
#[derive(Debug, Clone)]
pub struct TagEditor {
    /// 編集対象（タグ以外は変更しない）
    record: Bookmark,
    tokens: TokenSequence,
    state: EditorState,
    draft: String,
}

impl TagEditor {
    /// 保存済みレコードのタグから編集を開始
    pub fn open(record: Bookmark) -> Self {
        let tokens = TokenSequence::from_tags(&record.tags);
        log::debug!("tag editor opened for {} ({} tags)", record.url, tokens.len());
        Self {
            record,
            tokens,
            state: EditorState::new(),
            draft: String::new(),
        }
    }

    /// 入力イベントを処理
    pub fn handle_input(&mut self, input: TagInput) -> DispatchOutcome {
        let outcome =
            InputDispatcher::new(&mut self.tokens, &mut self.state, &mut self.draft).dispatch(input);
        match &outcome {
            DispatchOutcome::Removed(token) => log::debug!("tag removed: {}", token),
            DispatchOutcome::Appended(text) => log::debug!("tag appended: {}", text),
            _ => log::trace!("{:?} -> {:?}", input, outcome),
        }
        outcome
    }

    pub fn record(&self) -> &Bookmark {
        &self.record
    }

    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// ハイライト中のトークン位置
    pub fn highlighted(&self) -> Option<usize> {
        self.state.highlighted()
    }

    /// 入力スロットの位置
    pub fn cursor(&self) -> usize {
        self.tokens.cursor()
    }

    /// 入力中の下書き
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// 今保存した場合に永続化されるタグ一覧
    pub fn pending_tags(&self) -> Vec<String> {
        let mut tokens = self.tokens.clone();
        tokens.append_token(&self.draft);
        tokens.as_ordered_list()
    }

    /// 編集内容を確定してストアへ保存する
    ///
    /// 下書きが残っていれば末尾のトークンとして追加してから保存する。
    /// エディタは消費されるため、保存の途中で閉じられることはない。
    /// `on_done` はストアの結果を受け取り、ダイアログを閉じて一覧を更新する役割を持つ。
    pub fn commit<S, F>(mut self, store: &mut S, on_done: F)
    where
        S: RecordStore + ?Sized,
        F: FnOnce(Result<Bookmark>),
    {
        let draft = std::mem::take(&mut self.draft);
        self.tokens.append_token(&draft);

        let mut record = self.record;
        record.tags = self.tokens.as_ordered_list();
        log::info!("saving {} tags for {}", record.tags.len(), record.url);

        on_done(store.save(record).map_err(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::tags::TagKey;

    fn record(tags: &[&str]) -> Bookmark {
        let mut record = Bookmark::new("https://example.com", "Example", "An example page");
        record.tags = tags.iter().map(|tag| tag.to_string()).collect();
        record
    }

    #[test]
    fn open_starts_at_tail_without_highlight() {
        let editor = TagEditor::open(record(&["A", "B"]));
        assert_eq!(editor.cursor(), 2);
        assert_eq!(editor.highlighted(), None);
        assert!(editor.draft().is_empty());
    }

    #[test]
    fn commit_persists_ordered_tags() {
        let mut store = MemoryStore::new();
        let editor = TagEditor::open(record(&["A", "B"]));

        let mut saved = None;
        editor.commit(&mut store, |result| saved = Some(result));

        let saved = saved.unwrap().unwrap();
        assert_eq!(saved.tags, vec!["A", "B"]);
        assert_eq!(store.get("https://example.com").unwrap().unwrap().tags, vec!["A", "B"]);
    }

    #[test]
    fn unedited_commit_preserves_stored_tags() {
        let mut store = MemoryStore::new();
        let editor = TagEditor::open(record(&["  spaced", "", "B"]));

        let mut saved = None;
        editor.commit(&mut store, |result| saved = Some(result));
        assert_eq!(saved.unwrap().unwrap().tags, vec!["  spaced", "", "B"]);
    }

    #[test]
    fn commit_flushes_pending_draft() {
        let mut store = MemoryStore::new();
        let mut editor = TagEditor::open(record(&["A"]));
        for ch in " rust ".chars() {
            editor.handle_input(TagInput::Key(TagKey::Char(ch)));
        }
        assert_eq!(editor.pending_tags(), vec!["A", "rust"]);

        let mut saved = None;
        editor.commit(&mut store, |result| saved = Some(result));
        assert_eq!(saved.unwrap().unwrap().tags, vec!["A", "rust"]);
    }

    #[test]
    fn commit_keeps_other_fields() {
        let mut store = MemoryStore::new();
        let mut editor = TagEditor::open(record(&["A", "B"]));
        editor.handle_input(TagInput::Key(TagKey::Backspace));
        editor.handle_input(TagInput::Key(TagKey::Backspace));

        let mut saved = None;
        editor.commit(&mut store, |result| saved = Some(result));
        let saved = saved.unwrap().unwrap();
        assert_eq!(saved.tags, vec!["A"]);
        assert_eq!(saved.title, "Example");
        assert_eq!(saved.description, "An example page");
    }

    #[test]
    fn discarding_editor_leaves_store_untouched() {
        let mut store = MemoryStore::new();
        store.save(record(&["A"])).unwrap();

        let stored = store.get("https://example.com").unwrap().unwrap();
        let mut editor = TagEditor::open(stored);
        editor.handle_input(TagInput::Key(TagKey::Backspace));
        editor.handle_input(TagInput::Key(TagKey::Backspace));
        assert!(editor.tokens().is_empty());
        drop(editor);

        assert_eq!(store.get("https://example.com").unwrap().unwrap().tags, vec!["A"]);
    }
}
