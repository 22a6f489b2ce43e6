//! キーバインドシステム
//!
//! crossterm のキーイベントを画面ごとのアクションへ変換する

use crate::tags::{TagInput, TagKey};
use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind, KeyModifiers as CrosstermModifiers,
};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Esc,
    Unknown,
}

impl Key {
    /// 修飾なしのキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: true, alt: false },
            code: KeyCode::Char(ch),
        }
    }

    /// 修飾キー付きか
    pub fn has_modifier(&self) -> bool {
        self.modifiers.ctrl || self.modifiers.alt
    }

    /// タグエディタ用のキーへ変換
    ///
    /// Ctrl/Alt 付きの文字は入力として扱わない。
    pub fn to_tag_key(&self) -> TagKey {
        match self.code {
            KeyCode::Char(ch) if !self.has_modifier() => TagKey::Char(ch),
            KeyCode::Left => TagKey::Left,
            KeyCode::Up => TagKey::Up,
            KeyCode::Right => TagKey::Right,
            KeyCode::Down => TagKey::Down,
            KeyCode::Backspace => TagKey::Backspace,
            KeyCode::Enter => TagKey::Enter,
            _ => TagKey::Other,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        // Shift は文字側に反映済みなので保持しない
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
        };

        let code = match event.code {
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// 押下イベントか（リピート・リリースは無視する）
pub fn is_press(event: &KeyEvent) -> bool {
    event.kind == KeyEventKind::Press
}

/// 一覧画面のアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    SelectNext,
    SelectPrevious,
    /// 検索語の入力を開始
    StartSearch,
    /// URL追加の入力を開始
    StartAdd,
    /// 選択中のブックマークのタグを編集
    EditTags,
    /// 選択中のブックマークのタイトル・URL・説明を編集
    EditRecord,
    /// 選択中のブックマークのメタデータを再取得
    Refresh,
    Delete,
    Quit,
}

/// タグ編集ダイアログのアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// 保存して閉じる
    Save,
    /// 破棄して閉じる
    Cancel,
    /// エディタへ渡す入力
    Edit(TagInput),
}

/// 1行入力（検索・URL追加・レコード編集）のアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
}

/// 画面ごとのキーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    list_bindings: HashMap<Key, ListAction>,
    dialog_bindings: HashMap<Key, DialogAction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    pub fn new() -> Self {
        let mut list_bindings = HashMap::with_capacity(16);
        let mut dialog_bindings = HashMap::with_capacity(4);
        Self::register_default_bindings(&mut list_bindings, &mut dialog_bindings);
        Self {
            list_bindings,
            dialog_bindings,
        }
    }

    fn register_default_bindings(
        list: &mut HashMap<Key, ListAction>,
        dialog: &mut HashMap<Key, DialogAction>,
    ) {
        // 移動系
        list.insert(Key::plain(KeyCode::Char('j')), ListAction::SelectNext);
        list.insert(Key::plain(KeyCode::Down), ListAction::SelectNext);
        list.insert(Key::ctrl('n'), ListAction::SelectNext);
        list.insert(Key::plain(KeyCode::Char('k')), ListAction::SelectPrevious);
        list.insert(Key::plain(KeyCode::Up), ListAction::SelectPrevious);
        list.insert(Key::ctrl('p'), ListAction::SelectPrevious);

        // 操作系
        list.insert(Key::plain(KeyCode::Char('/')), ListAction::StartSearch);
        list.insert(Key::plain(KeyCode::Char('a')), ListAction::StartAdd);
        list.insert(Key::plain(KeyCode::Char('t')), ListAction::EditTags);
        list.insert(Key::plain(KeyCode::Enter), ListAction::EditTags);
        list.insert(Key::plain(KeyCode::Char('e')), ListAction::EditRecord);
        list.insert(Key::plain(KeyCode::Char('r')), ListAction::Refresh);
        list.insert(Key::plain(KeyCode::Char('d')), ListAction::Delete);
        list.insert(Key::plain(KeyCode::Delete), ListAction::Delete);
        list.insert(Key::plain(KeyCode::Char('q')), ListAction::Quit);
        list.insert(Key::ctrl('c'), ListAction::Quit);

        // ダイアログ
        dialog.insert(Key::ctrl('s'), DialogAction::Save);
        dialog.insert(Key::plain(KeyCode::Esc), DialogAction::Cancel);
        dialog.insert(Key::ctrl('g'), DialogAction::Cancel);
        dialog.insert(Key::ctrl('c'), DialogAction::Cancel);
    }

    pub fn list_action(&self, key: &Key) -> Option<ListAction> {
        self.list_bindings.get(key).copied()
    }

    /// ダイアログ用の割り当てがなければタグエディタへ渡す
    pub fn dialog_action(&self, key: &Key) -> DialogAction {
        self.dialog_bindings
            .get(key)
            .copied()
            .unwrap_or_else(|| DialogAction::Edit(TagInput::Key(key.to_tag_key())))
    }

    pub fn prompt_action(&self, key: &Key) -> Option<PromptAction> {
        match key.code {
            KeyCode::Enter => Some(PromptAction::Submit),
            KeyCode::Esc => Some(PromptAction::Cancel),
            KeyCode::Char('g') if key.modifiers.ctrl => Some(PromptAction::Cancel),
            KeyCode::Backspace => Some(PromptAction::Backspace),
            KeyCode::Char(ch) if !key.has_modifier() => Some(PromptAction::Insert(ch)),
            _ => None,
        }
    }
}
