//! メインアプリケーション構造体
//!
//! 一覧・検索・タグ編集の状態を保持し、入力をストア操作へ変換する。
//! 端末には依存しない（描画とイベント取得は `frontend::tui` が担当）。

use crate::error::{ErrorDisplay, Result, SalvareError, StoreError};
use crate::input::{is_press, DialogAction, Key, KeyMap, ListAction, PromptAction};
use crate::metadata::{load_bookmark, PageFetcher};
use crate::search::{sort_by_recent, SearchQuery};
use crate::store::{Bookmark, RecordStore};
use crate::tags::{TagEditor, TagInput};
use crate::ui::{AppView, DialogHit, PromptView};
use crossterm::event::KeyEvent;

/// 1行入力の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    AddUrl,
    /// レコード編集（タイトル → URL → 説明の順に入力）
    EditTitle,
    EditUrl,
    EditDescription,
}

impl PromptKind {
    fn label(self) -> &'static str {
        match self {
            PromptKind::Search => "Search: ",
            PromptKind::AddUrl => "Add URL: ",
            PromptKind::EditTitle => "Title (empty keeps current): ",
            PromptKind::EditUrl => "URL (empty keeps current): ",
            PromptKind::EditDescription => "Description (empty keeps current): ",
        }
    }

    fn is_record_edit(self) -> bool {
        matches!(
            self,
            PromptKind::EditTitle | PromptKind::EditUrl | PromptKind::EditDescription
        )
    }
}

#[derive(Debug, Clone)]
struct Prompt {
    kind: PromptKind,
    input: String,
}

/// 編集対象のレコードと入力済みの値
#[derive(Debug, Clone)]
struct RecordEdit {
    original: Bookmark,
    title: String,
    url: String,
}

/// メインアプリケーション構造体
pub struct App {
    store: Box<dyn RecordStore>,
    fetcher: Box<dyn PageFetcher>,
    keymap: KeyMap,
    /// 全レコード（更新日の新しい順）
    records: Vec<Bookmark>,
    /// 検索に一致したレコードの位置
    visible: Vec<usize>,
    /// `visible` 内の選択位置
    selected: Option<usize>,
    /// 適用中の検索語
    search: String,
    prompt: Option<Prompt>,
    record_edit: Option<RecordEdit>,
    /// 開いているタグ編集ダイアログ
    editor: Option<TagEditor>,
    status: Option<ErrorDisplay>,
    running: bool,
}

impl App {
    pub fn new(store: Box<dyn RecordStore>, fetcher: Box<dyn PageFetcher>) -> Result<Self> {
        let mut app = Self {
            store,
            fetcher,
            keymap: KeyMap::new(),
            records: Vec::new(),
            visible: Vec::new(),
            selected: None,
            search: String::new(),
            prompt: None,
            record_edit: None,
            editor: None,
            status: None,
            running: true,
        };
        app.reload()?;
        Ok(app)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn records(&self) -> &[Bookmark] {
        &self.records
    }

    /// 検索に一致するレコード
    pub fn visible_records(&self) -> Vec<&Bookmark> {
        self.visible.iter().map(|&index| &self.records[index]).collect()
    }

    pub fn selected_record(&self) -> Option<&Bookmark> {
        self.selected
            .and_then(|selected| self.visible.get(selected))
            .map(|&index| &self.records[index])
    }

    pub fn editor(&self) -> Option<&TagEditor> {
        self.editor.as_ref()
    }

    pub fn status(&self) -> Option<&ErrorDisplay> {
        self.status.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn prompt_kind(&self) -> Option<PromptKind> {
        self.prompt.as_ref().map(|prompt| prompt.kind)
    }

    /// 描画用の状態
    pub fn view(&self) -> AppView<'_> {
        AppView {
            records: self.visible_records(),
            total: self.records.len(),
            selected: self.selected,
            search: &self.search,
            prompt: self.prompt.as_ref().map(|prompt| PromptView {
                label: prompt.kind.label(),
                input: &prompt.input,
            }),
            editor: self.editor.as_ref(),
            status: self.status.as_ref(),
        }
    }

    /// ストアから読み直して並べ替える
    pub fn reload(&mut self) -> Result<()> {
        let selected_url = self.selected_record().map(|record| record.url.clone());
        let mut records = self.store.list_all()?;
        sort_by_recent(&mut records);
        self.records = records;
        self.apply_filter(selected_url.as_deref());
        log::debug!("loaded {} bookmarks", self.records.len());
        Ok(())
    }

    /// 検索語で表示対象を絞る（`keep_url` があればその選択を保つ）
    fn apply_filter(&mut self, keep_url: Option<&str>) {
        let query = SearchQuery::parse(&self.search);
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| query.matches(record))
            .map(|(index, _)| index)
            .collect();

        let kept = keep_url.and_then(|url| {
            self.visible
                .iter()
                .position(|&index| self.records[index].url == url)
        });
        self.selected = match (kept, self.selected) {
            _ if self.visible.is_empty() => None,
            (Some(position), _) => Some(position),
            (None, Some(selected)) => Some(selected.min(self.visible.len() - 1)),
            (None, None) => Some(0),
        };
    }

    fn report(&mut self, error: SalvareError) {
        log::warn!("{}", error);
        self.status = Some(ErrorDisplay::new(&error));
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.status = Some(ErrorDisplay::info(message));
    }

    /// キー入力を処理
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if !is_press(&event) {
            return;
        }

        let key = Key::from(event);
        if self.editor.is_some() {
            self.handle_dialog_key(&key);
        } else if self.prompt.is_some() {
            self.handle_prompt_key(&key);
        } else if let Some(action) = self.keymap.list_action(&key) {
            self.handle_list_action(action);
        }
    }

    fn handle_dialog_key(&mut self, key: &Key) {
        match self.keymap.dialog_action(key) {
            DialogAction::Save => self.save_tags(),
            DialogAction::Cancel => self.close_tag_editor(),
            DialogAction::Edit(input) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.handle_input(input);
                }
            }
        }
    }

    fn handle_prompt_key(&mut self, key: &Key) {
        let Some(action) = self.keymap.prompt_action(key) else {
            return;
        };
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        match action {
            PromptAction::Insert(ch) => prompt.input.push(ch),
            PromptAction::Backspace => {
                prompt.input.pop();
            }
            PromptAction::Cancel => {
                let kind = prompt.kind;
                self.prompt = None;
                if kind == PromptKind::Search {
                    self.set_search("");
                } else if kind.is_record_edit() {
                    self.record_edit = None;
                }
            }
            PromptAction::Submit => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit_prompt(prompt);
                }
            }
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        match prompt.kind {
            PromptKind::Search => self.set_search(&prompt.input),
            PromptKind::AddUrl => self.add_url(prompt.input.trim()),
            PromptKind::EditTitle => {
                if let Some(edit) = self.record_edit.as_mut() {
                    edit.title = prompt.input;
                    self.open_prompt(PromptKind::EditUrl, String::new());
                }
            }
            PromptKind::EditUrl => {
                if let Some(edit) = self.record_edit.as_mut() {
                    edit.url = prompt.input;
                    self.open_prompt(PromptKind::EditDescription, String::new());
                }
            }
            PromptKind::EditDescription => self.save_record_edit(&prompt.input),
        }
    }

    fn open_prompt(&mut self, kind: PromptKind, input: String) {
        self.prompt = Some(Prompt { kind, input });
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::SelectNext => self.move_selection(1),
            ListAction::SelectPrevious => self.move_selection(-1),
            ListAction::StartSearch => self.open_prompt(PromptKind::Search, self.search.clone()),
            ListAction::StartAdd => self.open_prompt(PromptKind::AddUrl, String::new()),
            ListAction::EditTags => self.open_tag_editor(),
            ListAction::EditRecord => self.start_record_edit(),
            ListAction::Refresh => self.refresh_selected(),
            ListAction::Delete => self.delete_selected(),
            ListAction::Quit => self.running = false,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let current = self.selected.unwrap_or(0);
        self.selected = Some(current.saturating_add_signed(delta).min(last));
    }

    /// 検索語を適用
    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
        self.selected = None;
        self.apply_filter(None);
        log::debug!("search '{}' -> {} results", self.search, self.visible.len());
    }

    /// 選択中のブックマークでタグ編集を開始
    pub fn open_tag_editor(&mut self) {
        if let Some(record) = self.selected_record().cloned() {
            self.editor = Some(TagEditor::open(record));
        }
    }

    /// ダイアログを保存せずに閉じる
    pub fn close_tag_editor(&mut self) {
        if self.editor.take().is_some() {
            log::debug!("tag editor closed without saving");
        }
    }

    /// 編集内容を保存してダイアログを閉じる
    pub fn save_tags(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };

        let mut outcome = None;
        editor.commit(self.store.as_mut(), |result| outcome = Some(result));

        match outcome {
            Some(Ok(saved)) => {
                self.notify(format!("Saved {} tags for {}", saved.tags.len(), saved.display_title()));
                if let Err(err) = self.reload() {
                    self.report(err);
                }
            }
            Some(Err(err)) => self.report(err),
            None => {}
        }
    }

    /// ダイアログ上のクリックを処理
    pub fn handle_dialog_hit(&mut self, hit: DialogHit) {
        let input = match hit {
            DialogHit::Token(index) => TagInput::ClickToken(index),
            DialogHit::Remove(index) => TagInput::ClickRemove(index),
            DialogHit::Inside => TagInput::ClickOutside,
            DialogHit::Backdrop => {
                self.close_tag_editor();
                return;
            }
        };

        if let Some(editor) = self.editor.as_mut() {
            editor.handle_input(input);
        }
    }

    /// 選択中のブックマークのタイトル・URL・説明の編集を開始
    pub fn start_record_edit(&mut self) {
        if let Some(record) = self.selected_record().cloned() {
            self.record_edit = Some(RecordEdit {
                original: record,
                title: String::new(),
                url: String::new(),
            });
            self.open_prompt(PromptKind::EditTitle, String::new());
        }
    }

    /// 入力済みの値でレコードを保存（URLが変われば旧キーを消す）
    fn save_record_edit(&mut self, description: &str) {
        let Some(edit) = self.record_edit.take() else {
            return;
        };

        match self.store_record_edit(edit, description) {
            Ok(saved) => {
                self.notify(format!("Updated {}", saved.display_title()));
                self.apply_filter(Some(&saved.url));
            }
            Err(err) => self.report(err),
        }
    }

    fn store_record_edit(&mut self, edit: RecordEdit, description: &str) -> Result<Bookmark> {
        let record = edit.original.with_edits(&edit.title, &edit.url, description);
        let saved = self.store.save_replacing(Some(&edit.original.url), record)?;
        self.reload()?;
        Ok(saved)
    }

    /// URLのページを取得して追加
    pub fn add_url(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }

        match self.fetch_and_save(url, None) {
            Ok(saved) => {
                self.notify(format!("Added {}", saved.display_title()));
                self.search.clear();
                self.apply_filter(Some(&saved.url));
            }
            Err(err) => self.report(err),
        }
    }

    /// 選択中のブックマークのタイトル・説明を取り直す（タグは保持）
    pub fn refresh_selected(&mut self) {
        let Some(url) = self.selected_record().map(|record| record.url.clone()) else {
            return;
        };

        match self.fetch_and_save(&url, Some(&url)) {
            Ok(saved) => {
                self.notify(format!("Refreshed {}", saved.display_title()));
                self.apply_filter(Some(&saved.url));
            }
            Err(err) => self.report(err),
        }
    }

    fn fetch_and_save(&mut self, url: &str, replacing: Option<&str>) -> Result<Bookmark> {
        let mut fresh = load_bookmark(self.fetcher.as_ref(), url)?;
        let existing_url = replacing.unwrap_or(fresh.url.as_str()).to_string();
        if let Some(existing) = self.store.get(&existing_url)? {
            fresh.tags = existing.tags;
        }

        let saved = self.store.save_replacing(replacing, fresh)?;
        self.reload()?;
        Ok(saved)
    }

    /// 選択中のブックマークを削除
    pub fn delete_selected(&mut self) {
        let Some(url) = self.selected_record().map(|record| record.url.clone()) else {
            return;
        };

        let result = match self.store.delete(&url) {
            Ok(true) => self.reload(),
            Ok(false) => Err(StoreError::NotFound { url: url.clone() }.into()),
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(()) => self.notify(format!("Deleted {}", url)),
            Err(err) => self.report(err),
        }
    }
}
