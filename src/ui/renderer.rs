//! 画面全体の描画
//!
//! 一覧・検索バー・ステータスライン・タグ編集ダイアログを1フレームにまとめる

use super::cards::render_cards;
use super::layout::calculate_layout;
use super::tag_dialog::{render_tag_dialog, TagDialogLayout};
use super::theme::{ComponentType, Theme};
use crate::error::{ErrorDisplay, ErrorLevel};
use crate::store::Bookmark;
use crate::tags::TagEditor;
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use unicode_width::UnicodeWidthStr;

/// 1行入力の表示内容
#[derive(Debug, Clone, Copy)]
pub struct PromptView<'a> {
    pub label: &'a str,
    pub input: &'a str,
}

/// 描画に必要なアプリケーション状態
#[derive(Debug, Clone)]
pub struct AppView<'a> {
    /// 表示対象（検索後）
    pub records: Vec<&'a Bookmark>,
    /// 全件数
    pub total: usize,
    pub selected: Option<usize>,
    /// 適用中の検索語
    pub search: &'a str,
    /// 入力中のプロンプト
    pub prompt: Option<PromptView<'a>>,
    /// 開いているタグエディタ
    pub editor: Option<&'a TagEditor>,
    pub status: Option<&'a ErrorDisplay>,
}

/// アプリケーションレンダラー
#[derive(Debug, Default)]
pub struct AppRenderer {
    theme: Theme,
    /// 直近に描画したダイアログ（ヒットテスト用）
    last_dialog: Option<TagDialogLayout>,
}

impl AppRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// 直近のダイアログ配置（ダイアログが閉じていれば `None`）
    pub fn dialog_layout(&self) -> Option<&TagDialogLayout> {
        self.last_dialog.as_ref()
    }

    /// メイン描画処理
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>, view: &AppView<'_>) -> io::Result<()> {
        let mut dialog = None;
        terminal.draw(|frame| {
            dialog = Self::render_frame(frame, &self.theme, view);
        })?;
        self.last_dialog = dialog;
        Ok(())
    }

    fn render_frame(frame: &mut Frame<'_>, theme: &Theme, view: &AppView<'_>) -> Option<TagDialogLayout> {
        let layout = match calculate_layout(frame.area()) {
            Ok(layout) => layout,
            Err(err) => {
                let display = ErrorDisplay::new(&err);
                let paragraph = Paragraph::new(display.message)
                    .style(theme.style(ComponentType::Error))
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, frame.area());
                return None;
            }
        };

        let prompt_cursor = Self::render_search_bar(frame, layout.search, theme, view);
        render_cards(
            frame,
            layout.list,
            &view.records,
            view.selected,
            !view.search.trim().is_empty(),
            theme,
        );
        Self::render_status_line(frame, layout.status, theme, view);

        if let Some((x, y)) = prompt_cursor {
            frame.set_cursor_position(Position::new(x, y));
        }

        view.editor.map(|editor| render_tag_dialog(frame, editor, theme))
    }

    /// 検索バー描画（プロンプト入力中はそのカーソル位置を返す）
    fn render_search_bar(
        frame: &mut Frame<'_>,
        area: Rect,
        theme: &Theme,
        view: &AppView<'_>,
    ) -> Option<(u16, u16)> {
        let style = theme.style(ComponentType::SearchBar);
        match view.prompt {
            Some(prompt) => {
                let line = Line::from(vec![
                    Span::styled(prompt.label, theme.style(ComponentType::CardTag)),
                    Span::styled(prompt.input, style),
                ]);
                frame.render_widget(Paragraph::new(line), area);

                let offset = prompt.label.width() + prompt.input.width();
                let x = area.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
                Some((x.min(area.right().saturating_sub(1)), area.y))
            }
            None => {
                let text = if view.search.is_empty() {
                    Line::from(Span::styled("Press / to search", theme.style(ComponentType::Hint)))
                } else {
                    Line::from(vec![
                        Span::styled("Search: ", theme.style(ComponentType::CardTag)),
                        Span::styled(view.search, style),
                    ])
                };
                frame.render_widget(Paragraph::new(text), area);
                None
            }
        }
    }

    /// ステータスライン描画
    fn render_status_line(frame: &mut Frame<'_>, area: Rect, theme: &Theme, view: &AppView<'_>) {
        let paragraph = match view.status.filter(|status| !status.is_expired()) {
            Some(status) => {
                let component = match status.level {
                    ErrorLevel::Info => ComponentType::Info,
                    ErrorLevel::Warning => ComponentType::Warning,
                    ErrorLevel::Error | ErrorLevel::Fatal => ComponentType::Error,
                };
                Paragraph::new(format!(" {}", status.message)).style(theme.style(component))
            }
            None => {
                let count = if view.records.len() == view.total {
                    format!(" {} bookmarks", view.total)
                } else {
                    format!(" {}/{} bookmarks", view.records.len(), view.total)
                };
                Paragraph::new(format!("{}  a:add  t:tags  r:refresh  d:delete  q:quit", count))
                    .style(theme.style(ComponentType::StatusLine))
            }
        };
        frame.render_widget(paragraph, area);
    }
}
