//! タグ編集ダイアログの描画とヒットテスト
//!
//! トークンは `" text "` + `×` のチップとして左から並べ、幅が足りなければ折り返す。
//! 入力スロットはカーソル位置（トークンの間）に置く。

use super::layout::dialog_rect;
use super::theme::{ComponentType, Theme};
use crate::tags::{TagEditor, TokenSequence};
use ratatui::{
    layout::{Position, Rect},
    widgets::{Block, Borders, Clear},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 削除マーク
pub const REMOVE_GLYPH: &str = "×";
/// チップ間の空白
const CHIP_GAP: u16 = 1;
/// 入力スロットの最小幅
const ENTRY_MIN_WIDTH: u16 = 8;

const DIALOG_TITLE: &str = " Edit tags ";
const HINT: &str = "Enter:add  Left/Right:move  Bksp:delete  C-s:save  Esc:cancel";
const PLACEHOLDER: &str = "new tag";

/// チップ1つ分の配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSlot {
    /// トークンの位置
    pub index: usize,
    /// 本体（クリックでハイライト）
    pub body: Rect,
    /// 削除マーク（クリックで削除）
    pub remove: Rect,
}

/// クリック位置の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogHit {
    Token(usize),
    Remove(usize),
    /// ダイアログ内のトークン以外
    Inside,
    /// ダイアログの外側
    Backdrop,
}

/// 直近に描画したダイアログの配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDialogLayout {
    /// 画面全体
    pub area: Rect,
    /// 枠を含むダイアログ
    pub dialog: Rect,
    /// 枠の内側
    pub inner: Rect,
    pub chips: Vec<ChipSlot>,
    /// 入力スロット（収まらなければ `None`）
    pub entry: Option<Rect>,
}

impl TagDialogLayout {
    pub fn hit_test(&self, column: u16, row: u16) -> DialogHit {
        let position = Position::new(column, row);
        for chip in &self.chips {
            if chip.remove.contains(position) {
                return DialogHit::Remove(chip.index);
            }
            if chip.body.contains(position) {
                return DialogHit::Token(chip.index);
            }
        }

        if self.dialog.contains(position) {
            DialogHit::Inside
        } else {
            DialogHit::Backdrop
        }
    }
}

/// 画面サイズとエディタ状態からダイアログの配置を計算
pub fn layout_dialog(area: Rect, editor: &TagEditor) -> TagDialogLayout {
    let dialog = dialog_rect(area);
    let inner = Block::default().borders(Borders::ALL).inner(dialog);

    // 1行目はタイトル、2行目は空行、最終行はヒント
    let top = inner.y.saturating_add(2);
    let bottom = inner.bottom().saturating_sub(1);
    let region = Rect {
        x: inner.x,
        y: top,
        width: inner.width,
        height: bottom.saturating_sub(top),
    };

    let (chips, entry) = layout_tokens(region, editor.tokens(), editor.draft());
    TagDialogLayout {
        area,
        dialog,
        inner,
        chips,
        entry,
    }
}

/// トークンと入力スロットを `region` 内に流し込む
pub fn layout_tokens(region: Rect, tokens: &TokenSequence, draft: &str) -> (Vec<ChipSlot>, Option<Rect>) {
    let mut chips = Vec::with_capacity(tokens.len());
    let mut entry = None;

    let mut x = region.x;
    let mut y = region.y;
    let mut place = |width: u16| -> Option<Rect> {
        let width = width.min(region.width);
        if width == 0 {
            return None;
        }
        if x > region.x && x.saturating_add(width) > region.right() {
            x = region.x;
            y = y.saturating_add(1);
        }
        if y >= region.bottom() {
            return None;
        }
        let rect = Rect::new(x, y, width, 1);
        x = x.saturating_add(width).saturating_add(CHIP_GAP);
        Some(rect)
    };

    for slot in 0..=tokens.len() {
        if slot == tokens.cursor() {
            let draft_width = u16::try_from(draft.width()).unwrap_or(u16::MAX);
            entry = place(draft_width.saturating_add(1).max(ENTRY_MIN_WIDTH));
        }

        if let Some(token) = tokens.get(slot) {
            let text_width = u16::try_from(token.text().width()).unwrap_or(u16::MAX);
            // " text " + "×"
            let total = text_width.saturating_add(3);
            if let Some(rect) = place(total) {
                chips.push(ChipSlot {
                    index: slot,
                    body: Rect::new(rect.x, rect.y, rect.width.saturating_sub(1), 1),
                    remove: Rect::new(rect.right().saturating_sub(1), rect.y, 1, 1),
                });
            }
        }
    }

    (chips, entry)
}

/// 表示幅 `max_width` に収まるよう切り詰める
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > max_width {
            break;
        }
        used += width;
        out.push(ch);
    }
    out
}

/// ダイアログを描画し、その配置を返す
pub fn render_tag_dialog(frame: &mut Frame<'_>, editor: &TagEditor, theme: &Theme) -> TagDialogLayout {
    let layout = layout_dialog(frame.area(), editor);
    let inner = layout.inner;

    frame.render_widget(Clear, layout.dialog);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.style(ComponentType::DialogBorder))
        .title(DIALOG_TITLE);
    frame.render_widget(block, layout.dialog);

    if inner.width == 0 || inner.height == 0 {
        return layout;
    }

    {
        let buf = frame.buffer_mut();
        buf.set_stringn(
            inner.x,
            inner.y,
            editor.record().display_title(),
            inner.width as usize,
            theme.style(ComponentType::CardTitle),
        );

        for chip in &layout.chips {
            let Some(token) = editor.tokens().get(chip.index) else {
                continue;
            };
            let style = if editor.highlighted() == Some(chip.index) {
                theme.style(ComponentType::ChipHighlighted)
            } else {
                theme.style(ComponentType::Chip)
            };
            let text = truncate_to_width(token.text(), chip.body.width.saturating_sub(2) as usize);
            buf.set_style(chip.body, style);
            buf.set_stringn(
                chip.body.x,
                chip.body.y,
                format!(" {} ", text),
                chip.body.width as usize,
                style,
            );
            buf.set_string(chip.remove.x, chip.remove.y, REMOVE_GLYPH, theme.style(ComponentType::ChipRemove));
        }

        if let Some(entry) = layout.entry {
            buf.set_style(entry, theme.style(ComponentType::Draft));
            if editor.draft().is_empty() {
                buf.set_stringn(entry.x, entry.y, PLACEHOLDER, entry.width as usize, theme.style(ComponentType::Hint));
            } else {
                buf.set_stringn(entry.x, entry.y, editor.draft(), entry.width as usize, theme.style(ComponentType::Draft));
            }
        }

        if inner.height > 1 {
            buf.set_stringn(
                inner.x,
                inner.bottom() - 1,
                HINT,
                inner.width as usize,
                theme.style(ComponentType::Hint),
            );
        }
    }

    if let Some(entry) = layout.entry {
        let draft_width = u16::try_from(editor.draft().width()).unwrap_or(u16::MAX);
        let offset = draft_width.min(entry.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(entry.x + offset, entry.y));
    }

    layout
}
