//! 画面レイアウト計算

use crate::error::{Result, UiError};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 最小画面サイズ
pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 8;

/// ダイアログの最大サイズ
const DIALOG_MAX_WIDTH: u16 = 64;
const DIALOG_MAX_HEIGHT: u16 = 14;

/// 一覧画面のレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// 検索バー（上部、1行）
    pub search: Rect,
    /// カード一覧（中央、可変）
    pub list: Rect,
    /// ステータスライン（下部、1行）
    pub status: Rect,
    pub total: Rect,
}

/// 画面サイズからレイアウトを計算
pub fn calculate_layout(area: Rect) -> Result<AppLayout> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return Err(UiError::ScreenTooSmall {
            width: area.width,
            height: area.height,
        }
        .into());
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Ok(AppLayout {
        search: chunks[0],
        list: chunks[1],
        status: chunks[2],
        total: area,
    })
}

/// 画面中央のダイアログ領域
pub fn dialog_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(DIALOG_MAX_WIDTH);
    let height = area.height.saturating_sub(2).min(DIALOG_MAX_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
