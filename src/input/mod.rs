//! 入力処理モジュール
//!
//! キーバインドとマウス入力の変換を提供

pub mod keybinding;

// 公開API
pub use keybinding::{is_press, DialogAction, Key, KeyCode, KeyMap, KeyModifiers, ListAction, PromptAction};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// 左クリックの位置（列, 行）
pub fn left_click(event: &MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers as CrosstermModifiers;

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 4,
            modifiers: CrosstermModifiers::NONE,
        }
    }

    #[test]
    fn only_left_press_counts_as_click() {
        assert_eq!(left_click(&mouse(MouseEventKind::Down(MouseButton::Left))), Some((12, 4)));
        assert_eq!(left_click(&mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(left_click(&mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(left_click(&mouse(MouseEventKind::Moved)), None);
    }
}
