//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod cards;
pub mod layout;
pub mod renderer;
pub mod tag_dialog;
pub mod theme;

// 公開API
pub use layout::{calculate_layout, dialog_rect, AppLayout};
pub use renderer::{AppRenderer, AppView, PromptView};
pub use tag_dialog::{layout_dialog, layout_tokens, ChipSlot, DialogHit, TagDialogLayout};
pub use theme::{ComponentType, Theme};
