//! タグトークンエディタ
//!
//! タグをトークンとして並べ、その間を移動する1つの入力スロットで編集する

pub mod dispatcher;
pub mod editor;
pub mod state;
pub mod token;

// 公開API
pub use dispatcher::{DispatchOutcome, InputDispatcher, TagInput, TagKey};
pub use editor::TagEditor;
pub use state::EditorState;
pub use token::{Token, TokenSequence};
