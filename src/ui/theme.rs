//! テーマ
//!
//! コンポーネントごとの配色をまとめる

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::BorderType,
};
use std::collections::HashMap;

/// UIコンポーネントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 検索バー
    SearchBar,
    /// カードのタイトル
    CardTitle,
    /// カードのURL
    CardUrl,
    /// カードの説明
    CardDescription,
    /// カード上のタグ
    CardTag,
    /// 選択中のカード
    Selected,
    /// タグチップ
    Chip,
    /// ハイライト中のタグチップ
    ChipHighlighted,
    /// チップの削除マーク
    ChipRemove,
    /// 下書き入力
    Draft,
    /// ダイアログ枠
    DialogBorder,
    /// 操作ヒント
    Hint,
    /// ステータスライン
    StatusLine,
    /// エラーメッセージ
    Error,
    /// 警告メッセージ
    Warning,
    /// 情報メッセージ
    Info,
}

/// カラー設定
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub foreground: Color,
    pub background: Color,
    /// 修飾子（太字、下線など）
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(self.modifiers)
    }
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    colors: HashMap<ComponentType, ColorScheme>,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// 16色端末でも読める暗色テーマ
    pub fn dark() -> Self {
        let mut colors = HashMap::new();
        let base = Color::Reset;

        colors.insert(ComponentType::SearchBar, ColorScheme::new(Color::White, base));
        colors.insert(
            ComponentType::CardTitle,
            ColorScheme::new(Color::White, base).with_modifier(Modifier::BOLD),
        );
        colors.insert(ComponentType::CardUrl, ColorScheme::new(Color::Blue, base));
        colors.insert(ComponentType::CardDescription, ColorScheme::new(Color::Gray, base));
        colors.insert(ComponentType::CardTag, ColorScheme::new(Color::Cyan, base));
        colors.insert(ComponentType::Selected, ColorScheme::new(Color::Black, Color::DarkGray));
        colors.insert(ComponentType::Chip, ColorScheme::new(Color::Black, Color::Cyan));
        colors.insert(
            ComponentType::ChipHighlighted,
            ColorScheme::new(Color::Black, Color::Yellow).with_modifier(Modifier::BOLD),
        );
        colors.insert(ComponentType::ChipRemove, ColorScheme::new(Color::Red, Color::Cyan));
        colors.insert(
            ComponentType::Draft,
            ColorScheme::new(Color::White, base).with_modifier(Modifier::UNDERLINED),
        );
        colors.insert(ComponentType::DialogBorder, ColorScheme::new(Color::Cyan, base));
        colors.insert(ComponentType::Hint, ColorScheme::new(Color::DarkGray, base));
        colors.insert(ComponentType::StatusLine, ColorScheme::new(Color::Black, Color::Gray));
        colors.insert(
            ComponentType::Error,
            ColorScheme::new(Color::White, Color::Red).with_modifier(Modifier::BOLD),
        );
        colors.insert(ComponentType::Warning, ColorScheme::new(Color::Black, Color::Yellow));
        colors.insert(ComponentType::Info, ColorScheme::new(Color::Black, Color::Green));

        Self {
            name: "dark".to_string(),
            colors,
            border_type: BorderType::Rounded,
        }
    }

    /// コンポーネントのスタイル
    pub fn style(&self, component: ComponentType) -> Style {
        self.colors
            .get(&component)
            .map(ColorScheme::to_style)
            .unwrap_or_default()
    }
}
