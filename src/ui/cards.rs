//! ブックマーク一覧（カード）の描画

use super::theme::{ComponentType, Theme};
use crate::store::Bookmark;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

const EMPTY_STORE: &str = "No bookmarks yet. Press 'a' to add one.";
const NO_MATCH: &str = "No bookmarks match the search.";

fn card_item<'a>(record: &'a Bookmark, theme: &Theme) -> ListItem<'a> {
    let mut lines = vec![
        Line::from(Span::styled(record.display_title(), theme.style(ComponentType::CardTitle))),
        Line::from(Span::styled(record.url.as_str(), theme.style(ComponentType::CardUrl))),
    ];

    if !record.description.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            record.description.as_str(),
            theme.style(ComponentType::CardDescription),
        )));
    }

    let mut footer: Vec<Span<'a>> = record
        .tags
        .iter()
        .flat_map(|tag| {
            [
                Span::styled(format!("#{}", tag), theme.style(ComponentType::CardTag)),
                Span::raw(" "),
            ]
        })
        .collect();
    if !record.last_modified_date.is_empty() {
        footer.push(Span::styled(
            format!(" {}", record.last_modified_date),
            theme.style(ComponentType::Hint),
        ));
    }
    lines.push(Line::from(footer));
    lines.push(Line::default());

    ListItem::new(lines)
}

/// カード一覧を描画
///
/// `filtered` は検索中かどうか（空表示の文言に使う）。
pub fn render_cards(
    frame: &mut Frame<'_>,
    area: Rect,
    records: &[&Bookmark],
    selected: Option<usize>,
    filtered: bool,
    theme: &Theme,
) {
    if records.is_empty() {
        let message = if filtered { NO_MATCH } else { EMPTY_STORE };
        frame.render_widget(Paragraph::new(message).style(theme.style(ComponentType::Hint)), area);
        return;
    }

    let items: Vec<ListItem<'_>> = records.iter().map(|record| card_item(record, theme)).collect();
    let list = List::new(items).highlight_style(theme.style(ComponentType::Selected));

    let mut state = ListState::default();
    state.select(selected);
    frame.render_stateful_widget(list, area, &mut state);
}
