//! タグエディタの不変条件に対するプロパティテスト
//!
//! 任意の入力列に対して、カーソル範囲・ハイライト範囲・追加順序が保たれることを確認する

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use salvare::store::Bookmark;
use salvare::tags::{TagEditor, TagInput, TagKey, TokenSequence};

fn key_strategy() -> impl Strategy<Value = TagKey> {
    prop_oneof![
        Just(TagKey::Left),
        Just(TagKey::Up),
        Just(TagKey::Right),
        Just(TagKey::Down),
        Just(TagKey::Backspace),
        Just(TagKey::Enter),
        Just(TagKey::Other),
        prop::sample::select(vec!['a', 'b', 'z', ' ', '-']).prop_map(TagKey::Char),
    ]
}

fn input_strategy() -> impl Strategy<Value = TagInput> {
    prop_oneof![
        4 => key_strategy().prop_map(TagInput::Key),
        1 => (0usize..8).prop_map(TagInput::ClickToken),
        1 => (0usize..8).prop_map(TagInput::ClickRemove),
        1 => Just(TagInput::ClickOutside),
    ]
}

fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn cursor_and_highlight_stay_in_range(
        tags in proptest::collection::vec(tag_strategy(), 0..6),
        inputs in proptest::collection::vec(input_strategy(), 0..64),
    ) {
        let mut record = Bookmark::new("https://example.com", "Example", "");
        record.tags = tags;
        let mut editor = TagEditor::open(record);

        for input in inputs {
            editor.handle_input(input);
            let len = editor.tokens().len();
            prop_assert!(editor.cursor() <= len);
            if let Some(index) = editor.highlighted() {
                prop_assert!(index < len);
            }
        }
    }

    #[test]
    fn append_keeps_existing_order_and_goes_last(
        tags in proptest::collection::vec(tag_strategy(), 0..6),
        cursor_steps in 0usize..8,
        new_tag in tag_strategy(),
    ) {
        let mut record = Bookmark::new("https://example.com", "Example", "");
        record.tags = tags.clone();
        let mut editor = TagEditor::open(record);

        // 2回押しで1トークン分カーソルを戻す
        for _ in 0..cursor_steps * 2 {
            editor.handle_input(TagInput::Key(TagKey::Left));
        }
        let cursor_before = editor.cursor();

        for ch in new_tag.chars() {
            editor.handle_input(TagInput::Key(TagKey::Char(ch)));
        }
        editor.handle_input(TagInput::Key(TagKey::Enter));

        let mut expected = tags.clone();
        expected.push(new_tag);
        prop_assert_eq!(editor.tokens().as_ordered_list(), expected);

        let expected_cursor = if cursor_before == tags.len() { tags.len() + 1 } else { cursor_before };
        prop_assert_eq!(editor.cursor(), expected_cursor);
    }

    #[test]
    fn blank_text_is_never_appended(
        tags in proptest::collection::vec(tag_strategy(), 0..6),
        blank in "[ \t]{0,4}",
    ) {
        let mut sequence = TokenSequence::from_tags(&tags);
        prop_assert!(!sequence.append_token(&blank));
        prop_assert_eq!(sequence.as_ordered_list(), tags);
    }
}
