//! HTMLからのメタデータ抽出
//!
//! 完全なHTMLパーサは使わず、`<meta>` と `<title>` だけを正規表現で拾う

use regex::Regex;
use std::sync::OnceLock;

/// ページから取り出したメタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// `<meta>` タグ1つ分の属性
#[derive(Debug, Default)]
struct MetaTag {
    name: Option<String>,
    property: Option<String>,
    content: Option<String>,
}

fn meta_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("meta tag pattern is valid"))
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#)
            .expect("attribute pattern is valid")
    })
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("title pattern is valid"))
}

/// HTML文字列からタイトルと説明を抽出
///
/// * タイトル: `og:title` → `<title>`
/// * 説明: `name="description"` → `property="description"` → `og:description`
pub fn extract_metadata(html: &str) -> PageMetadata {
    let tags = collect_meta_tags(html);

    let title = find_property(&tags, "og:title").or_else(|| {
        title_regex()
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| normalize_text(m.as_str()))
            .filter(|text| !text.is_empty())
    });

    let description = find_name(&tags, "description")
        .or_else(|| find_property(&tags, "description"))
        .or_else(|| find_property(&tags, "og:description"));

    PageMetadata { title, description }
}

fn collect_meta_tags(html: &str) -> Vec<MetaTag> {
    meta_tag_regex()
        .find_iter(html)
        .map(|tag| {
            let mut meta = MetaTag::default();
            for caps in attribute_regex().captures_iter(tag.as_str()) {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| decode_entities(m.as_str()));
                match caps[1].to_ascii_lowercase().as_str() {
                    "name" => meta.name = value,
                    "property" => meta.property = value,
                    "content" => meta.content = value,
                    _ => {}
                }
            }
            meta
        })
        .collect()
}

fn find_name(tags: &[MetaTag], name: &str) -> Option<String> {
    tags.iter()
        .find(|tag| tag.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name)))
        .and_then(|tag| tag.content.clone())
}

fn find_property(tags: &[MetaTag], property: &str) -> Option<String> {
    tags.iter()
        .find(|tag| tag.property.as_deref().is_some_and(|p| p.eq_ignore_ascii_case(property)))
        .and_then(|tag| tag.content.clone())
}

/// 改行・連続空白を1つにまとめ、実体参照を戻す
fn normalize_text(raw: &str) -> String {
    decode_entities(&raw.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// 名前付き・数値の文字参照を戻す
fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
