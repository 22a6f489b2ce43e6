//! ページメタデータの取得
//!
//! URLのページを取得してタイトル・説明を抜き出し、新しいブックマークを組み立てる

pub mod extract;

// 公開API
pub use extract::{extract_metadata, PageMetadata};

use crate::error::{MetadataError, Result};
use crate::store::Bookmark;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// 中継ページを辿る最大回数
const MAX_REDIRECT_DEPTH: usize = 3;

/// ページ本文を取得するトレイト
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP(S)でページを取得する実装
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("salvare/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|err| MetadataError::Request {
                url: String::new(),
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let request_error = |err: reqwest::Error| MetadataError::Request {
            url: url.to_string(),
            message: err.to_string(),
        };

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(request_error)?;
        Ok(body)
    }
}

fn interstitial_host_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https://([a-z0-9-]+\.)*(messenger|facebook)\.com/")
            .expect("interstitial host pattern is valid")
    })
}

fn location_replace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"document\.location\.replace\("(.+?)"\);"#).expect("redirect pattern is valid")
    })
}

/// 中継ページ（messenger / facebook のリンク確認画面）の転送先
pub fn interstitial_target(url: &str, body: &str) -> Option<String> {
    if !interstitial_host_regex().is_match(url) {
        return None;
    }

    location_replace_regex()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace('\\', ""))
}

/// URLのページを取得して、タグなしのブックマークを作成
///
/// タイトルが取れなければURLをタイトルにする。日付はストアが設定する。
pub fn load_bookmark<F: PageFetcher + ?Sized>(fetcher: &F, url: &str) -> Result<Bookmark> {
    let mut current = url.trim().to_string();

    for _ in 0..=MAX_REDIRECT_DEPTH {
        log::info!("Loading url: {}", current);
        if !current.starts_with("http") {
            return Err(MetadataError::InvalidUrl { url: current }.into());
        }

        let body = fetcher.fetch(&current)?;
        if let Some(target) = interstitial_target(&current, &body) {
            log::debug!("following interstitial page {} -> {}", current, target);
            current = target;
            continue;
        }

        let metadata = extract_metadata(&body);
        let title = metadata.title.unwrap_or_else(|| current.clone());
        let description = metadata.description.unwrap_or_default();
        return Ok(Bookmark::new(current, title, description));
    }

    Err(MetadataError::TooManyRedirects { url: url.to_string() }.into())
}
