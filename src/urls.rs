//! 名前付き URL レジストリ
//!
//! ## 概要
//!
//! キーとベース URL を対応付け、ベース URL に相対パスを連結した URL を組み立てます。
//!
//! - 絶対 URL (スキームまたは authority を持つ) のパスはそのまま返します
//! - `#` で始まるパスは `/` を挟まずに連結します
//! - それ以外はちょうど 1 つの `/` で連結します
//! - キーごとに [`UrlBuilder`] を登録すると、組み立て処理を完全に置き換えられます
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::Urls;
//!
//! let mut urls = Urls::new();
//! urls.set("home", "https://example.com")
//!     .set("backend", "https://example.com/backend/");
//!
//! assert_eq!(urls.build("backend", Some("/foo/bar/")).unwrap(), "https://example.com/backend/foo/bar/");
//! assert_eq!(urls.build("home", Some("#")).unwrap(), "https://example.com#");
//! assert_eq!(urls.build("home", Some("https://other.example/")).unwrap(), "https://other.example/");
//! assert!(urls.build("missing", None).is_err());
//! ```
//!
//! ## 並行性
//!
//! `set` は `&mut self` を取ります。起動時にすべて登録してから共有する使い方を想定しており、
//! 登録後は `&Urls` を複数スレッドから読み取れます。

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use crate::log;
use crate::uri::{Uri, is_absolute_reference};

/// URL レジストリのエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlsError {
    /// キーが登録されていない
    NotConfigured { key: String },
}

impl fmt::Display for UrlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlsError::NotConfigured { key } => write!(f, "url {:?} is not set", key),
        }
    }
}

impl std::error::Error for UrlsError {}

/// URL の組み立てを置き換えるビルダー
///
/// `None` を返した場合、組み立て結果は空文字列になります。
///
/// クロージャーでも実装できます:
///
/// ```rust
/// use shiguredo_uri::Urls;
///
/// let mut urls = Urls::new();
/// urls.set_with_builder("cdn", "https://cdn.example.com", |url: &str, path: Option<&str>| {
///     Some(format!("{}/v2/{}", url, path.unwrap_or("")))
/// });
/// assert_eq!(urls.build("cdn", Some("app.js")).unwrap(), "https://cdn.example.com/v2/app.js");
/// ```
pub trait UrlBuilder: Send + Sync {
    /// ベース URL とパスから URL を組み立てる
    fn build(&self, url: &str, path: Option<&str>) -> Option<String>;
}

impl<F> UrlBuilder for F
where
    F: Fn(&str, Option<&str>) -> Option<String> + Send + Sync,
{
    fn build(&self, url: &str, path: Option<&str>) -> Option<String> {
        self(url, path)
    }
}

/// 名前付き URL レジストリ
#[derive(Clone, Default)]
pub struct Urls {
    /// 登録順を保持する
    urls: Vec<(String, String)>,
    builders: HashMap<String, Arc<dyn UrlBuilder>>,
}

impl fmt::Debug for Urls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder_keys: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        builder_keys.sort_unstable();
        f.debug_struct("Urls")
            .field("urls", &self.urls)
            .field("builders", &builder_keys)
            .finish()
    }
}

impl Urls {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// URL を登録 (既存のキーは上書き)
    ///
    /// 以前に登録したビルダーは残ります。
    pub fn set(&mut self, key: &str, url: &str) -> &mut Self {
        log::debug!("set url: {} => {}", key, url);
        match self.urls.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = url.to_string(),
            None => self.urls.push((key.to_string(), url.to_string())),
        }
        self
    }

    /// URL をビルダーと一緒に登録
    pub fn set_with_builder<B>(&mut self, key: &str, url: &str, builder: B) -> &mut Self
    where
        B: UrlBuilder + 'static,
    {
        self.set(key, url);
        self.builders.insert(key.to_string(), Arc::new(builder));
        self
    }

    /// URL を取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.urls
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, url)| url.as_str())
    }

    /// URL を [`Uri`] として取得
    ///
    /// キーが未登録なら `default` を使い、それもなければ空の Uri を返します。
    /// パースできない URL も空の Uri になります。
    pub fn get_uri(&self, key: &str, default: Option<&str>) -> Uri {
        let url = self.get(key).or(default).unwrap_or("");
        Uri::parse_lossy(url)
    }

    /// 登録済みのすべての URL を登録順に取得
    pub fn all(&self) -> Vec<(&str, &str)> {
        self.urls
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// キーのベース URL にパスを連結した URL を組み立てる
    pub fn build(&self, key: &str, path: Option<&str>) -> Result<String, UrlsError> {
        let Some(url) = self.get(key) else {
            log::warning!("url is not set: {}", key);
            return Err(UrlsError::NotConfigured {
                key: key.to_string(),
            });
        };

        if let Some(builder) = self.builders.get(key) {
            log::debug!("build url with custom builder: {}", key);
            return Ok(builder.build(url, path).unwrap_or_default());
        }

        let path = match path {
            Some(path) if !path.is_empty() => path,
            _ => return Ok(url.to_string()),
        };

        if is_absolute_reference(path) {
            log::debug!("absolute url is returned as is: {}", path);
            return Ok(path.to_string());
        }

        let base = url.trim_end_matches('/');
        if path.starts_with('#') {
            return Ok(format!("{}{}", base, path));
        }

        Ok(format!("{}/{}", base, path.trim_start_matches('/')))
    }
}
