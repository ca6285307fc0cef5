//! リクエスト URI (パス + クエリ)
//!
//! ## 概要
//!
//! `path/to?arg=value` 形式の文字列を最初の `?` で [`UriPath`] と [`UriQuery`] に分け、
//! それぞれを差し替えた新しい値を返します。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::request::UriRequest;
//!
//! let request = UriRequest::new("/users/42?tab=posts");
//! assert_eq!(request.path().get(), "/users/42");
//! assert!(request.has_query());
//!
//! let request = request.with_query("tab=likes&page=2");
//! assert_eq!(request.get(), "/users/42?tab=likes&page=2");
//!
//! // `?` だけの場合は空のクエリを持つが、組み立てでは `?` を付けない
//! let request = UriRequest::new("/users/42?");
//! assert!(request.has_query());
//! assert_eq!(request.get(), "/users/42");
//! ```

use core::fmt;

use crate::path::UriPath;
use crate::query::UriQuery;

/// パスとクエリからなるリクエスト URI (`path/to?arg=value`)
///
/// クエリがない場合 (`?` を含まない) と空のクエリ (`path?`) は区別されます。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UriRequest {
    path: UriPath,
    query: Option<UriQuery>,
}

impl UriRequest {
    /// リクエスト URI を作成
    ///
    /// 最初の `?` で分割し、`?` があれば後ろが空でもクエリを持ちます。
    pub fn new(uri: &str) -> Self {
        match uri.split_once('?') {
            Some((path, query)) => Self {
                path: UriPath::new(path),
                query: Some(UriQuery::new(query)),
            },
            None => Self {
                path: UriPath::new(uri),
                query: None,
            },
        }
    }

    /// パスを差し替え (クエリはそのまま)
    pub fn with_path(&self, path: impl Into<UriPath>) -> Self {
        Self {
            path: path.into(),
            query: self.query.clone(),
        }
    }

    /// クエリを差し替え
    ///
    /// 結果は常にクエリを持ちます。
    pub fn with_query(&self, query: impl Into<UriQuery>) -> Self {
        Self {
            path: self.path.clone(),
            query: Some(query.into()),
        }
    }

    /// リクエスト URI を取得
    ///
    /// クエリが空の場合は `?` を付けません。
    pub fn get(&self) -> String {
        match &self.query {
            Some(query) if !query.get().is_empty() => {
                format!("{}?{}", self.path.get(), query.get())
            }
            _ => self.path.get().to_string(),
        }
    }

    /// パスを取得
    pub fn path(&self) -> &UriPath {
        &self.path
    }

    /// クエリを持つかどうか
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// クエリを取得
    pub fn query(&self) -> Option<&UriQuery> {
        self.query.as_ref()
    }
}

impl fmt::Display for UriRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get())
    }
}

impl From<&str> for UriRequest {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for UriRequest {
    fn from(uri: String) -> Self {
        Self::new(&uri)
    }
}
