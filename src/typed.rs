//! 役割付き URI
//!
//! ## 概要
//!
//! [`Uri`] に役割を持たせたラッパーです。
//! 現在のリクエスト URI ([`CurrentUri`])、アプリケーションのベース URI ([`BaseUri`])、
//! アセット配信用 URI ([`AssetUri`])、直前のリクエスト URI ([`PreviousUri`])
//! を型で区別します。
//!
//! どのラッパーも [`Uri`] のアクセサーと `with_*` メソッドをそのまま提供し、
//! `with_*` は同じ種類のラッパーを返します。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::{CurrentUri, Uri};
//!
//! let uri = Uri::parse("https://example.com/base/path/").unwrap();
//! let current = CurrentUri::new(uri, true);
//!
//! let current = current.with_scheme("http");
//! assert!(current.is_home());
//! assert_eq!(current.to_string(), "http://example.com/base/path/");
//! ```

use core::fmt;

use crate::uri::Uri;

macro_rules! impl_uri_wrapper {
    ($name:ident) => {
        impl $name {
            /// 内部の [`Uri`] を参照
            pub fn as_uri(&self) -> &Uri {
                &self.uri
            }

            /// 内部の [`Uri`] を取り出す
            pub fn into_inner(self) -> Uri {
                self.uri
            }

            /// スキームを取得
            pub fn scheme(&self) -> Option<&str> {
                self.uri.scheme()
            }

            /// authority (`userinfo@host:port`) を取得
            pub fn authority(&self) -> Option<String> {
                self.uri.authority()
            }

            /// userinfo を取得
            pub fn user_info(&self) -> Option<&str> {
                self.uri.user_info()
            }

            /// ホストを取得
            pub fn host(&self) -> Option<&str> {
                self.uri.host()
            }

            /// 明示されたポートを取得
            pub fn port(&self) -> Option<u16> {
                self.uri.port()
            }

            /// パスを取得
            pub fn path(&self) -> &str {
                self.uri.path()
            }

            /// クエリを取得
            pub fn query(&self) -> Option<&str> {
                self.uri.query()
            }

            /// フラグメントを取得
            pub fn fragment(&self) -> Option<&str> {
                self.uri.fragment()
            }

            /// 絶対 URL かどうか
            pub fn is_absolute(&self) -> bool {
                self.uri.is_absolute()
            }

            /// スキームを差し替え (空文字列で削除)
            pub fn with_scheme(&self, scheme: &str) -> Self {
                self.rewrap(self.uri.with_scheme(scheme))
            }

            /// userinfo を差し替え (空のユーザー名で削除)
            pub fn with_user_info(&self, user: &str, password: Option<&str>) -> Self {
                self.rewrap(self.uri.with_user_info(user, password))
            }

            /// ホストを差し替え
            pub fn with_host(&self, host: &str) -> Self {
                self.rewrap(self.uri.with_host(host))
            }

            /// ポートを差し替え (`None` で削除)
            pub fn with_port(&self, port: Option<u16>) -> Self {
                self.rewrap(self.uri.with_port(port))
            }

            /// パスを差し替え
            pub fn with_path(&self, path: &str) -> Self {
                self.rewrap(self.uri.with_path(path))
            }

            /// クエリを差し替え (空文字列で削除)
            pub fn with_query(&self, query: &str) -> Self {
                self.rewrap(self.uri.with_query(query))
            }

            /// フラグメントを差し替え (空文字列で削除)
            pub fn with_fragment(&self, fragment: &str) -> Self {
                self.rewrap(self.uri.with_fragment(fragment))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.uri, f)
            }
        }

        impl AsRef<Uri> for $name {
            fn as_ref(&self) -> &Uri {
                &self.uri
            }
        }
    };
}

/// 現在のリクエスト URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CurrentUri {
    uri: Uri,
    is_home: bool,
}

impl CurrentUri {
    /// 作成
    pub fn new(uri: Uri, is_home: bool) -> Self {
        Self { uri, is_home }
    }

    /// ホーム URI かどうか
    pub fn is_home(&self) -> bool {
        self.is_home
    }

    fn rewrap(&self, uri: Uri) -> Self {
        Self {
            uri,
            is_home: self.is_home,
        }
    }
}

impl From<Uri> for CurrentUri {
    fn from(uri: Uri) -> Self {
        Self::new(uri, false)
    }
}

impl_uri_wrapper!(CurrentUri);

/// アプリケーションのベース URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BaseUri {
    uri: Uri,
}

impl BaseUri {
    /// 作成
    pub fn new(uri: Uri) -> Self {
        Self { uri }
    }

    fn rewrap(&self, uri: Uri) -> Self {
        Self { uri }
    }
}

impl From<Uri> for BaseUri {
    fn from(uri: Uri) -> Self {
        Self::new(uri)
    }
}

impl_uri_wrapper!(BaseUri);

/// アセット配信用 URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AssetUri {
    uri: Uri,
}

impl AssetUri {
    /// 作成
    pub fn new(uri: Uri) -> Self {
        Self { uri }
    }

    fn rewrap(&self, uri: Uri) -> Self {
        Self { uri }
    }
}

impl From<Uri> for AssetUri {
    fn from(uri: Uri) -> Self {
        Self::new(uri)
    }
}

impl_uri_wrapper!(AssetUri);

/// 直前のリクエスト URI
///
/// リダイレクトで元のページに戻る場合などに使います。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PreviousUri {
    uri: Uri,
}

impl PreviousUri {
    /// 作成
    pub fn new(uri: Uri) -> Self {
        Self { uri }
    }

    fn rewrap(&self, uri: Uri) -> Self {
        Self { uri }
    }
}

impl From<Uri> for PreviousUri {
    fn from(uri: Uri) -> Self {
        Self::new(uri)
    }
}

impl_uri_wrapper!(PreviousUri);
