//! # shiguredo_uri
//!
//! 依存なしの URI 値オブジェクトと名前付き URL レジストリ
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用 (`log` フィーチャーは任意)
//! - **不変**: 値オブジェクトの変更操作はすべて新しい値を返す
//! - **PHP 互換のクエリ**: `a[]=1&a[b]=2` 形式の入れ子パラメーターに対応
//!
//! ## 使い方
//!
//! ### パスとクエリ
//!
//! ```rust
//! use shiguredo_uri::{Parameters, UriPath, UriRequest};
//!
//! let path = UriPath::new("/blog/2024/hello");
//! assert_eq!(path.segment(2), Some("blog"));
//! assert_eq!(path.sub("/blog").get(), "/2024/hello");
//!
//! let request = UriRequest::new("/search?q=rust")
//!     .with_query(Parameters::from([("q", "uri"), ("page", "2")]));
//! assert_eq!(request.get(), "/search?q=uri&page=2");
//! ```
//!
//! ### URL の組み立て
//!
//! ```rust
//! use shiguredo_uri::Urls;
//!
//! let mut urls = Urls::new();
//! urls.set("home", "https://example.com/");
//! assert_eq!(urls.build("home", Some("/about")).unwrap(), "https://example.com/about");
//! ```

mod log;

pub mod base_path;
pub mod path;
pub mod query;
pub mod request;
pub mod typed;
pub mod uri;
pub mod urls;

pub use base_path::BasePathResolver;
pub use path::UriPath;
pub use query::{Parameters, QueryValue, UriQuery};
pub use request::UriRequest;
pub use typed::{AssetUri, BaseUri, CurrentUri, PreviousUri};
pub use uri::{Uri, UriError};
pub use urls::{UrlBuilder, Urls, UrlsError};
