//! スクリプト名からのベースパス解決
//!
//! ## 概要
//!
//! CGI 形式のサーバーパラメーターの `SCRIPT_NAME` から、アプリケーションが配置された
//! ディレクトリ (ベースパス) を求めます。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::BasePathResolver;
//!
//! let resolver = BasePathResolver::new([("SCRIPT_NAME", "/app/index.php")]);
//! assert_eq!(resolver.resolve(), "/app");
//!
//! let resolver = BasePathResolver::new([("SCRIPT_NAME", "/index.php")]);
//! assert_eq!(resolver.resolve(), "");
//! ```

use crate::uri::Uri;

const SCRIPT_NAME: &str = "SCRIPT_NAME";

/// ベースパスリゾルバー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePathResolver {
    server_params: Vec<(String, String)>,
}

impl BasePathResolver {
    /// サーバーパラメーター (名前と値の組) から作成
    pub fn new<I, K, V>(server_params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            server_params: server_params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// ベースパスを解決
    ///
    /// `SCRIPT_NAME` がない場合と親ディレクトリがルートの場合は空文字列を返します。
    pub fn resolve(&self) -> String {
        let script_name = self
            .server_params
            .iter()
            .find(|(name, _)| name == SCRIPT_NAME)
            .map(|(_, value)| value.as_str())
            .unwrap_or("");
        let uri = Uri::parse_lossy(script_name);
        let dir = dirname(uri.path());
        if dir == "/" {
            return String::new();
        }
        dir.to_string()
    }
}

/// 親ディレクトリを返す
///
/// スラッシュを含まない場合は `.`、ルートの場合は `/` になります。
fn dirname(path: &str) -> &str {
    if path.is_empty() {
        return "";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(pos) => {
            let parent = trimmed[..pos].trim_end_matches('/');
            if parent.is_empty() { "/" } else { parent }
        }
        None => ".",
    }
}
