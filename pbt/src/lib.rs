//! PBT テスト共通ユーティリティ

use std::collections::BTreeMap;

use proptest::prelude::*;

// ========================================
// パス生成
// ========================================

/// パスセグメント (`/` と `?` を含まない)
pub fn path_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._~-]{0,12}".prop_map(|s| s)
}

/// 任意のパス文字列 (先頭・末尾の `/` や空セグメントを含む)
pub fn path_string() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        proptest::collection::vec(path_segment(), 0..=5),
        any::<bool>(),
    )
        .prop_map(|(leading, segments, trailing)| {
            let mut path = segments.join("/");
            if leading {
                path.insert(0, '/');
            }
            if trailing {
                path.push('/');
            }
            path
        })
}

// ========================================
// クエリ生成
// ========================================

/// パラメーター名 (英字で始まり、ブラケットや `.` を含まない)
pub fn parameter_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}".prop_map(|s| s)
}

/// パラメーター値 (エンコード不要な文字のみ)
pub fn parameter_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_~-]{0,8}".prop_map(|s| s)
}

/// 重複しない名前とスカラー値の組
pub fn scalar_parameters() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::btree_map(parameter_name(), parameter_value(), 0..=6)
        .prop_map(|map: BTreeMap<String, String>| map.into_iter().collect())
}

// ========================================
// URL 生成
// ========================================

/// レジストリのキー
pub fn url_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}".prop_map(|s| s)
}

/// スキーム
pub fn scheme() -> impl Strategy<Value = String> {
    prop_oneof![Just("http".to_string()), Just("https".to_string())]
}

/// ホスト名
pub fn hostname() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{1,16}".prop_map(|s| s),
        "[a-z0-9]{1,8}\\.[a-z]{2,4}".prop_map(|s| s),
        "[a-z0-9]{1,8}\\.[a-z0-9]{1,8}\\.[a-z]{2,4}".prop_map(|s| s),
    ]
}

/// ベース URL (末尾の `/` は 0 から 2 個)
pub fn base_url() -> impl Strategy<Value = String> {
    (
        scheme(),
        hostname(),
        proptest::collection::vec("[a-z0-9]{1,8}", 0..=2),
        0usize..=2,
    )
        .prop_map(|(scheme, host, segments, slashes)| {
            let mut url = format!("{}://{}", scheme, host);
            for segment in segments {
                url.push('/');
                url.push_str(&segment);
            }
            url.push_str(&"/".repeat(slashes));
            url
        })
}

/// 相対パス (空でなく、先頭の `/` は 0 または 1 個)
pub fn relative_path() -> impl Strategy<Value = String> {
    (
        0usize..=1,
        proptest::collection::vec("[a-z0-9_-]{1,8}", 1..=3),
        any::<bool>(),
    )
        .prop_map(|(slashes, segments, trailing)| {
            let mut path = "/".repeat(slashes);
            path.push_str(&segments.join("/"));
            if trailing {
                path.push('/');
            }
            path
        })
}
