//! URI クエリ
//!
//! ## 概要
//!
//! クエリ文字列と、ネスト可能なパラメーター ([`Parameters`]) を相互に変換する
//! イミュータブルな値です。`name[]=v` (配列) と `name[key]=v` (連想配列) の
//! ブラケット記法に対応します。
//!
//! - 文字列から作成した場合は文字列をそのまま保持し、パラメーターはパースして求めます
//! - パラメーターから作成した場合はパラメーターをそのまま保持し、文字列はシリアライズして求めます
//!
//! シリアライズでは数値キーは常に `[]` になり、値はエンコードされずに出力されます。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::{Parameters, QueryValue, UriQuery};
//!
//! let query = UriQuery::new("arg=value&list[]=foo&list[]=bar");
//! assert_eq!(
//!     query.parameters().get("arg").and_then(QueryValue::as_str),
//!     Some("value")
//! );
//!
//! let query = query.add("page", 2).delete("arg");
//! assert_eq!(query.get(), "list[]=foo&list[]=bar&page=2");
//!
//! let query = UriQuery::from(Parameters::from([("arg", QueryValue::from(["a", "b"]))]));
//! assert_eq!(query.get(), "arg[]=a&arg[]=b");
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::HashMap;

use crate::uri::{form_decode_lossy, percent_decode_lossy, percent_encode};

/// パラメーターの値
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryValue {
    /// 値なし
    ///
    /// シリアライズ時には出力されず、[`UriQuery::modify`] ではキーの削除を意味します。
    Null,
    /// スカラー値
    Scalar(String),
    /// ネストしたパラメーター (配列は `"0"`, `"1"`, ... をキーとするマップ)
    Map(Parameters),
}

impl QueryValue {
    /// スカラー値であれば文字列を取得
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// ネストしたパラメーターであれば取得
    pub fn as_map(&self) -> Option<&Parameters> {
        match self {
            QueryValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// [`QueryValue::Null`] かどうか
    pub fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Scalar(value.clone())
    }
}

/// `true` は `1`、`false` は `0`
impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Scalar(if value { "1" } else { "0" }.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u16, u32, u64, usize);

impl From<Parameters> for QueryValue {
    fn from(value: Parameters) -> Self {
        QueryValue::Map(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::Map(sequence(values))
    }
}

impl<T: Into<QueryValue>, const N: usize> From<[T; N]> for QueryValue {
    fn from(values: [T; N]) -> Self {
        QueryValue::Map(sequence(values))
    }
}

fn sequence<T: Into<QueryValue>>(values: impl IntoIterator<Item = T>) -> Parameters {
    let mut parameters = Parameters::new();
    for value in values {
        parameters.push(value);
    }
    parameters
}

/// 挿入順を保持するパラメーターのマップ
///
/// 既存のキーへの挿入は位置を保ったまま値を置き換えます。
/// [`Parameters::push`] で使う次の数値キーは、これまでに使われた最大の数値キー + 1 で、
/// 削除しても小さくなりません。
#[derive(Clone, Default)]
pub struct Parameters {
    entries: Vec<(String, QueryValue)>,
    /// キーから `entries` の位置への索引
    positions: HashMap<String, usize>,
    next_index: u64,
}

impl Parameters {
    /// 空のパラメーターを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を取得
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// キーが存在するか確認
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// 値を設定し、以前の値を返す
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.push_entry(key, value);
                None
            }
        }
    }

    /// 次の数値キーで値を追加 (`name[]=v` と同じ)
    pub fn push(&mut self, value: impl Into<QueryValue>) {
        let key = self.next_index.to_string();
        self.insert(key, value);
    }

    /// 値を削除
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let i = self.positions.remove(key)?;
        let (_, value) = self.entries.remove(i);
        for (k, _) in &self.entries[i..] {
            if let Some(position) = self.positions.get_mut(k) {
                *position -= 1;
            }
        }
        Some(value)
    }

    /// 要素数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 挿入順にイテレート
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// キーを挿入順に取得
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// 存在しないキーを末尾に追加
    fn push_entry(&mut self, key: String, value: QueryValue) -> usize {
        if let Some(index) = parse_index(&key) {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }
        let i = self.entries.len();
        self.positions.insert(key.clone(), i);
        self.entries.push((key, value));
        i
    }

    /// キーの値をマップとして取得する (マップでなければ空のマップに置き換える)
    fn map_entry(&mut self, key: String) -> &mut Parameters {
        let i = match self.position(&key) {
            Some(i) => i,
            None => self.push_entry(key, QueryValue::Map(Parameters::new())),
        };
        let value = &mut self.entries[i].1;
        if !matches!(value, QueryValue::Map(_)) {
            *value = QueryValue::Map(Parameters::new());
        }
        match value {
            QueryValue::Map(map) => map,
            _ => unreachable!(),
        }
    }
}

// 索引と次の数値キーは比較しない
impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Parameters {}

impl Hash for Parameters {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// 正規形の非負整数キー ("0", "12" など。"01" は含まない)
fn parse_index(key: &str) -> Option<u64> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Parameters::new();
        for (key, value) in iter {
            parameters.insert(key, value);
        }
        parameters
    }
}

impl<K: Into<String>, V: Into<QueryValue>, const N: usize> From<[(K, V); N]> for Parameters {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// URI クエリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UriQuery {
    query: String,
    parameters: Parameters,
}

impl UriQuery {
    /// クエリ文字列から作成
    ///
    /// 文字列はそのまま保持されます。
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            parameters: parse_parameters(query),
        }
    }

    /// パラメーターから作成
    ///
    /// パラメーターはそのまま保持されます。
    pub fn from_parameters(parameters: Parameters) -> Self {
        Self {
            query: build_query(&parameters),
            parameters,
        }
    }

    /// 文字列またはパラメーターで新しい UriQuery を作成
    pub fn with_query(&self, query: impl Into<UriQuery>) -> Self {
        query.into()
    }

    /// クエリ文字列を取得
    pub fn get(&self) -> &str {
        &self.query
    }

    /// パラメーターを取得
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// パラメーターを追加 (既存の場合は上書き)
    pub fn add(&self, name: &str, value: impl Into<QueryValue>) -> Self {
        let mut parameters = self.parameters.clone();
        parameters.insert(name, value);
        Self::from_parameters(parameters)
    }

    /// パラメーターを削除
    ///
    /// 存在しない場合は同じクエリを返します。
    pub fn delete(&self, name: &str) -> Self {
        if !self.parameters.contains_key(name) {
            return self.clone();
        }
        let mut parameters = self.parameters.clone();
        parameters.remove(name);
        Self::from_parameters(parameters)
    }

    /// パラメーターを再帰的にマージ
    ///
    /// 両方がマップの場合は再帰的にマージし、[`QueryValue::Null`] はキーを削除、
    /// それ以外は上書きします。
    ///
    /// ```rust
    /// use shiguredo_uri::{Parameters, QueryValue, UriQuery};
    ///
    /// let query = UriQuery::new("arg=old&arg1[]=foo&arg1[]=bar&gone=1");
    /// let query = query.modify(Parameters::from([
    ///     ("arg", QueryValue::from("new")),
    ///     ("arg1", QueryValue::from(Parameters::from([("1", "new")]))),
    ///     ("gone", QueryValue::Null),
    /// ]));
    /// assert_eq!(query.get(), "arg=new&arg1[]=foo&arg1[]=new");
    /// ```
    pub fn modify(&self, parameters: Parameters) -> Self {
        let mut merged = self.parameters.clone();
        merge_parameters(&mut merged, parameters, 0);
        Self::from_parameters(merged)
    }

    /// クエリ文字列全体をパーセントデコードしてパースし直す
    ///
    /// 不正な `%` シーケンスはそのまま残ります。
    pub fn decode(&self) -> Self {
        Self::new(&percent_decode_lossy(&self.query))
    }

    /// スカラー値をそれぞれパーセントエンコードしてシリアライズし直す
    ///
    /// ネストしたパラメーターはエンコードせずにそのまま残します。
    pub fn encode(&self) -> Self {
        let parameters = self
            .parameters
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    QueryValue::Scalar(s) => QueryValue::Scalar(percent_encode(s)),
                    other => other.clone(),
                };
                (name, value)
            })
            .collect();
        Self::from_parameters(parameters)
    }
}

impl fmt::Display for UriQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

impl From<&str> for UriQuery {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for UriQuery {
    fn from(query: String) -> Self {
        Self::new(&query)
    }
}

impl From<Parameters> for UriQuery {
    fn from(parameters: Parameters) -> Self {
        Self::from_parameters(parameters)
    }
}

/// パラメーター名のブラケットの最大数
///
/// これより深い名前はパース時に捨て、シリアライズでは出力しません。
pub const MAX_NESTING_DEPTH: usize = 64;

/// `depth` は `target` のブラケットの深さ
///
/// 最大深さではマージせずに上書きします。
fn merge_parameters(target: &mut Parameters, changes: Parameters, depth: usize) {
    for (name, value) in changes.entries {
        match value {
            QueryValue::Null => {
                target.remove(&name);
            }
            QueryValue::Map(changes) => {
                if depth < MAX_NESTING_DEPTH
                    && matches!(target.get(&name), Some(QueryValue::Map(_)))
                {
                    merge_parameters(target.map_entry(name), changes, depth + 1);
                } else {
                    target.insert(name, QueryValue::Map(changes));
                }
            }
            value => {
                target.insert(name, value);
            }
        }
    }
}

/// パラメーターをクエリ文字列にシリアライズ
fn build_query(parameters: &Parameters) -> String {
    let mut pairs = Vec::new();
    for (name, value) in parameters.iter() {
        push_pairs(&mut pairs, name.to_string(), value, 0);
    }
    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, prefix: String, value: &QueryValue, depth: usize) {
    match value {
        QueryValue::Null => {}
        QueryValue::Scalar(s) => pairs.push(format!("{}={}", prefix, s)),
        QueryValue::Map(_) if depth >= MAX_NESTING_DEPTH => {}
        QueryValue::Map(map) => {
            for (key, value) in map.iter() {
                // 数値キーは元の番号に関係なく `[]` にする
                let name = if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
                    format!("{}[]", prefix)
                } else {
                    format!("{}[{}]", prefix, key)
                };
                push_pairs(pairs, name, value, depth + 1);
            }
        }
    }
}

/// クエリ文字列をパラメーターにパース
fn parse_parameters(query: &str) -> Parameters {
    let mut parameters = Parameters::new();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = form_decode_lossy(name);
        let value = form_decode_lossy(value);

        let Some((base, keys)) = split_name(&name) else {
            continue;
        };
        insert_nested(&mut parameters, base, &keys, value);
    }

    parameters
}

/// パラメーター名をベース名とブラケット内のキーに分割
///
/// `[]` のキーは `None` になります。
/// ブラケットが [`MAX_NESTING_DEPTH`] を超える名前は `None` を返します。
fn split_name(name: &str) -> Option<(String, Vec<Option<String>>)> {
    let name = name.trim_start_matches(' ');

    let Some(open) = name.find('[') else {
        let base = sanitize_base(name, false);
        return (!base.is_empty()).then_some((base, Vec::new()));
    };

    // 最初の `[` が閉じていなければ名前の一部として扱う
    if !name[open..].contains(']') {
        let base = sanitize_base(name, true);
        return (!base.is_empty()).then_some((base, Vec::new()));
    }

    let base = sanitize_base(&name[..open], false);
    if base.is_empty() {
        return None;
    }

    let mut keys = Vec::new();
    let mut rest = &name[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        let key = &inner[..close];
        keys.push((!key.is_empty()).then(|| key.to_string()));
        if keys.len() > MAX_NESTING_DEPTH {
            return None;
        }
        rest = &inner[close + 1..];
    }

    Some((base, keys))
}

/// ベース名の ` ` と `.` (必要なら `[` も) を `_` に置き換える
fn sanitize_base(base: &str, replace_bracket: bool) -> String {
    base.chars()
        .map(|c| match c {
            ' ' | '.' => '_',
            '[' if replace_bracket => '_',
            c => c,
        })
        .collect()
}

fn insert_nested(target: &mut Parameters, base: String, keys: &[Option<String>], value: String) {
    let mut target = target;
    let mut key = base;
    for next in keys {
        target = target.map_entry(key);
        key = match next {
            Some(next) => next.clone(),
            None => target.next_index.to_string(),
        };
    }
    target.insert(key, QueryValue::Scalar(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(parameters: &Parameters, key: &str) -> Option<String> {
        parameters
            .get(key)
            .and_then(QueryValue::as_str)
            .map(str::to_string)
    }

    #[test]
    fn test_create_from_string() {
        assert_eq!(
            UriQuery::new("arg=value&arg1=value1").get(),
            "arg=value&arg1=value1"
        );
        assert_eq!(
            UriQuery::new("arg=value&arg1[]=1").get(),
            "arg=value&arg1[]=1"
        );
    }

    #[test]
    fn test_create_from_parameters() {
        let query = UriQuery::from(Parameters::from([("arg", "value"), ("arg1", "value1")]));
        assert_eq!(query.get(), "arg=value&arg1=value1");
        assert_eq!(UriQuery::from(Parameters::from([("arg", 5)])).get(), "arg=5");
        let query = UriQuery::from(Parameters::from([
            ("arg", QueryValue::from("value")),
            ("arg1", QueryValue::from(["foo", "bar"])),
        ]));
        assert_eq!(query.get(), "arg=value&arg1[]=foo&arg1[]=bar");
    }

    #[test]
    fn test_parameters_are_kept_verbatim() {
        let sparse = Parameters::from([("3", "c"), ("7", "d")]);
        let parameters = Parameters::from([("list", QueryValue::from(sparse.clone()))]);
        let query = UriQuery::from(parameters.clone());
        assert_eq!(query.get(), "list[]=c&list[]=d");
        assert_eq!(query.parameters(), &parameters);
        assert_eq!(
            query.parameters().get("list").and_then(QueryValue::as_map),
            Some(&sparse)
        );
    }

    #[test]
    fn test_with_query() {
        let query = UriQuery::new("");
        assert_eq!(
            query.with_query("arg=value&arg1=value1").get(),
            "arg=value&arg1=value1"
        );
        assert_eq!(
            query
                .with_query(Parameters::from([("arg", "value"), ("arg1", "value1")]))
                .get(),
            "arg=value&arg1=value1"
        );
    }

    #[test]
    fn test_parse_nested() {
        let parameters = UriQuery::new("a[]=1&a[]=2&b[x][y]=3&c=4").parameters().clone();
        let a = parameters.get("a").and_then(QueryValue::as_map).unwrap();
        assert_eq!(a, &Parameters::from([("0", "1"), ("1", "2")]));
        let b = parameters.get("b").and_then(QueryValue::as_map).unwrap();
        let x = b.get("x").and_then(QueryValue::as_map).unwrap();
        assert_eq!(scalar(x, "y").as_deref(), Some("3"));
        assert_eq!(scalar(&parameters, "c").as_deref(), Some("4"));
    }

    #[test]
    fn test_parse_form_decoding() {
        let parameters = UriQuery::new("a=foo+bar%21&b%5B%5D=1&novalue&=skipped&&")
            .parameters()
            .clone();
        assert_eq!(scalar(&parameters, "a").as_deref(), Some("foo bar!"));
        assert_eq!(
            parameters.get("b"),
            Some(&QueryValue::from(Parameters::from([("0", "1")])))
        );
        assert_eq!(scalar(&parameters, "novalue").as_deref(), Some(""));
        assert_eq!(parameters.len(), 3);
    }

    #[test]
    fn test_parse_name_normalization() {
        let parameters = UriQuery::new("a.b=1&c d=2&e[f=3& g=4&h[x]junk=5")
            .parameters()
            .clone();
        assert_eq!(
            parameters.keys().collect::<Vec<_>>(),
            ["a_b", "c_d", "e_f", "g", "h"]
        );
        let h = parameters.get("h").and_then(QueryValue::as_map).unwrap();
        assert_eq!(scalar(h, "x").as_deref(), Some("5"));
    }

    #[test]
    fn test_parse_duplicates_overwrite() {
        let parameters = UriQuery::new("a=1&a=2&b[x]=1&b=3").parameters().clone();
        assert_eq!(scalar(&parameters, "a").as_deref(), Some("2"));
        assert_eq!(scalar(&parameters, "b").as_deref(), Some("3"));

        let parameters = UriQuery::new("a=1&a[]=2").parameters().clone();
        assert_eq!(
            parameters.get("a"),
            Some(&QueryValue::from(Parameters::from([("0", "2")])))
        );
    }

    #[test]
    fn test_parse_append_after_explicit_index() {
        let parameters = UriQuery::new("a[5]=x&a[]=y").parameters().clone();
        assert_eq!(
            parameters.get("a"),
            Some(&QueryValue::from(Parameters::from([("5", "x"), ("6", "y")])))
        );
    }

    #[test]
    fn test_add() {
        let query = UriQuery::new("arg=value&arg1=value1");
        assert_eq!(query.add("foo", "1").get(), "arg=value&arg1=value1&foo=1");
        assert_eq!(
            query.add("foo", "").add("bar", "1").get(),
            "arg=value&arg1=value1&foo=&bar=1"
        );
        assert_eq!(query.add("arg", "new").get(), "arg=new&arg1=value1");
        assert_eq!(query.add("flag", true).get(), "arg=value&arg1=value1&flag=1");
        // 元の値は変更されない
        assert_eq!(query.get(), "arg=value&arg1=value1");
    }

    #[test]
    fn test_delete() {
        let query = UriQuery::new("arg=value&arg1=value1");
        assert_eq!(query.delete("arg").get(), "arg1=value1");
        assert_eq!(query.delete("invalid").get(), "arg=value&arg1=value1");
        assert_eq!(query.delete("invalid"), query);
    }

    #[test]
    fn test_modify() {
        let query = UriQuery::new("arg=value&arg1=value1");
        assert_eq!(
            query
                .modify(Parameters::from([("arg", "new"), ("foo", "1")]))
                .get(),
            "arg=new&arg1=value1&foo=1"
        );

        let query = UriQuery::new("arg=old&arg1[]=foo&arg1[]=bar");
        let changes = Parameters::from([
            ("arg", QueryValue::from("new")),
            ("arg1", QueryValue::from(Parameters::from([("1", "new")]))),
        ]);
        assert_eq!(query.modify(changes).get(), "arg=new&arg1[]=foo&arg1[]=new");
    }

    #[test]
    fn test_modify_null_removes() {
        let query = UriQuery::new("a=1&b[x]=1&b[y]=2");
        let changes = Parameters::from([
            ("a", QueryValue::Null),
            ("b", QueryValue::from(Parameters::from([("x", QueryValue::Null)]))),
            ("missing", QueryValue::Null),
        ]);
        let modified = query.modify(changes);
        assert_eq!(modified.get(), "b[y]=2");
        assert!(!modified.parameters().contains_key("missing"));
    }

    #[test]
    fn test_modify_map_replaces_scalar() {
        let query = UriQuery::new("a=1");
        let modified = query.modify(Parameters::from([("a", QueryValue::from(["x"]))]));
        assert_eq!(modified.get(), "a[]=x");
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            UriQuery::new("arg=foo%20bar&arg1=value1&foo=1").decode().get(),
            "arg=foo bar&arg1=value1&foo=1"
        );
        assert_eq!(UriQuery::new("a=100%").decode().get(), "a=100%");
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            UriQuery::new("arg=foo bar&arg1=value1&foo=1").encode().get(),
            "arg=foo%20bar&arg1=value1&foo=1"
        );
    }

    #[test]
    fn test_encode_leaves_nested_values_unencoded() {
        let query = UriQuery::new("a=x y&list[]=p q");
        let encoded = query.encode();
        assert_eq!(encoded.get(), "a=x%20y&list[]=p q");
        assert_eq!(encoded.parameters().get("list"), query.parameters().get("list"));
    }

    #[test]
    fn test_serialize_skips_null_and_empty_map() {
        let parameters = Parameters::from([
            ("a", QueryValue::Null),
            ("b", QueryValue::from(Parameters::new())),
            ("c", QueryValue::from(Some("1"))),
            ("d", QueryValue::from(None::<&str>)),
        ]);
        assert_eq!(UriQuery::from(parameters).get(), "c=1");
    }

    #[test]
    fn test_parameters_push_and_insert() {
        let mut parameters = Parameters::new();
        parameters.push("a");
        parameters.insert("10", "b");
        parameters.push("c");
        assert_eq!(parameters.keys().collect::<Vec<_>>(), ["0", "10", "11"]);
        assert_eq!(parameters.insert("0", "z"), Some(QueryValue::from("a")));
        assert_eq!(parameters.keys().next(), Some("0"));
        assert_eq!(parameters.remove("10"), Some(QueryValue::from("b")));
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters.get("11"), Some(&QueryValue::from("c")));

        // 削除しても次の数値キーは小さくならない
        assert_eq!(parameters.remove("11"), Some(QueryValue::from("c")));
        parameters.push("d");
        assert_eq!(parameters.keys().collect::<Vec<_>>(), ["0", "12"]);
        assert_eq!(parameters.get("12"), Some(&QueryValue::from("d")));
    }

    #[test]
    fn test_parameters_equality_ignores_next_index() {
        let mut a = Parameters::new();
        a.push("x");
        a.push("y");
        a.remove("1");
        let b = Parameters::from([("0", "x")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_large_sequence() {
        let count = 50_000;
        let query = (0..count)
            .map(|i| format!("a[]={}", i))
            .collect::<Vec<_>>()
            .join("&");
        let query = UriQuery::new(&query);
        let list = query
            .parameters()
            .get("a")
            .and_then(QueryValue::as_map)
            .unwrap();
        assert_eq!(list.len(), count);
        assert_eq!(scalar(list, "0").as_deref(), Some("0"));
        assert_eq!(scalar(list, "49999").as_deref(), Some("49999"));
        assert_eq!(list.keys().last(), Some("49999"));
    }

    #[test]
    fn test_parse_many_keys() {
        let query = (0..20_000)
            .map(|i| format!("k{}={}", i, i))
            .collect::<Vec<_>>()
            .join("&");
        let query = UriQuery::new(&query);
        assert_eq!(query.parameters().len(), 20_000);
        assert_eq!(scalar(query.parameters(), "k19999").as_deref(), Some("19999"));
    }

    fn nested_value(depth: usize, leaf: &str) -> QueryValue {
        let mut value = QueryValue::from(leaf);
        for _ in 0..depth {
            value = QueryValue::from(Parameters::from([("x", value)]));
        }
        value
    }

    #[test]
    fn test_deep_nesting_is_dropped() {
        let deep = format!("a{}=1", "[x]".repeat(20_000));
        let query = UriQuery::new(&deep);
        assert_eq!(query.get(), deep);
        assert!(query.parameters().is_empty());

        let query = UriQuery::new(&format!("b=1&{}&c[]=2", deep));
        assert_eq!(query.parameters().keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn test_nesting_depth_limit() {
        let limit = UriQuery::new(&format!("a{}=1", "[x]".repeat(MAX_NESTING_DEPTH)));
        assert_eq!(
            limit.parameters().get("a"),
            Some(&nested_value(MAX_NESTING_DEPTH, "1"))
        );
        assert_eq!(UriQuery::from_parameters(limit.parameters().clone()).get(), limit.get());

        let over = UriQuery::new(&format!("a{}=1", "[x]".repeat(MAX_NESTING_DEPTH + 1)));
        assert!(over.parameters().is_empty());
    }

    #[test]
    fn test_serialize_deep_parameters() {
        let parameters = Parameters::from([
            ("a", nested_value(200, "1")),
            ("b", QueryValue::from("2")),
        ]);
        let query = UriQuery::from(parameters.clone());
        assert_eq!(query.get(), "b=2");
        assert_eq!(query.parameters(), &parameters);
    }

    #[test]
    fn test_modify_deep_parameters() {
        let query = UriQuery::from(Parameters::from([("a", nested_value(200, "1"))]));
        let changes = nested_value(200, "2");
        let modified = query.modify(Parameters::from([("a", changes.clone())]));
        assert_eq!(modified.parameters().get("a"), Some(&changes));
    }
}
