//! URI パス
//!
//! ## 概要
//!
//! パス文字列を `/` 区切りのセグメント列として扱うイミュータブルな値です。
//! 先頭・末尾・連続した `/` が作る空セグメントもそのまま保持するため、
//! `segments()` を `with_segments()` に戻すと元のパスに一致します。
//!
//! セグメントのインデックスは 1 から始まります。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::UriPath;
//!
//! let path = UriPath::new("/foo/bar/?page=2");
//! assert_eq!(path.get(), "/foo/bar/");
//! assert_eq!(path.segments(), ["", "foo", "bar", ""]);
//! assert_eq!(path.segment(2), Some("foo"));
//!
//! let path = path.prepend_segment("en", 2).delete_segment(4);
//! assert_eq!(path.get(), "/en/foo/");
//! ```

use core::fmt;

use crate::uri::{percent_decode_lossy, percent_encode};

/// URI パス
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UriPath {
    path: String,
    segments: Vec<String>,
}

impl UriPath {
    /// パスを作成
    ///
    /// 最初の `?` 以降は捨てます。`#` 以降はそのまま残ります。
    pub fn new(path: &str) -> Self {
        let path = match path.split_once('?') {
            Some((path, _)) => path,
            None => path,
        };
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').map(str::to_string).collect()
        };

        Self {
            path: path.to_string(),
            segments,
        }
    }

    /// 指定したパスで新しい UriPath を作成
    pub fn with_path(&self, path: &str) -> Self {
        Self::new(path)
    }

    /// パス文字列を取得
    pub fn get(&self) -> &str {
        &self.path
    }

    /// 先頭から `prefix` を取り除く
    ///
    /// 先頭が一致しない場合は同じパスを返します。
    ///
    /// ```rust
    /// use shiguredo_uri::UriPath;
    ///
    /// assert_eq!(UriPath::new("/foo/bar").sub("/foo/").get(), "bar");
    /// assert_eq!(UriPath::new("/foo").sub("foo").get(), "/foo");
    /// ```
    pub fn sub(&self, prefix: &str) -> Self {
        match self.path.strip_prefix(prefix) {
            Some(rest) => Self::new(rest),
            None => self.clone(),
        }
    }

    /// パス全体をパーセントデコード
    ///
    /// 不正な `%` シーケンスはそのまま残ります。
    pub fn decode(&self) -> Self {
        Self::new(&percent_decode_lossy(&self.path))
    }

    /// セグメントごとにパーセントエンコード
    ///
    /// 区切りの `/` はエンコードされません。
    pub fn encode(&self) -> Self {
        self.with_segments(self.segments.iter().map(|s| percent_encode(s)))
    }

    /// セグメント列を `/` で連結した新しい UriPath を作成
    ///
    /// ```rust
    /// use shiguredo_uri::UriPath;
    ///
    /// let path = UriPath::default().with_segments(["", "path", "to", ""]);
    /// assert_eq!(path.get(), "/path/to/");
    /// ```
    pub fn with_segments<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = String::new();
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                path.push('/');
            }
            path.push_str(segment.as_ref());
        }
        Self::new(&path)
    }

    /// すべてのセグメントを取得
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 1 始まりのインデックスでセグメントを取得
    ///
    /// 0 や範囲外のインデックスは `None` を返します。
    pub fn segment(&self, index: usize) -> Option<&str> {
        let position = to_position(index)?;
        self.segments.get(position).map(String::as_str)
    }

    /// セグメントを取得し、存在しない場合は `default` を返す
    pub fn segment_or<'a>(&'a self, index: usize, default: &'a str) -> &'a str {
        self.segment(index).unwrap_or(default)
    }

    /// 指定したセグメントの直前に挿入
    ///
    /// そのインデックスにセグメントが存在しない場合は何もしません。
    pub fn prepend_segment(&self, segment: &str, index: usize) -> Self {
        match self.existing_position(index) {
            Some(position) => self.insert_at(position, segment),
            None => self.clone(),
        }
    }

    /// 指定したセグメントの直後に挿入
    ///
    /// そのインデックスにセグメントが存在しない場合は何もしません。
    pub fn append_segment(&self, segment: &str, index: usize) -> Self {
        match self.existing_position(index) {
            Some(position) => self.insert_at(position + 1, segment),
            None => self.clone(),
        }
    }

    /// セグメントを削除し、後続のセグメントを詰める
    ///
    /// そのインデックスにセグメントが存在しない場合は何もしません。
    pub fn delete_segment(&self, index: usize) -> Self {
        match self.existing_position(index) {
            Some(position) => {
                let mut segments = self.segments.clone();
                segments.remove(position);
                self.with_segments(segments)
            }
            None => self.clone(),
        }
    }

    fn existing_position(&self, index: usize) -> Option<usize> {
        to_position(index).filter(|&position| position < self.segments.len())
    }

    fn insert_at(&self, position: usize, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.insert(position, segment.to_string());
        self.with_segments(segments)
    }
}

/// 1 始まりのインデックスを内部の 0 始まりの位置に変換
fn to_position(index: usize) -> Option<usize> {
    index.checked_sub(1)
}

impl fmt::Display for UriPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&str> for UriPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for UriPath {
    fn from(path: String) -> Self {
        Self::new(&path)
    }
}

impl AsRef<str> for UriPath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}
