//! カンマ区切りで複数値を持つヘッダーの判定と分割

use std::ops::Range;

/// インデックス上で値を分割するヘッダー名の集合（大文字小文字を区別しない）
///
/// 既定では `Vary` のみ。分割してはいけないヘッダー（`Set-Cookie` など）もあるため、
/// 対象は明示的に登録したものに限る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommaFields {
    names: Vec<String>,
}

impl Default for CommaFields {
    fn default() -> Self {
        Self {
            names: vec!["Vary".to_string()],
        }
    }
}

impl CommaFields {
    /// 何も分割しないポリシー
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// 指定した名前だけを分割対象とするポリシー
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::empty();
        for name in names {
            fields.insert(name.as_ref());
        }
        fields
    }

    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        let name = name.as_ref();
        self.names.iter().any(|n| n.as_bytes().eq_ignore_ascii_case(name))
    }

    /// 分割対象を追加。既に登録済みならfalse
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// 分割対象から外す。登録されていなければfalse
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| !n.eq_ignore_ascii_case(name));
        self.names.len() != before
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }
}

fn is_trim_byte(b: &u8) -> bool {
    b.is_ascii_whitespace() || *b == 0x0B
}

/// 値を `,` で分割し、各要素の前後の空白を除いた範囲（バイトオフセット）を返す
///
/// 空の要素は空白除去の前に捨てる。空白だけの要素は空の範囲として残る。
pub(crate) fn split_ranges(value: &[u8]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut offset = 0;
    for piece in value.split(|b| *b == b',') {
        let start = offset;
        offset += piece.len() + 1;
        if piece.is_empty() {
            continue;
        }
        match piece.iter().position(|b| !is_trim_byte(b)) {
            Some(lead) => {
                let tail = piece.iter().rposition(|b| !is_trim_byte(b)).unwrap_or(lead);
                ranges.push(start + lead..start + tail + 1);
            }
            None => ranges.push(start + piece.len()..start + piece.len()),
        }
    }
    ranges
}
