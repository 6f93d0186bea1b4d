//! ヘッダーセット本体
//!
//! ワイヤ順を保持するヘッダー列（唯一の正）と、そこから遅延構築される
//! 大文字小文字無視のインデックスの二重表現を扱う。
//!
//! - インデックスは参照系の操作で初めて構築される（[`HeaderSet::lookup`] など）
//! - 構築済みのインデックスは `add` で差分更新され、構造が変わる操作では破棄される
//! - `lookup` の戻り値はヘッダー列を借用するため、保持している間は変更できない
//!
//! 名前と値は任意のバイト列として扱い、文字の妥当性は検査しない。

pub mod comma;
mod index;

use std::cell::OnceCell;
use std::collections::HashSet;
use std::fmt;
use bytes::Bytes;
use log::{debug, warn};
use crate::config::Config;
use crate::error::Result;
use crate::store::{Encoding, HeaderStore, HttpRequestHeaders, HttpResponseHeaders, NameValue};
use crate::writer::Writer;
use self::index::{fold_name, NameIndex};

pub use comma::CommaFields;

/// リクエストヘッダー
pub type RequestHeaders = HeaderSet<HttpRequestHeaders>;

/// レスポンスヘッダー
pub type ResponseHeaders = HeaderSet<HttpResponseHeaders>;

/// 順序付きヘッダー列と遅延インデックスを持つコンテナ
///
/// 1インスタンスは単一スレッドで使う前提。参照系の操作でもインデックスを
/// 書き換えるため `Sync` ではない。
#[derive(Debug, Clone)]
pub struct HeaderSet<T: HeaderStore> {
    store: T,
    index: OnceCell<NameIndex>,
    comma_fields: CommaFields,
    encoding: Encoding,
}

impl<T: HeaderStore> Default for HeaderSet<T> {
    fn default() -> Self {
        Self::with_comma_fields(CommaFields::default())
    }
}

impl<T: HeaderStore> HeaderSet<T> {
    /// 空のヘッダーセットを作成（バージョン未設定、ヘッダーなし）
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定から作成
    pub fn with_config(config: &Config) -> Self {
        let mut headers = Self::with_comma_fields(config.comma_fields());
        headers.encoding = config.encoding;
        headers
    }

    /// 分割対象のヘッダー名を指定して作成
    pub fn with_comma_fields(comma_fields: CommaFields) -> Self {
        Self {
            store: T::default(),
            index: OnceCell::new(),
            comma_fields,
            encoding: Encoding::default(),
        }
    }

    /// バージョンとヘッダーを全て消し、インデックスを破棄する
    pub fn clear(&mut self) {
        self.store = T::default();
        self.index = OnceCell::new();
    }

    pub fn major_version(&self) -> Option<i32> {
        self.store.major_version()
    }

    pub fn has_major_version(&self) -> bool {
        self.store.major_version().is_some()
    }

    pub fn set_major_version(&mut self, version: i32) {
        self.store.set_major_version(Some(version));
    }

    pub fn clear_major_version(&mut self) {
        self.store.set_major_version(None);
    }

    pub fn minor_version(&self) -> Option<i32> {
        self.store.minor_version()
    }

    pub fn has_minor_version(&self) -> bool {
        self.store.minor_version().is_some()
    }

    pub fn set_minor_version(&mut self, version: i32) {
        self.store.set_minor_version(Some(version));
    }

    pub fn clear_minor_version(&mut self) {
        self.store.set_minor_version(None);
    }

    /// ヘッダー数（重複も数える。カンマ分割前の件数）
    pub fn attribute_count(&self) -> usize {
        self.store.headers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.headers().is_empty()
    }

    /// i番目のヘッダー名。範囲外はpanic
    pub fn name_at(&self, i: usize) -> &[u8] {
        &self.store.headers()[i].name
    }

    /// i番目のヘッダー値。範囲外はpanic
    pub fn value_at(&self, i: usize) -> &[u8] {
        &self.store.headers()[i].value
    }

    /// ヘッダーをワイヤ順に走査
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.store
            .headers()
            .iter()
            .map(|h| (h.name.as_ref(), h.value.as_ref()))
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    pub fn comma_fields(&self) -> &CommaFields {
        &self.comma_fields
    }

    /// 分割対象を差し替える。インデックスは次の参照時に作り直す
    pub fn set_comma_fields(&mut self, comma_fields: CommaFields) {
        self.comma_fields = comma_fields;
        self.index = OnceCell::new();
    }

    /// 値をカンマで分割してインデックスに載せるヘッダーか
    pub fn is_comma_separated_field(&self, name: impl AsRef<[u8]>) -> bool {
        self.comma_fields.contains(name)
    }

    fn populate_index(&self) -> &NameIndex {
        self.index.get_or_init(|| {
            debug!("Building header index for {} entries", self.attribute_count());
            NameIndex::build(self.store.headers(), &self.comma_fields)
        })
    }

    /// 異なるヘッダー名の数（大文字小文字は区別しない）
    pub fn attribute_name_count(&self) -> usize {
        self.populate_index().name_count()
    }

    /// 名前に一致する値を `values` の末尾に追加する。見つからなければfalse
    pub fn lookup_into<'a>(&'a self, name: impl AsRef<[u8]>, values: &mut Vec<&'a [u8]>) -> bool {
        let headers = self.store.headers();
        match self.populate_index().get(name.as_ref()) {
            Some(refs) => {
                values.extend(refs.iter().map(|r| r.resolve(headers)));
                true
            }
            None => false,
        }
    }

    /// 名前に一致する値を挿入順に返す
    pub fn lookup(&self, name: impl AsRef<[u8]>) -> Option<Vec<&[u8]>> {
        let mut values = Vec::new();
        if self.lookup_into(name, &mut values) {
            Some(values)
        } else {
            None
        }
    }

    /// 値がちょうど1つの場合だけ返す
    pub fn lookup1(&self, name: impl AsRef<[u8]>) -> Option<&[u8]> {
        match self.lookup(name) {
            Some(values) if values.len() == 1 => Some(values[0]),
            _ => None,
        }
    }

    pub fn has(&self, name: impl AsRef<[u8]>) -> bool {
        self.populate_index().get(name.as_ref()).is_some()
    }

    /// ヘッダーを末尾に追加。インデックス構築済みなら差分で反映する
    pub fn add(&mut self, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
        self.add_header(NameValue::new(name, value));
    }

    /// Bytesをコピーせずに追加
    pub fn add_bytes(&mut self, name: Bytes, value: Bytes) {
        self.add_header(NameValue::from_bytes(name, value));
    }

    fn add_header(&mut self, header: NameValue) {
        let position = self.store.headers().len();
        if let Some(index) = self.index.get_mut() {
            index.insert(position, &header, &self.comma_fields);
        }
        self.store.add_header(header);
    }

    /// 名前に一致するヘッダーを全て削除。存在しなければ何もせずfalse
    ///
    /// ヘッダー列は削除後のインデックスから作り直すため、他のカンマ区切り
    /// ヘッダー（`Vary: a, b` など）は値ごとに別々のヘッダーへ展開される。
    /// 作り直したヘッダーの名前は、同じ名前で最初に追加された時の綴りに揃う
    /// （`Vary` の後に `vary` があれば両方 `Vary` になる）。
    pub fn remove_all(&mut self, name: impl AsRef<[u8]>) -> bool {
        let name = name.as_ref();
        self.populate_index();
        let Some(mut index) = self.index.take() else {
            return false;
        };
        if !index.remove_all(name) {
            self.index = OnceCell::from(index);
            return false;
        }

        let old = self.store.take_headers();
        debug!(
            "Removed header {:?}; rebuilding {} entries from index",
            String::from_utf8_lossy(name),
            index.values().count()
        );
        for (canonical, value) in index.values() {
            let piece = old[value.entry].value.slice(value.range.clone());
            self.store
                .add_header(NameValue::from_bytes(canonical.clone(), piece));
        }
        // 旧ヘッダー列を指すインデックスはここで捨てる
        true
    }

    /// 集合に含まれる名前のヘッダーを全て削除（残りの順序は保持）
    ///
    /// 名前の比較は他の操作と同じく大文字小文字を区別しない。
    /// `["Content-Type"]` を渡すと `content-type` も削除される。
    pub fn remove_all_from_set<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let names: HashSet<Vec<u8>> = names
            .into_iter()
            .map(|n| fold_name(n.as_ref()))
            .collect();
        if names.is_empty() {
            return;
        }

        let kept: Vec<NameValue> = self
            .store
            .take_headers()
            .into_iter()
            .filter(|h| !names.contains(&fold_name(&h.name)))
            .collect();
        self.index = OnceCell::new();
        for header in kept {
            self.store.add_header(header);
        }
    }

    /// 既存の値を全て消し、1つの値を末尾に追加する
    pub fn replace(&mut self, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
        self.remove_all(name.as_ref());
        self.add(name, value);
    }

    /// `other` に含まれる名前を全て `other` の値で置き換える
    ///
    /// 削除は [`remove_all_from_set`](Self::remove_all_from_set) と同じく大文字小文字を区別しない。
    pub fn update_from(&mut self, other: &HeaderSet<T>) {
        self.remove_all_from_set(other.iter().map(|(name, _)| name));
        for header in other.store.headers() {
            self.add_header(header.clone());
        }
    }

    /// バージョンとヘッダーをバッキングストアの形式でエンコードして書き出す
    pub fn write_as_binary(&self, writer: &mut dyn Writer) -> Result<()> {
        let buf = self.encoding.encode(&self.store)?;
        writer.write(&buf)
    }

    /// 内容を消してからバイト列を読み込む。失敗時は空のまま
    pub fn read_from_binary(&mut self, buf: &[u8]) -> Result<()> {
        self.clear();
        match self.encoding.decode::<T>(buf) {
            Ok(store) => {
                self.store = store;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to read headers from {} bytes: {}", buf.len(), e);
                Err(e)
            }
        }
    }

    /// `Name: Value\r\n` の並びと空行を書き出す。失敗した時点で打ち切る
    pub fn write_as_http(&self, writer: &mut dyn Writer) -> Result<()> {
        for (name, value) in self.iter() {
            writer.write(name)?;
            writer.write(b": ")?;
            writer.write(value)?;
            writer.write(b"\r\n")?;
        }
        writer.write(b"\r\n")
    }
}

/// 非UTF-8のバイトは置換文字で表示する
impl<T: HeaderStore> fmt::Display for HeaderSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(
                f,
                "{}: {}\r\n",
                String::from_utf8_lossy(name),
                String::from_utf8_lossy(value)
            )?;
        }
        write!(f, "\r\n")
    }
}
