//! バッキングストア（永続化・バイナリ表現）の抽象化
//!
//! [`HeaderSet`](crate::headers::HeaderSet) はヘッダーの実体をこのトレイト越しに保持し、
//! シリアライズの具体的なライブラリには依存しない。

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// 1組のヘッダー（名前と値）
///
/// どちらも任意のバイト列。文字の妥当性はここでは検査しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: Bytes,
    pub value: Bytes,
}

impl NameValue {
    /// バイト列をコピーして新しいNameValueを作成
    pub fn new(name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Self {
        Self {
            name: Bytes::copy_from_slice(name.as_ref()),
            value: Bytes::copy_from_slice(value.as_ref()),
        }
    }

    /// 既存のBytesからコピーせずに作成
    pub fn from_bytes(name: Bytes, value: Bytes) -> Self {
        Self { name, value }
    }
}

/// ヘッダー列とプロトコルバージョンを保持するバッキングストア
pub trait HeaderStore: Default + Serialize + DeserializeOwned {
    fn major_version(&self) -> Option<i32>;
    fn set_major_version(&mut self, version: Option<i32>);
    fn minor_version(&self) -> Option<i32>;
    fn set_minor_version(&mut self, version: Option<i32>);

    /// ワイヤ順のヘッダー列
    fn headers(&self) -> &[NameValue];

    /// 末尾にヘッダーを追加
    fn add_header(&mut self, header: NameValue);

    /// ヘッダー列を空にし、それまでの内容を返す
    fn take_headers(&mut self) -> Vec<NameValue>;

    /// ヘッダー列を空にする
    fn clear_headers(&mut self) {
        self.take_headers();
    }
}

macro_rules! header_store {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            major_version: Option<i32>,
            minor_version: Option<i32>,
            header: Vec<NameValue>,
        }

        impl HeaderStore for $name {
            fn major_version(&self) -> Option<i32> {
                self.major_version
            }

            fn set_major_version(&mut self, version: Option<i32>) {
                self.major_version = version;
            }

            fn minor_version(&self) -> Option<i32> {
                self.minor_version
            }

            fn set_minor_version(&mut self, version: Option<i32>) {
                self.minor_version = version;
            }

            fn headers(&self) -> &[NameValue] {
                &self.header
            }

            fn add_header(&mut self, header: NameValue) {
                self.header.push(header);
            }

            fn take_headers(&mut self) -> Vec<NameValue> {
                std::mem::take(&mut self.header)
            }
        }
    };
}

header_store!(
    /// リクエストヘッダーのバッキングストア
    HttpRequestHeaders
);

header_store!(
    /// レスポンスヘッダーのバッキングストア
    HttpResponseHeaders
);

/// バッキングストアの構造化シリアライズ方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// postcardによるコンパクトなバイナリ形式
    #[default]
    Binary,
    /// JSON（デバッグや他言語との受け渡し用）
    Json,
}

impl Encoding {
    /// 文字列からEncodingに変換
    pub fn from_str(encoding: &str) -> Option<Self> {
        match encoding.trim().to_ascii_lowercase().as_str() {
            "binary" | "postcard" => Some(Encoding::Binary),
            "json" => Some(Encoding::Json),
            _ => None,
        }
    }

    /// 値をバイト列にエンコード
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            Encoding::Binary => {
                postcard::to_allocvec(value).map_err(|e| Error::EncodeError(e.to_string()))
            }
            Encoding::Json => {
                serde_json::to_vec(value).map_err(|e| Error::EncodeError(e.to_string()))
            }
        }
    }

    /// バイト列から値をデコード
    pub fn decode<T: DeserializeOwned>(&self, buf: &[u8]) -> Result<T> {
        match self {
            Encoding::Binary => {
                postcard::from_bytes(buf).map_err(|e| Error::DecodeError(e.to_string()))
            }
            Encoding::Json => {
                serde_json::from_slice(buf).map_err(|e| Error::DecodeError(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_str() {
        assert_eq!(Encoding::from_str("binary"), Some(Encoding::Binary));
        assert_eq!(Encoding::from_str("Postcard"), Some(Encoding::Binary));
        assert_eq!(Encoding::from_str(" JSON "), Some(Encoding::Json));
        assert_eq!(Encoding::from_str("xml"), None);
    }

    #[test]
    fn test_take_headers_empties_store() {
        let mut store = HttpRequestHeaders::default();
        store.add_header(NameValue::new("Host", "example.com"));
        store.add_header(NameValue::new("Accept", "*/*"));

        let taken = store.take_headers();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0], NameValue::new("Host", "example.com"));
        assert!(store.headers().is_empty());

        store.add_header(NameValue::new("Accept", "*/*"));
        store.clear_headers();
        assert!(store.headers().is_empty());
    }

    #[test]
    fn test_store_roundtrip_both_encodings() {
        let mut store = HttpResponseHeaders::default();
        store.set_major_version(Some(1));
        store.add_header(NameValue::new("Content-Type", "text/html"));

        for encoding in [Encoding::Binary, Encoding::Json] {
            let buf = encoding.encode(&store).unwrap();
            let decoded: HttpResponseHeaders = encoding.decode(&buf).unwrap();
            assert_eq!(decoded, store);
            assert_eq!(decoded.minor_version(), None);
        }
    }

    #[test]
    fn test_non_utf8_values_roundtrip() {
        let mut store = HttpRequestHeaders::default();
        store.add_header(NameValue::new("X-Latin1", b"caf\xe9"));

        for encoding in [Encoding::Binary, Encoding::Json] {
            let buf = encoding.encode(&store).unwrap();
            let decoded: HttpRequestHeaders = encoding.decode(&buf).unwrap();
            assert_eq!(decoded.headers()[0].value, Bytes::from_static(b"caf\xe9"));
        }
    }

    #[test]
    fn test_decode_garbage_is_error() {
        let result: Result<HttpRequestHeaders> = Encoding::Json.decode(b"{not json");
        assert!(matches!(result, Err(Error::DecodeError(_))));
    }
}
