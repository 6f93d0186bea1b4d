//! `http` クレートの型との相互変換

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Version;
use crate::error::{Error, Result};
use crate::headers::HeaderSet;
use crate::store::HeaderStore;

impl<T: HeaderStore> HeaderSet<T> {
    /// `http::HeaderMap` から作成（重複ヘッダーも全て追加する）
    ///
    /// 値はバイト列のまま取り込むため、非ASCIIの値も失われない。
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let mut headers = Self::new();
        for (name, value) in map.iter() {
            headers.add(name.as_str(), value.as_bytes());
        }
        headers
    }

    /// `http::HeaderMap` に変換（ヘッダー名は小文字に正規化される）
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.attribute_count());
        for (name, value) in self.iter() {
            let display = String::from_utf8_lossy(name);
            let header_name = HeaderName::from_bytes(name)
                .map_err(|e| Error::InvalidHeader(format!("{:?}: {}", display, e)))?;
            let header_value = HeaderValue::from_bytes(value)
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", display, e)))?;
            map.append(header_name, header_value);
        }
        Ok(map)
    }

    /// メジャー・マイナーバージョンを `http::Version` で設定
    pub fn set_http_version(&mut self, version: Version) {
        let (major, minor) = match version {
            Version::HTTP_09 => (0, 9),
            Version::HTTP_10 => (1, 0),
            Version::HTTP_2 => (2, 0),
            Version::HTTP_3 => (3, 0),
            _ => (1, 1),
        };
        self.set_major_version(major);
        self.set_minor_version(minor);
    }

    /// 設定済みのバージョンを `http::Version` として取得
    pub fn http_version(&self) -> Option<Version> {
        match (self.major_version()?, self.minor_version().unwrap_or(0)) {
            (0, 9) => Some(Version::HTTP_09),
            (1, 0) => Some(Version::HTTP_10),
            (1, 1) => Some(Version::HTTP_11),
            (2, 0) => Some(Version::HTTP_2),
            (3, 0) => Some(Version::HTTP_3),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::RequestHeaders;

    #[test]
    fn test_http_version_mapping() {
        let mut headers = RequestHeaders::new();
        assert_eq!(headers.http_version(), None);

        headers.set_http_version(Version::HTTP_11);
        assert_eq!(headers.major_version(), Some(1));
        assert_eq!(headers.minor_version(), Some(1));
        assert_eq!(headers.http_version(), Some(Version::HTTP_11));

        headers.set_http_version(Version::HTTP_2);
        assert_eq!(headers.http_version(), Some(Version::HTTP_2));

        headers.set_major_version(4);
        assert_eq!(headers.http_version(), None);
    }

    #[test]
    fn test_major_only_reads_as_minor_zero() {
        let mut headers = RequestHeaders::new();
        headers.set_major_version(1);
        assert_eq!(headers.http_version(), Some(Version::HTTP_10));
    }
}
