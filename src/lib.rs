//! headerset: ワイヤ順を保持するHTTPヘッダーコンテナ
//!
//! 順序付きのヘッダー列を唯一の正とし、大文字小文字を無視した複数値インデックスを
//! 必要になった時点で構築する。`Vary` のようなカンマ区切りヘッダーはインデックス上で
//! 値ごとに分割される。
//!
//! バイナリ表現（postcard / JSON）とHTTPのテキスト表現への書き出しに対応する。
//!
//! ```
//! use headerset::ResponseHeaders;
//!
//! let mut headers = ResponseHeaders::new();
//! headers.add("Content-Type", "text/html");
//! headers.add("Vary", "Accept-Encoding, Cookie");
//!
//! assert_eq!(
//!     headers.lookup("vary"),
//!     Some(vec![&b"Accept-Encoding"[..], &b"Cookie"[..]])
//! );
//!
//! let mut out = Vec::new();
//! headers.write_as_http(&mut out).unwrap();
//! assert_eq!(out, b"Content-Type: text/html\r\nVary: Accept-Encoding, Cookie\r\n\r\n");
//! ```

pub mod config;
pub mod error;
pub mod headers;
pub mod interop;
pub mod store;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use headers::{CommaFields, HeaderSet, RequestHeaders, ResponseHeaders};
pub use store::{Encoding, HeaderStore, HttpRequestHeaders, HttpResponseHeaders, NameValue};
pub use writer::{IoWriter, Writer};
