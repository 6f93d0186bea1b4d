//! 設定（環境変数・JSON）

use std::env;
use log::warn;
use serde::Deserialize;
use crate::error::{Error, Result};
use crate::headers::CommaFields;
use crate::store::Encoding;

/// 分割対象のヘッダー名（カンマ区切り）を指定する環境変数
pub const COMMA_FIELDS_ENV: &str = "HEADERSET_COMMA_FIELDS";

/// バイナリ表現のエンコーディング（`binary` / `json`）を指定する環境変数
pub const ENCODING_ENV: &str = "HEADERSET_ENCODING";

/// ヘッダーセットの設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// インデックス上でカンマ分割するヘッダー名
    pub comma_fields: Vec<String>,
    /// `write_as_binary` / `read_from_binary` で使う形式
    pub encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comma_fields: CommaFields::default().iter().map(str::to_string).collect(),
            encoding: Encoding::default(),
        }
    }
}

impl Config {
    /// 環境変数から設定を読み込む
    /// 未設定の項目はデフォルト値を使う
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(fields) = env::var(COMMA_FIELDS_ENV) {
            config.comma_fields = fields
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(value) = env::var(ENCODING_ENV) {
            match Encoding::from_str(&value) {
                Some(encoding) => config.encoding = encoding,
                None => warn!(
                    "Unknown {} value {:?}; falling back to {:?}",
                    ENCODING_ENV, value, config.encoding
                ),
            }
        }

        config
    }

    /// JSON文字列から設定を読み込む
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigurationError(e.to_string()))
    }

    pub fn comma_fields(&self) -> CommaFields {
        CommaFields::from_names(&self.comma_fields)
    }
}
