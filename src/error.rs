//! エラー型の定義

use thiserror::Error;

/// ヘッダーセットのエラー型
#[derive(Error, Debug)]
pub enum Error {
    /// バッキングストアのシリアライズ失敗
    #[error("Failed to encode headers: {0}")]
    EncodeError(String),

    /// バイト列のデコード失敗（壊れた・途中で切れた入力）
    #[error("Failed to decode headers: {0}")]
    DecodeError(String),

    /// 出力先への書き込み失敗
    #[error("Writer error: {0}")]
    WriteError(String),

    /// 外部のヘッダー表現へ変換できない名前・値
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// このクレートで使うResult型
pub type Result<T> = std::result::Result<T, Error>;
