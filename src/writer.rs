//! 出力先（シンク）の抽象化

use std::io;
use bytes::BytesMut;
use crate::error::{Error, Result};

/// バイト列の書き込み先
#[cfg_attr(test, mockall::automock)]
pub trait Writer {
    /// データを書き込む。失敗した時点で呼び出し側は処理を打ち切る
    fn write(&mut self, data: &[u8]) -> Result<()>;
}

impl Writer for Vec<u8> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl Writer for BytesMut {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl Writer for String {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::WriteError(format!("non UTF-8 output: {}", e)))?;
        self.push_str(text);
        Ok(())
    }
}

/// `std::io::Write` をWriterとして使うためのアダプター
#[derive(Debug)]
pub struct IoWriter<W> {
    inner: W,
}

impl<W: io::Write> IoWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// 内部のio::Writeを取り出す
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Writer for IoWriter<W> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner
            .write_all(data)
            .map_err(|e| Error::WriteError(e.to_string()))
    }
}
