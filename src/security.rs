//! Security Module
//!
//! 入力ファイルの読み込み時に適用するサイズ制限を提供するモジュール。

use std::io::Read;

use crate::error::LeadSheetError;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 入力を上限付きでメモリに読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 読み込んだバイト列
    /// * `Err(LeadSheetError::SecurityViolation)` - 上限を超えた場合
    /// * `Err(LeadSheetError::Io)` - 読み込みに失敗した場合
    pub fn read_input<R: Read>(&self, reader: R) -> Result<Vec<u8>, LeadSheetError> {
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(LeadSheetError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}
