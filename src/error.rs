//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// leadsheetクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、解析、JSON書き込みのいずれで失敗しても、
/// 呼び出し側から見れば「抽出に失敗した」という一種類の失敗です。
/// バリアントは診断メッセージを組み立てるためだけに分かれています。
///
/// # 使用例
///
/// ```rust,no_run
/// use leadsheet::LeadSheetError;
/// use std::fs::File;
///
/// fn open_sheet(path: &str) -> Result<File, LeadSheetError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum LeadSheetError {
    /// I/O操作中に発生したエラー
    ///
    /// 入力ファイルが存在しない、出力先に書き込めない、などの場合。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONシリアライズ中に発生したエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に検出されます。
    /// 例えば、カスタム日付形式が不正な場合や、パスが空の場合です。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 指定されたシートが見つからない
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// ワークブックにシートが一つも含まれていない
    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: LeadSheetError = io_err.into();

        match error {
            LeadSheetError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LeadSheetError = io_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("Permission denied"));
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: LeadSheetError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.starts_with("Failed to parse spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: LeadSheetError = json_err.into();

        assert!(matches!(error, LeadSheetError::Json(_)));
        assert!(error.to_string().starts_with("JSON serialization error"));
    }

    #[test]
    fn test_sheet_not_found_display() {
        let error = LeadSheetError::SheetNotFound("Base_Clientes_CRM".to_string());
        assert_eq!(error.to_string(), "Sheet not found: Base_Clientes_CRM");
    }

    // ?演算子の動作確認
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), LeadSheetError> {
            let _file = std::fs::File::open("nonexistent_leads.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(LeadSheetError::Io(_)) => {}
            other => panic!("Expected Io error from ? operator, got {:?}", other),
        }
    }

    #[test]
    fn test_all_error_formats() {
        assert!(LeadSheetError::Config("x".to_string())
            .to_string()
            .starts_with("Configuration error"));
        assert!(LeadSheetError::SecurityViolation("x".to_string())
            .to_string()
            .starts_with("Security violation"));
        assert_eq!(
            LeadSheetError::EmptyWorkbook.to_string(),
            "Workbook contains no sheets"
        );
    }
}
