//! Output Module
//!
//! レコード列をJSON配列として書き出すモジュール。
//!
//! - インデントは半角スペース2つ
//! - 非ASCII文字はエスケープせずUTF-8のまま出力
//! - 末尾に改行は付けない

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::LeadSheetError;
use crate::types::LeadRecord;

/// JSONのインデント
const JSON_INDENT: &[u8] = b"  ";

/// レコード列をJSON配列として書き出す
pub(crate) fn write_records<W: Write>(
    writer: &mut W,
    records: &[LeadRecord],
) -> Result<(), LeadSheetError> {
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = Serializer::with_formatter(&mut *writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// レコード列をファイルに書き出す（既存ファイルは上書き）
///
/// 親ディレクトリは作成しません。
pub(crate) fn write_records_to_path(
    path: &Path,
    records: &[LeadRecord],
) -> Result<(), LeadSheetError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records)?;
    tracing::debug!(path = %path.display(), records = records.len(), "wrote JSON output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> LeadRecord {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn render(records: &[LeadRecord]) -> String {
        let mut out = Vec::new();
        write_records(&mut out, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(render(&[]), "[]");
    }

    #[test]
    fn test_indent_and_unescaped_unicode() {
        let records = vec![record(json!({"Razão Social": "Padaria São João", "Valor": null}))];
        let expected = "[\n  {\n    \"Razão Social\": \"Padaria São João\",\n    \"Valor\": null\n  }\n]";
        assert_eq!(render(&records), expected);
    }

    #[test]
    fn test_float_and_integer_rendering() {
        let records = vec![record(json!({"a": 5, "b": 5.0, "c": 0.1}))];
        let text = render(&records);
        assert!(text.contains("\"a\": 5,"));
        assert!(text.contains("\"b\": 5.0,"));
        assert!(text.contains("\"c\": 0.1\n"));
    }

    #[test]
    fn test_write_records_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        let records = vec![record(json!({"Nome": "Ana"}))];

        write_records_to_path(&path, &records).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  {\n    \"Nome\": \"Ana\"\n  }\n]");
    }

    #[test]
    fn test_write_records_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("leads.json");
        let result = write_records_to_path(&path, &[]);
        assert!(matches!(result, Err(LeadSheetError::Io(_))));
    }
}
