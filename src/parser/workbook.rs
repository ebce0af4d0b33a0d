//! Workbook Parser
//!
//! calamineを使用したスプレッドシート読み込みの実装。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::{Cursor, Read};

use crate::api::SheetSelector;
use crate::error::LeadSheetError;
use crate::formatter::ValueFormatter;
use crate::security::SecurityConfig;
use crate::table::SheetTable;
use crate::types::CellValue;

/// ワークブックパーサー
///
/// calamineのラッパーとして、シート選択と表データの読み込みを提供します。
/// 形式（xlsx / xlsm / xlsb / xls / ods）はcalamineが自動判別します。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込んでから解析します。
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    /// * `security` - 入力サイズの上限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(LeadSheetError::Parse)` - 形式が不正、または破損している場合
    /// * `Err(LeadSheetError::SecurityViolation)` - サイズ上限を超えた場合
    pub fn open<R: Read>(reader: R, security: &SecurityConfig) -> Result<Self, LeadSheetError> {
        let buffer = security.read_input(reader)?;
        tracing::debug!(bytes = buffer.len(), "read spreadsheet input");

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシート名を決定
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(LeadSheetError::EmptyWorkbook)` - シートが一つもない場合
    /// * `Err(LeadSheetError::SheetNotFound)` - 指定のシートが存在しない場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, LeadSheetError> {
        let names = self.sheet_names();
        if names.is_empty() {
            return Err(LeadSheetError::EmptyWorkbook);
        }

        match selector {
            SheetSelector::First => Ok(names[0].clone()),
            SheetSelector::Index(index) => names.get(*index).cloned().ok_or_else(|| {
                LeadSheetError::SheetNotFound(format!(
                    "index {} is out of range (total: {})",
                    index,
                    names.len()
                ))
            }),
            SheetSelector::Name(name) => {
                if names.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(LeadSheetError::SheetNotFound(format!("'{}'", name)))
                }
            }
        }
    }

    /// シートを読み込み、1行目を見出しとしたテーブルを構築
    ///
    /// calamineの使用範囲は最初の使用セルから始まります。
    /// 先頭の空行は読み飛ばしますが、先頭の空列はA列から空セルで補い、
    /// 列番号（`Unnamed: i`）がシート上の位置と一致するようにします。
    pub fn read_table(
        &mut self,
        sheet_name: &str,
        formatter: &ValueFormatter,
    ) -> Result<SheetTable, LeadSheetError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let (height, width) = range.get_size();
        let start_col = range.start().map_or(0, |(_, col)| col as usize);
        tracing::debug!(
            sheet = sheet_name,
            height,
            width,
            start_col,
            "loaded worksheet range"
        );

        let mut rows = range.rows().map(|row| {
            let mut cells = vec![CellValue::Empty; start_col];
            cells.extend(row.iter().map(convert_cell));
            cells
        });

        let header = rows.next().unwrap_or_default();
        let body: Vec<Vec<CellValue>> = rows.collect();

        Ok(SheetTable::from_rows(&header, body, formatter))
    }
}

/// calamineのセルデータを変換
pub(crate) fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                dt.as_duration()
                    .map(CellValue::Duration)
                    .unwrap_or(CellValue::Float(dt.as_f64()))
            } else if (0.0..1.0).contains(&dt.as_f64()) {
                // 日付部分のないシリアル値は時刻のみのセル
                dt.as_datetime()
                    .map(|t| CellValue::Time(t.time()))
                    .unwrap_or(CellValue::Float(dt.as_f64()))
            } else {
                dt.as_datetime()
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Float(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// ODS形式などのISO 8601日付文字列を解析
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_convert_scalar_cells() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::String("Endereço".to_string())),
            CellValue::String("Endereço".to_string())
        );
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_convert_error_cells() {
        assert_eq!(
            convert_cell(&Data::Error(CellErrorType::NA)),
            CellValue::Error("#N/A".to_string())
        );
        assert_eq!(
            convert_cell(&Data::Error(CellErrorType::Div0)),
            CellValue::Error("#DIV/0!".to_string())
        );
    }

    #[test]
    fn test_convert_iso_datetime() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-03-01T10:30:00".to_string())),
            CellValue::DateTime(expected)
        );

        let midnight = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-03-01".to_string())),
            CellValue::DateTime(midnight)
        );

        assert_eq!(
            convert_cell(&Data::DateTimeIso("not a date".to_string())),
            CellValue::String("not a date".to_string())
        );
    }

    #[test]
    fn test_open_rejects_garbage() {
        let result = WorkbookParser::open(
            Cursor::new(b"definitely not a spreadsheet".to_vec()),
            &SecurityConfig::default(),
        );
        assert!(matches!(result, Err(LeadSheetError::Parse(_))));
    }
}
