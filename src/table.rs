//! Sheet Table Module
//!
//! シートの内容を「名前付きの列 × 順序付きの行」として保持し、
//! 空行の除去とレコードへの変換を行うモジュール。

use std::collections::HashSet;

use crate::formatter::{NumberStyle, ValueFormatter};
use crate::missing::MissingValues;
use crate::types::{CellValue, LeadRecord};

/// シートの表形式データ
///
/// 1行目を列見出しとして解釈した後の、データ行のみを保持します。
/// すべての行は列数と同じ長さに揃えられています。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SheetTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    /// 見出し行とデータ行からテーブルを構築
    ///
    /// 見出しの正規化:
    /// - 空の見出しは`Unnamed: <列番号>`になる
    /// - 重複した見出しは後ろのものから`.1`, `.2`, ... が付く
    ///
    /// データ行は見出しの列数に合わせて切り詰め、不足分は空セルで埋めます。
    pub fn from_rows(
        header: &[CellValue],
        body: Vec<Vec<CellValue>>,
        formatter: &ValueFormatter,
    ) -> Self {
        let columns = normalize_headers(header, formatter);
        let width = columns.len();

        let rows = body
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// データ行数（空行を含む）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 先頭からn行
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// 列ごとの欠損セル数（列順）
    pub fn null_counts(&self, na: &MissingValues) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let count = self
                    .rows
                    .iter()
                    .filter(|row| na.is_missing(&row[col]))
                    .count();
                (name.clone(), count)
            })
            .collect()
    }

    /// 列ごとの数値出力スタイルを推論
    ///
    /// 空行の除去前に判定するため、除去された行の欠損値も考慮されます。
    pub fn number_styles(&self, na: &MissingValues) -> Vec<NumberStyle> {
        (0..self.columns.len())
            .map(|col| {
                let mut numeric = 0usize;
                let mut has_missing = false;
                let mut has_fraction = false;

                for row in &self.rows {
                    let cell = &row[col];
                    if na.is_missing(cell) {
                        has_missing = true;
                    } else if cell.as_number().is_some() {
                        numeric += 1;
                        has_fraction |= !cell.is_integral();
                    } else {
                        // 文字列などが混在する列は値ごとに出力する
                        return NumberStyle::Natural;
                    }
                }

                if numeric > 0 && (has_missing || has_fraction) {
                    NumberStyle::Float
                } else {
                    NumberStyle::Natural
                }
            })
            .collect()
    }

    /// すべてのセルが欠損値である行を除去
    pub fn drop_empty_rows(&mut self, na: &MissingValues) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|row| !row.iter().all(|cell| na.is_missing(cell)));
        before - self.rows.len()
    }

    /// 各行をレコードに変換
    ///
    /// 欠損値マーカーはすべて`null`になります。行順とキー順はシートのままです。
    pub fn to_records(
        &self,
        na: &MissingValues,
        styles: &[NumberStyle],
        formatter: &ValueFormatter,
    ) -> Vec<LeadRecord> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .enumerate()
                    .map(|(col, (name, cell))| {
                        let value = if na.is_missing(cell) {
                            serde_json::Value::Null
                        } else {
                            let style = styles.get(col).copied().unwrap_or(NumberStyle::Natural);
                            formatter.to_json(cell, style)
                        };
                        (name.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

fn normalize_headers(header: &[CellValue], formatter: &ValueFormatter) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(header.len());

    for (idx, cell) in header.iter().enumerate() {
        let base = formatter
            .header_text(cell)
            .unwrap_or_else(|| format!("Unnamed: {}", idx));

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}
