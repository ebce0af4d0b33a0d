//! Diagnostics Report Module
//!
//! 抽出前のシートの概要（行数、列名、先頭行、欠損値数）をコンソール向けに整形するモジュール。
//! 出力は人間向けであり、機械的な解析は想定していません。

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::error::LeadSheetError;
use crate::formatter::ValueFormatter;
use crate::missing::MissingValues;
use crate::table::SheetTable;

/// プレビューのセル表示幅の上限
const MAX_CELL_WIDTH: usize = 50;

/// 欠損セルのプレビュー表記
const MISSING_MARKER: &str = "NaN";

/// シートの診断情報
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Diagnostics {
    row_count: usize,
    columns: Vec<String>,
    preview: Vec<Vec<String>>,
    null_counts: Vec<(String, usize)>,
}

impl Diagnostics {
    /// テーブルから診断情報を収集
    ///
    /// 空行の除去前に呼び出します。
    pub fn collect(
        table: &SheetTable,
        na: &MissingValues,
        formatter: &ValueFormatter,
        preview_rows: usize,
    ) -> Self {
        let preview = table
            .head(preview_rows)
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if na.is_missing(cell) {
                            MISSING_MARKER.to_string()
                        } else {
                            truncate(&formatter.text(cell))
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            row_count: table.row_count(),
            columns: table.columns().to_vec(),
            preview,
            null_counts: table.null_counts(na),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 診断情報を書き出す
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<(), LeadSheetError> {
        writeln!(writer, "Total rows in sheet: {}", self.row_count)?;
        writeln!(writer, "Columns: [{}]", quoted_list(&self.columns))?;

        writeln!(writer)?;
        writeln!(writer, "First {} rows:", self.preview.len())?;
        self.render_preview(writer)?;

        writeln!(writer)?;
        writeln!(writer, "Missing values per column:")?;
        let name_width = self
            .null_counts
            .iter()
            .map(|(name, _)| name.width())
            .max()
            .unwrap_or(0);
        let count_width = self
            .null_counts
            .iter()
            .map(|(_, count)| count.to_string().len())
            .max()
            .unwrap_or(0);
        for (name, count) in &self.null_counts {
            writeln!(
                writer,
                "{}{}    {:>count_width$}",
                name,
                " ".repeat(name_width - name.width()),
                count,
            )?;
        }

        Ok(())
    }

    /// 先頭行を右寄せの表として書き出す（1列目は行番号）
    fn render_preview<W: Write>(&self, writer: &mut W) -> Result<(), LeadSheetError> {
        if self.preview.is_empty() {
            writeln!(writer, "(no rows)")?;
            return Ok(());
        }

        let index_width = (self.preview.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, name)| {
                self.preview
                    .iter()
                    .map(|row| row[col].width())
                    .chain(std::iter::once(name.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut line = " ".repeat(index_width);
        for (name, width) in self.columns.iter().zip(&widths) {
            line.push_str("  ");
            line.push_str(&pad_left(name, *width));
        }
        writeln!(writer, "{}", line)?;

        for (idx, row) in self.preview.iter().enumerate() {
            let mut line = format!("{:<index_width$}", idx);
            for (text, width) in row.iter().zip(&widths) {
                line.push_str("  ");
                line.push_str(&pad_left(text, *width));
            }
            writeln!(writer, "{}", line)?;
        }

        Ok(())
    }
}

/// 書き込んだレコード数を出力する
pub(crate) fn render_summary<W: Write>(writer: &mut W, records: usize) -> Result<(), LeadSheetError> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Records extracted and saved. Total valid records: {}",
        records
    )?;
    Ok(())
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 表示幅に合わせて左側を空白で埋める
fn pad_left(text: &str, width: usize) -> String {
    let w = text.width();
    if w >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - w), text)
    }
}

/// 表示幅が上限を超える場合は末尾を`...`で省略
fn truncate(text: &str) -> String {
    // 改行を含むセルは1行に畳む
    let text = text.replace(['\r', '\n'], " ");
    if text.width() <= MAX_CELL_WIDTH {
        return text;
    }

    let limit = MAX_CELL_WIDTH - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > limit {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}
