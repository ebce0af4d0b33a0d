//! Missing Value Module
//!
//! 欠損値マーカーの判定を行うモジュール。

use std::collections::HashSet;

use crate::types::CellValue;

/// 既定で欠損値として扱うテキスト
pub(crate) const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 欠損値マーカーの判定器
///
/// 空セル・NaN・大文字小文字を問わない`"nan"`は常に欠損値です。
/// それ以外のテキストは、保持しているトークン集合と完全一致した場合のみ欠損値になります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MissingValues {
    tokens: HashSet<String>,
}

impl Default for MissingValues {
    fn default() -> Self {
        Self::new(true, &[])
    }
}

impl MissingValues {
    /// 判定器を生成
    ///
    /// # 引数
    ///
    /// * `include_default` - 既定のトークン（`DEFAULT_NA_VALUES`）を含めるか
    /// * `extra` - 追加のトークン
    pub fn new(include_default: bool, extra: &[String]) -> Self {
        let mut tokens: HashSet<String> = HashSet::new();
        if include_default {
            tokens.extend(DEFAULT_NA_VALUES.iter().map(|s| s.to_string()));
        }
        tokens.extend(extra.iter().cloned());
        Self { tokens }
    }

    /// テキストが欠損値マーカーかどうか
    pub fn is_na_text(&self, text: &str) -> bool {
        text.eq_ignore_ascii_case("nan") || self.tokens.contains(text)
    }

    /// セルが欠損値かどうか
    pub fn is_missing(&self, cell: &CellValue) -> bool {
        match cell {
            CellValue::Empty => true,
            CellValue::Float(f) => f.is_nan(),
            CellValue::String(s) | CellValue::Error(s) => self.is_na_text(s),
            _ => false,
        }
    }
}
