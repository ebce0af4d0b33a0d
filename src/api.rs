//! Public API Types
//!
//! 公開APIで使用する列挙型と既定値を定義するモジュール。

/// 既定の入力ファイルパス（カレントディレクトリからの相対パス）
pub const DEFAULT_INPUT_PATH: &str = "./scripts/Acompanhamento_Clientes_Potenciais_Atualizado.xlsx";

/// 既定の出力ファイルパス
pub const DEFAULT_OUTPUT_PATH: &str = "./scripts/leads_originais.json";

/// 既定のプレビュー行数
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// シート選択方式
///
/// 抽出対象のシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Base_Clientes_CRM".to_string())`
    Name(String),
}

/// 日付の出力形式
///
/// 日付セルはJSONで表現できないため、文字列として出力されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// 日付と時刻（`YYYY-MM-DD HH:MM:SS`、デフォルト）
    ///
    /// 例: `2025-11-20 00:00:00`
    #[default]
    DateTime,

    /// ISO 8601形式の日付のみ（YYYY-MM-DD）
    ///
    /// 例: `2025-11-20`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use leadsheet::{DateFormat, ExtractorBuilder};
    ///
    /// # fn main() -> Result<(), leadsheet::LeadSheetError> {
    /// let extractor = ExtractorBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

impl DateFormat {
    /// chronoに渡すフォーマット文字列
    pub(crate) fn pattern(&self) -> &str {
        match self {
            DateFormat::DateTime => "%Y-%m-%d %H:%M:%S",
            DateFormat::Iso8601 => "%Y-%m-%d",
            DateFormat::Custom(pattern) => pattern,
        }
    }
}
