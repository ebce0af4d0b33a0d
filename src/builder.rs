//! Builder Module
//!
//! Fluent Builder APIで抽出設定を組み立て、`Extractor`を構築する。
//! `Extractor`がリード抽出処理そのもの（読み込み → 診断出力 → 空行除去 →
//! レコード化 → 欠損値正規化 → JSON書き出し）を担う。

use chrono::format::{Item, StrftimeItems};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::api::{
    DateFormat, SheetSelector, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_PREVIEW_ROWS,
};
use crate::error::LeadSheetError;
use crate::formatter::ValueFormatter;
use crate::missing::MissingValues;
use crate::output::{write_records, write_records_to_path};
use crate::parser::WorkbookParser;
use crate::report::{render_summary, Diagnostics};
use crate::security::SecurityConfig;
use crate::types::Dataset;

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// 入力スプレッドシートのパス
    pub input_path: PathBuf,

    /// 出力JSONのパス
    pub output_path: PathBuf,

    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// 診断出力に含める先頭行数
    pub preview_rows: usize,

    /// 追加の欠損値トークン
    pub na_values: Vec<String>,

    /// 既定の欠損値トークンを使うか
    pub default_na: bool,

    pub security: SecurityConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            sheet_selector: SheetSelector::First,
            date_format: DateFormat::DateTime,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            na_values: Vec::new(),
            default_na: true,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
/// 何も指定しなければ、固定パスの入力・出力と最初のシートを使います。
///
/// # 使用例
///
/// ```rust,no_run
/// use leadsheet::{ExtractorBuilder, SheetSelector};
///
/// # fn main() -> Result<(), leadsheet::LeadSheetError> {
/// let extractor = ExtractorBuilder::new()
///     .with_input_path("upload/Base_CRM_.xlsx")
///     .with_sheet_selector(SheetSelector::Name("Base_Clientes_CRM".to_string()))
///     .build()?;
/// let leads = extractor.extract();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExtractorBuilder {
    config: ExtractionConfig,
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 入力: `./scripts/Acompanhamento_Clientes_Potenciais_Atualizado.xlsx`
    /// - 出力: `./scripts/leads_originais.json`
    /// - シート選択: 最初のシート
    /// - 日付形式: `YYYY-MM-DD HH:MM:SS`
    /// - プレビュー: 5行
    /// - 欠損値トークン: 既定のトークンのみ
    pub fn new() -> Self {
        Self::default()
    }

    /// 入力スプレッドシートのパスを指定する
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// 出力JSONのパスを指定する
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// 抽出対象のシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use leadsheet::{ExtractorBuilder, SheetSelector};
    ///
    /// let builder = ExtractorBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Index(1));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付の出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 診断出力に表示する先頭行数を指定する
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.config.preview_rows = rows;
        self
    }

    /// 欠損値として扱うテキストを追加する
    ///
    /// 空セル、NaN、大文字小文字を問わない`"nan"`は常に欠損値です。
    pub fn with_na_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.na_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// 既定の欠損値トークン（`N/A`, `NULL`など）を使うかを指定する
    pub fn with_default_na(mut self, enabled: bool) -> Self {
        self.config.default_na = enabled;
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証して`Extractor`を構築する
    ///
    /// # 発生し得るエラー
    ///
    /// * `LeadSheetError::Config(String)`: 設定の検証に失敗した場合
    ///   * 入力・出力パスが空
    ///   * シート名が空
    ///   * カスタム日付形式が不正な書式文字列
    pub fn build(self) -> Result<Extractor, LeadSheetError> {
        // 1. パスの検証
        if self.config.input_path.as_os_str().is_empty() {
            return Err(LeadSheetError::Config("Input path is empty".to_string()));
        }
        if self.config.output_path.as_os_str().is_empty() {
            return Err(LeadSheetError::Config("Output path is empty".to_string()));
        }

        // 2. シート名の検証
        if let SheetSelector::Name(ref name) = self.config.sheet_selector {
            if name.is_empty() {
                return Err(LeadSheetError::Config("Sheet name is empty".to_string()));
            }
        }

        // 3. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            if format_str.is_empty()
                || StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            {
                return Err(LeadSheetError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        Ok(Extractor::new(self.config))
    }
}

/// リード抽出処理のファサード
///
/// # 使用例
///
/// ```rust,no_run
/// use leadsheet::Extractor;
///
/// // 固定パスから読み込み、失敗時はエラーを表示してNoneを返す
/// if let Some(leads) = Extractor::default().extract() {
///     println!("{} leads", leads.len());
/// }
/// ```
#[derive(Debug)]
pub struct Extractor {
    config: ExtractionConfig,
    formatter: ValueFormatter,
    missing: MissingValues,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self {
            formatter: ValueFormatter::new(config.date_format.clone()),
            missing: MissingValues::new(config.default_na, &config.na_values),
            config,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.config.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// リードを抽出し、診断を標準出力に表示する
    ///
    /// 読み込み・解析・書き込みのどこで失敗しても、エラー内容を表示して
    /// `None`を返します。エラーを呼び出し側に伝播させることはありません。
    pub fn extract(&self) -> Option<Dataset> {
        let stdout = io::stdout();
        let mut console = stdout.lock();
        self.extract_with_console(&mut console)
    }

    /// `extract`の出力先を指定できる版
    pub fn extract_with_console<C: Write>(&self, console: &mut C) -> Option<Dataset> {
        match self.try_extract_with_console(console) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                tracing::error!(
                    input = %self.config.input_path.display(),
                    error = %e,
                    "lead extraction failed"
                );
                // コンソールへの書き込み失敗はこれ以上報告しようがない
                let _ = writeln!(console, "Error reading spreadsheet: {}", e);
                None
            }
        }
    }

    /// リードを抽出する（エラーを返す版）
    ///
    /// 診断は標準出力に表示します。
    pub fn try_extract(&self) -> Result<Dataset, LeadSheetError> {
        let stdout = io::stdout();
        let mut console = stdout.lock();
        self.try_extract_with_console(&mut console)
    }

    /// 設定されたパスから読み込み、設定されたパスへ書き出す
    ///
    /// 出力ファイルは入力の解析に成功した後で作成されます。
    pub fn try_extract_with_console<C: Write>(
        &self,
        console: &mut C,
    ) -> Result<Dataset, LeadSheetError> {
        tracing::info!(input = %self.config.input_path.display(), "extracting leads");

        let input = File::open(&self.config.input_path)?;
        let dataset = self.load(input, console)?;

        write_records_to_path(&self.config.output_path, dataset.records())?;
        render_summary(console, dataset.len())?;

        tracing::info!(
            output = %self.config.output_path.display(),
            records = dataset.len(),
            "leads written"
        );
        Ok(dataset)
    }

    /// 任意のリーダー・ライターで抽出処理を行う
    ///
    /// # 引数
    ///
    /// * `input` - スプレッドシートのバイト列を読み込むリーダー
    /// * `json_out` - JSON配列の書き込み先
    /// * `console` - 診断メッセージの書き込み先
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use leadsheet::Extractor;
    /// use std::io::Cursor;
    ///
    /// # fn main() -> Result<(), leadsheet::LeadSheetError> {
    /// let xlsx_bytes: Vec<u8> = vec![]; // スプレッドシートのバイト列
    /// let mut json: Vec<u8> = Vec::new();
    /// let mut console: Vec<u8> = Vec::new();
    /// let dataset = Extractor::default()
    ///     .extract_from_reader(Cursor::new(xlsx_bytes), &mut json, &mut console)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_from_reader<R: Read, W: Write, C: Write>(
        &self,
        input: R,
        json_out: &mut W,
        console: &mut C,
    ) -> Result<Dataset, LeadSheetError> {
        let dataset = self.load(input, console)?;
        write_records(json_out, dataset.records())?;
        render_summary(console, dataset.len())?;
        Ok(dataset)
    }

    /// 読み込みからレコード化まで
    fn load<R: Read, C: Write>(&self, input: R, console: &mut C) -> Result<Dataset, LeadSheetError> {
        // 1. 読み込み
        let mut parser = WorkbookParser::open(input, &self.config.security)?;
        let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
        let mut table = parser.read_table(&sheet_name, &self.formatter)?;

        // 2. 診断出力
        let diagnostics = Diagnostics::collect(
            &table,
            &self.missing,
            &self.formatter,
            self.config.preview_rows,
        );
        diagnostics.render(console)?;

        // 3. 空行の除去（数値の型推論は除去前の列全体で行う）
        let styles = table.number_styles(&self.missing);
        let dropped = table.drop_empty_rows(&self.missing);
        tracing::debug!(
            sheet = %sheet_name,
            rows = diagnostics.row_count(),
            dropped,
            "dropped empty rows"
        );

        // 4-5. レコード化と欠損値の正規化
        let records = table.to_records(&self.missing, &styles, &self.formatter);

        Ok(Dataset::new(table.columns().to_vec(), records))
    }
}
