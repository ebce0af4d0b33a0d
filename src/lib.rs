//! leadsheet - Extract sales leads from an Excel sheet into a cleaned JSON dump
//!
//! スプレッドシートの最初のシートを読み込み、行数・列名・先頭行・欠損値数を
//! コンソールに表示した後、空行を除いたレコードをJSON配列として書き出します。
//! 欠損値（空セル、NaN、`"nan"`など）はすべて`null`に正規化されます。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use leadsheet::Extractor;
//!
//! // 固定パス（./scripts/...）から読み込み、./scripts/leads_originais.json に書き出す。
//! // 失敗した場合はエラーを表示してNoneを返す。
//! let leads = Extractor::default().extract();
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use leadsheet::{DateFormat, ExtractorBuilder, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_input_path("upload/Base_CRM_.xlsx")
//!         .with_output_path("upload/leads.json")
//!         .with_sheet_selector(SheetSelector::Name("Base_Clientes_CRM".to_string()))
//!         .with_date_format(DateFormat::Iso8601)
//!         .build()?;
//!
//!     let dataset = extractor.try_extract()?;
//!     println!("{} leads, columns: {:?}", dataset.len(), dataset.columns());
//!     Ok(())
//! }
//! ```
//!
//! # In-memory Extraction
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use leadsheet::Extractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xlsx_bytes: Vec<u8> = vec![]; // Your spreadsheet bytes
//! let mut json: Vec<u8> = Vec::new();
//! let mut console: Vec<u8> = Vec::new();
//! Extractor::default().extract_from_reader(Cursor::new(xlsx_bytes), &mut json, &mut console)?;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
pub mod logging;
mod missing;
mod output;
mod parser;
mod report;
mod security;
mod table;
mod types;

// 公開API
pub use api::{
    DateFormat, SheetSelector, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_PREVIEW_ROWS,
};
pub use builder::{Extractor, ExtractorBuilder};
pub use error::LeadSheetError;
pub use types::{Dataset, LeadRecord};
