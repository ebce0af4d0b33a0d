//! leadsheet CLI
//!
//! 引数なしで実行すると、固定パスのスプレッドシートを読み込みJSONを書き出します。
//! 設定の誤りや読み込みの失敗はエラーを表示して終了コード0で終わります
//! （`--strict`で1に変更）。

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use leadsheet::{
    logging, ExtractorBuilder, SheetSelector, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
};

#[derive(Parser, Debug)]
#[command(name = "leadsheet")]
#[command(about = "Extract sales leads from an Excel sheet into a cleaned JSON dump")]
#[command(version)]
struct Cli {
    /// Input spreadsheet
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Sheet name to read (defaults to the first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Exit with status 1 when extraction fails
    #[arg(long)]
    strict: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let code = run(cli, &mut io::stdout().lock());
    if code != 0 {
        process::exit(code);
    }
}

/// 抽出を実行し、終了コードを返す
///
/// 設定の誤りも抽出の失敗と同じくエラーを表示するだけで、
/// `--strict`指定時のみ1を返します。
fn run<C: Write>(cli: Cli, console: &mut C) -> i32 {
    let failure = if cli.strict { 1 } else { 0 };

    let selector = match cli.sheet {
        Some(name) => SheetSelector::Name(name),
        None => SheetSelector::First,
    };

    let extractor = match ExtractorBuilder::new()
        .with_input_path(cli.input)
        .with_output_path(cli.output)
        .with_sheet_selector(selector)
        .build()
    {
        Ok(extractor) => extractor,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            let _ = writeln!(console, "Error reading spreadsheet: {}", e);
            return failure;
        }
    };

    match extractor.extract_with_console(console) {
        Some(_) => 0,
        None => failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sheet_name_is_reported() {
        let cli = Cli::parse_from(["leadsheet", "--sheet", ""]);
        let mut console: Vec<u8> = Vec::new();

        assert_eq!(run(cli, &mut console), 0);
        let text = String::from_utf8(console).unwrap();
        assert!(text.starts_with("Error reading spreadsheet: Configuration error:"));
    }

    #[test]
    fn test_strict_exit_code() {
        let cli = Cli::parse_from(["leadsheet", "--sheet", "", "--strict"]);
        let mut console: Vec<u8> = Vec::new();
        assert_eq!(run(cli, &mut console), 1);

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.xlsx");
        let output = dir.path().join("out.json");
        let cli = Cli::parse_from([
            "leadsheet",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--strict",
        ]);
        let mut console: Vec<u8> = Vec::new();
        assert_eq!(run(cli, &mut console), 1);
        assert!(!output.exists());
    }

    #[test]
    fn test_defaults_are_fixed_paths() {
        let cli = Cli::parse_from(["leadsheet"]);
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(cli.sheet.is_none());
        assert!(!cli.strict);
    }
}
