//! Cell Formatter Module
//!
//! セル値をJSON値・見出し文字列・プレビュー文字列に変換するモジュール。

use std::fmt::Write as _;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde_json::{Number, Value};

use crate::api::DateFormat;
use crate::types::CellValue;

/// i64へ丸めても精度が落ちない上限（2^53）
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// 既定形式で秒未満を含む日時の形式（`2024-01-15 10:30:00.500000`）
const DATETIME_FRACTION_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// 数値の出力スタイル
///
/// 列全体の型推論の結果です。数値のみで構成され、欠損値か非整数を含む列は
/// `Float`となり、整数値も`5.0`のように出力されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberStyle {
    /// 整数値は整数として出力
    Natural,
    /// すべての数値を浮動小数点数として出力
    Float,
}

/// セルフォーマッター
#[derive(Debug, Clone)]
pub(crate) struct ValueFormatter {
    date_format: DateFormat,
}

impl ValueFormatter {
    pub fn new(date_format: DateFormat) -> Self {
        Self { date_format }
    }

    /// セル値をJSON値に変換
    ///
    /// 欠損値の判定は呼び出し側で行います。ここでは`Empty`を`null`にするだけです。
    /// 日付・経過時間はJSONで表現できないため文字列になります。
    pub fn to_json(&self, cell: &CellValue, style: NumberStyle) -> Value {
        match cell {
            CellValue::Empty => Value::Null,
            CellValue::String(s) | CellValue::Error(s) => Value::String(s.clone()),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => match style {
                NumberStyle::Natural => Value::from(*i),
                NumberStyle::Float => float_value(*i as f64),
            },
            CellValue::Float(f) => {
                if style == NumberStyle::Natural && cell.is_integral() && f.abs() < MAX_SAFE_INTEGER
                {
                    Value::from(*f as i64)
                } else {
                    float_value(*f)
                }
            }
            CellValue::DateTime(dt) => Value::String(self.format_datetime(dt)),
            CellValue::Time(t) => Value::String(format_time(t)),
            CellValue::Duration(d) => Value::String(format_duration(d)),
        }
    }

    /// 列見出しの文字列を返す（空セルの場合はNone）
    pub fn header_text(&self, cell: &CellValue) -> Option<String> {
        match cell {
            CellValue::Empty => None,
            CellValue::String(s) if s.is_empty() => None,
            other => Some(self.text(other)),
        }
    }

    /// プレビュー表示用の文字列
    ///
    /// 整数値の浮動小数点数も末尾の`.0`を付けずに表示します。
    pub fn text(&self, cell: &CellValue) -> String {
        match cell {
            CellValue::Empty => String::new(),
            CellValue::String(s) | CellValue::Error(s) => s.clone(),
            CellValue::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => {
                if cell.is_integral() && f.abs() < MAX_SAFE_INTEGER {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            CellValue::DateTime(dt) => self.format_datetime(dt),
            CellValue::Time(t) => format_time(t),
            CellValue::Duration(d) => format_duration(d),
        }
    }

    fn format_datetime(&self, dt: &NaiveDateTime) -> String {
        let pattern = match self.date_format {
            DateFormat::DateTime if dt.nanosecond() != 0 => DATETIME_FRACTION_PATTERN,
            _ => self.date_format.pattern(),
        };
        let mut out = String::new();
        // build()で検証済み。Displayが失敗した場合は既定形式
        if write!(out, "{}", dt.format(pattern)).is_err() {
            return dt.format(DateFormat::DateTime.pattern()).to_string();
        }
        out
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(f.to_string()))
}

/// 時刻を`HH:MM:SS`形式にする（秒未満があればマイクロ秒まで）
fn format_time(t: &NaiveTime) -> String {
    if t.nanosecond() != 0 {
        t.format("%H:%M:%S%.6f").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

/// 経過時間を`D days HH:MM:SS`形式にする
fn format_duration(d: &Duration) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let days = total / 86_400;
    let rem = total % 86_400;
    format!(
        "{}{} days {:02}:{:02}:{:02}",
        sign,
        days,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}
