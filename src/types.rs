//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// 1行分のリードレコード
///
/// キーはシートの列見出し、値はセルの値です。
/// `serde_json`の`preserve_order`機能により、キーはシートの列順を保持します。
pub type LeadRecord = serde_json::Map<String, serde_json::Value>;

/// セルの値を表す列挙型（欠損値の正規化前）
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 空セル
    Empty,

    /// 文字列
    String(String),

    /// 整数
    Int(i64),

    /// 浮動小数点数（NaNを含み得る）
    Float(f64),

    /// 論理値
    Bool(bool),

    /// 日付・時刻
    DateTime(NaiveDateTime),

    /// 時刻のみ（日付部分のないシリアル値）
    Time(NaiveTime),

    /// 経過時間
    Duration(Duration),

    /// エラー値（例: #DIV/0!）
    Error(String),
}

impl CellValue {
    /// 数値セルの場合、その値をf64で返す
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// 整数として表現できる数値かどうか
    pub fn is_integral(&self) -> bool {
        match self {
            CellValue::Int(_) => true,
            CellValue::Float(f) => f.is_finite() && f.fract() == 0.0,
            _ => false,
        }
    }
}

/// 抽出結果のデータセット
///
/// 列見出しと、空行を除いたレコードの列を保持します。
/// 生成後は変更されません。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<LeadRecord>,
}

impl Dataset {
    pub(crate) fn new(columns: Vec<String>, records: Vec<LeadRecord>) -> Self {
        Self { columns, records }
    }

    /// 列見出し（シートの列順）
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// レコード（シートの行順）
    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    /// レコード数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// レコードの所有権を取り出す
    pub fn into_records(self) -> Vec<LeadRecord> {
        self.records
    }
}
