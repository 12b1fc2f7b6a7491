//! 再生回数文字列パーサー
//!
//! OCRで読み取った "12K" "1.2M" "12,000" のような省略表記を数値に変換する。
//!
//! 変換規則:
//! 1. `K` を含む → `K` を除去して ×1,000
//! 2. `M` を含む → `M` を除去して ×1,000,000
//! 3. それ以外 → 桁区切りの `,` を除去してそのまま
//!
//! 接尾辞は大文字のみ対応（`k`/`m`/`B` は扱わない）。

use crate::error::{Error, Result};

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;

/// 再生回数文字列を数値に変換
///
/// # Arguments
/// * `views_str` - OCRで抽出した候補文字列
///
/// # Returns
/// * `Ok(f64)` - 0以上の有限値
/// * `Err(Error::Parse)` - 数値として解釈できない場合
///
/// # Examples
/// ```
/// use views_ocr_common::parse_views;
///
/// assert_eq!(parse_views("12K").unwrap(), 12_000.0);
/// assert_eq!(parse_views("1.2M").unwrap(), 1_200_000.0);
/// assert_eq!(parse_views("12,000").unwrap(), 12_000.0);
/// assert!(parse_views("not a number").is_err());
/// ```
pub fn parse_views(views_str: &str) -> Result<f64> {
    let (number, multiplier) = if views_str.contains('K') {
        (views_str.replace('K', ""), THOUSAND)
    } else if views_str.contains('M') {
        (views_str.replace('M', ""), MILLION)
    } else {
        (views_str.replace(',', ""), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| Error::Parse(format!("数値に変換できません: '{}'", views_str)))?;

    let views = value * multiplier;
    if !views.is_finite() || views < 0.0 {
        return Err(Error::Parse(format!("再生回数として不正な値: '{}'", views_str)));
    }
    Ok(views)
}

/// 再生回数文字列を数値に変換（失敗時は0）
///
/// 変換失敗は警告ログのみ出して0を返す。呼び出し側から失敗は区別できない。
pub fn parse_views_or_zero(views_str: &str) -> f64 {
    match parse_views(views_str) {
        Ok(views) => views,
        Err(e) => {
            log::warn!("{}", e);
            0.0
        }
    }
}
