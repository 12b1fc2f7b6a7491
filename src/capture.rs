//! スクロール撮影ループ
//!
//! 状態遷移:
//! `NavigatePending → Scrolling(0) → … → Scrolling(max_attempts-1) → Done`
//!
//! 各試行でスクリーンショット→OCR→マーカー探索を行い、見つかればその場で終了する。
//! 見つからなければ末尾までスクロールし、遅延読込の描画を待って次の試行へ進む。
//! 最後の試行の後はスクロールしない（N回試行 = 撮影N回・スクロールN-1回）。

use crate::browser::{BrowserSession, READY_SELECTOR};
use crate::error::Result;
use crate::ocr::TextRecognizer;
use std::path::PathBuf;
use std::time::Duration;
use views_ocr_common::{locate_views_token, parse_views, ViewsOutcome};

#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub max_attempts: usize,
    pub scroll_pause: Duration,
    pub page_load_timeout: Duration,
    pub marker: String,
    /// 毎回上書きされる一時ファイル
    pub screenshot_path: PathBuf,
}

/// 1 URL分の実行記録
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureReport {
    pub url: String,
    pub outcome: ViewsOutcome,
    /// 撮影+OCRの回数
    pub attempts: usize,
    pub scrolls: usize,
    /// マーカー断片から取り出した候補文字列
    pub candidate: Option<String>,
}

/// 1 URLの再生回数を取得
///
/// ページ遷移・読込待ちの失敗は `Err` で返す（呼び出し側で0扱いにするか判断する）。
/// マーカー未検出・数値変換失敗は `Ok` のまま `outcome` で区別する。
pub async fn capture_views<B, R>(
    session: &mut B,
    recognizer: &R,
    url: &str,
    settings: &CaptureSettings,
) -> Result<CaptureReport>
where
    B: BrowserSession,
    R: TextRecognizer,
{
    session.navigate(url).await?;
    session
        .wait_ready(READY_SELECTOR, settings.page_load_timeout)
        .await?;

    let mut attempts = 0;
    let mut scrolls = 0;
    let mut candidate = None;

    for attempt in 0..settings.max_attempts {
        session.screenshot(&settings.screenshot_path).await?;
        let fragments = recognizer.recognize(&settings.screenshot_path).await?;
        attempts += 1;

        candidate = locate_views_token(&fragments, &settings.marker);
        if candidate.is_some() {
            log::debug!("{}: {}回目で検出 {:?}", url, attempt + 1, candidate);
            break;
        }

        if attempt + 1 < settings.max_attempts {
            session.scroll_to_bottom().await?;
            scrolls += 1;
            tokio::time::sleep(settings.scroll_pause).await;
        }
    }

    let outcome = match candidate.as_deref() {
        Some(views_str) => match parse_views(views_str) {
            Ok(views) => ViewsOutcome::Found(views),
            Err(e) => {
                log::warn!("{}: {}", url, e);
                ViewsOutcome::ParseError(views_str.to_string())
            }
        },
        None => ViewsOutcome::NotFound,
    };

    Ok(CaptureReport {
        url: url.to_string(),
        outcome,
        attempts,
        scrolls,
        candidate,
    })
}
