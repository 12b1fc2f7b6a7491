//! URL一覧の逐次集計
//!
//! 1つのブラウザセッションを全URLで使い回し、URLごとに入力順で処理する。
//! URL単位の失敗は0として記録して続行し、セッション自体の故障だけはバッチを中断する。

use crate::browser::BrowserSession;
use crate::capture::{capture_views, CaptureSettings};
use crate::error::Result;
use crate::ocr::TextRecognizer;
use views_ocr_common::{BatchEntry, BatchResult, ViewsOutcome};

pub async fn run_batch<B, R>(
    session: &mut B,
    recognizer: &R,
    urls: &[String],
    settings: &CaptureSettings,
) -> Result<BatchResult>
where
    B: BrowserSession,
    R: TextRecognizer,
{
    let mut result = BatchResult::new(chrono::Utc::now().to_rfc3339());

    for (i, url) in urls.iter().enumerate() {
        log::info!("[{}/{}] {}", i + 1, urls.len(), url);

        let outcome = match capture_views(session, recognizer, url, settings).await {
            Ok(report) => {
                log::debug!(
                    "{}: {:?} (撮影{}回, スクロール{}回)",
                    url,
                    report.outcome,
                    report.attempts,
                    report.scrolls
                );
                report.outcome
            }
            Err(e) if e.is_session_fatal() => {
                log::error!("{}: {} → バッチを中断", url, e);
                return Err(e);
            }
            Err(e) => {
                log::warn!("{}: {}", url, e);
                ViewsOutcome::Failed(e.to_string())
            }
        };

        result.push(BatchEntry::new(url.clone(), outcome));
    }

    log::info!("合計: {} ({}件)", result.total, result.len());
    Ok(result)
}

/// フォーム入力（改行区切り）をURL一覧に変換
///
/// 前後の空白を除去し、空行は捨てる。URLとしての妥当性は検証しない。
pub fn parse_url_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
