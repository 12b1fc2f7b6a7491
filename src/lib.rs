pub mod batch;
pub mod browser;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod ocr;
pub mod opener;
pub mod web;

pub use views_ocr_common::{BatchEntry, BatchResult, RecognizedText, ViewsOutcome};

use browser::{BrowserSession, WebDriverSession};
use capture::CaptureSettings;
use config::Config;
use error::Result;
use ocr::{TesseractRecognizer, TextRecognizer};

/// URL一覧の再生回数を集計
///
/// 集計ごとに作業ディレクトリとWebDriverセッションを1つずつ確保し、
/// 全URLで共有する。作業ディレクトリは集計の終了時に削除される。
pub async fn collect_views(config: &Config, urls: &[String]) -> Result<BatchResult> {
    if urls.is_empty() {
        return Err(error::ViewsError::NoUrls);
    }

    let workdir = config.batch_workdir()?;
    let settings = config.capture_settings(workdir.path())?;
    let recognizer = TesseractRecognizer::from_config(config);

    let mut session = WebDriverSession::connect(config).await?;
    run_with_session(&mut session, &recognizer, urls, &settings).await
}

/// セッションでバッチを実行し、結果にかかわらずセッションを終了する
pub async fn run_with_session<B, R>(
    session: &mut B,
    recognizer: &R,
    urls: &[String],
    settings: &CaptureSettings,
) -> Result<BatchResult>
where
    B: BrowserSession,
    R: TextRecognizer,
{
    let result = batch::run_batch(session, recognizer, urls, settings).await;

    if let Err(e) = session.quit().await {
        log::warn!("ブラウザ終了時のエラー（無視）: {}", e);
    }

    result
}
