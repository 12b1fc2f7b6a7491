use crate::capture::CaptureSettings;
use crate::error::{Result, ViewsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use views_ocr_common::DEFAULT_MARKER;

const SCREENSHOT_FILE: &str = "screenshot.png";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WebDriverのエンドポイント（chromedriver既定: 9515）
    pub webdriver_url: String,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// ページ読込待ちの上限（秒）
    pub page_load_timeout_secs: u64,
    /// スクロール+撮影の最大試行回数
    pub max_attempts: usize,
    /// スクロール後の待機（ミリ秒）
    pub scroll_pause_ms: u64,
    /// OCR結果から探すマーカー文字列
    pub marker: String,
    pub ocr_command: String,
    pub ocr_lang: String,
    /// OCR前にグレースケール化する
    pub grayscale: bool,
    /// 集計ごとの作業ディレクトリを作る場所（未指定ならOSの一時ディレクトリ）
    pub screenshot_dir: Option<PathBuf>,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
            window_width: 1280,
            window_height: 720,
            page_load_timeout_secs: 10,
            max_attempts: 5,
            scroll_pause_ms: 1500,
            marker: DEFAULT_MARKER.into(),
            ocr_command: "tesseract".into(),
            ocr_lang: "eng".into(),
            grayscale: true,
            screenshot_dir: None,
            port: 5000,
        }
    }
}

impl Config {
    /// 設定ファイルの内容だけを読み込む（環境変数は反映しない）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 実行時の設定: 設定ファイル + 環境変数 `PORT` / `WEBDRIVER_URL`
    pub fn load_effective() -> Result<Self> {
        Ok(Self::load()?.with_process_env())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ViewsError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("views-ocr").join("config.json"))
    }

    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// `PORT` / `WEBDRIVER_URL` で上書き
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse().ok()) {
            self.port = port;
        }
        if let Some(url) = lookup("WEBDRIVER_URL").filter(|u| !u.trim().is_empty()) {
            self.webdriver_url = url.trim().to_string();
        }
        self
    }

    pub fn screenshot_dir(&self) -> PathBuf {
        self.screenshot_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// 集計1回分の作業ディレクトリを作成（`TempDir` のdropで削除される）
    ///
    /// 同時に走る集計どうしがスクリーンショットを上書きし合わないよう、毎回別のディレクトリにする。
    pub fn batch_workdir(&self) -> Result<TempDir> {
        let base = self.screenshot_dir();
        std::fs::create_dir_all(&base)?;
        Ok(tempfile::Builder::new().prefix("views-ocr-").tempdir_in(base)?)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    /// スクロール撮影ループの設定を検証して生成
    ///
    /// スクリーンショットは `workdir/screenshot.png` に毎回上書きされる。
    pub fn capture_settings(&self, workdir: &Path) -> Result<CaptureSettings> {
        if self.max_attempts == 0 {
            return Err(ViewsError::Config("max_attemptsは1以上にしてください".into()));
        }
        if self.marker.trim().is_empty() {
            return Err(ViewsError::Config("markerが空です".into()));
        }

        Ok(CaptureSettings {
            max_attempts: self.max_attempts,
            scroll_pause: Duration::from_millis(self.scroll_pause_ms),
            page_load_timeout: self.page_load_timeout(),
            marker: self.marker.clone(),
            screenshot_path: workdir.join(SCREENSHOT_FILE),
        })
    }

    pub fn set_webdriver_url(&mut self, url: String) -> Result<()> {
        self.webdriver_url = url;
        self.save()
    }

    pub fn set_ocr_lang(&mut self, lang: String) -> Result<()> {
        self.ocr_lang = lang;
        self.save()
    }
}
