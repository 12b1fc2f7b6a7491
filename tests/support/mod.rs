//! テスト用の偽ブラウザ・偽OCR
//!
//! 偽ブラウザはスクロール位置に応じた「画面のテキスト」をスクリーンショットとして
//! ファイルに書き出し、偽OCRはそのファイルを1行1断片として読み戻す。

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use views_ocr_rust::browser::BrowserSession;
use views_ocr_rust::capture::CaptureSettings;
use views_ocr_rust::error::{Result, ViewsError};
use views_ocr_rust::ocr::TextRecognizer;
use views_ocr_rust::RecognizedText;

/// ページの振る舞い
#[derive(Debug, Clone)]
pub enum FakePage {
    /// スクロール位置ごとの画面テキスト（末尾以降は最後の画面のまま）
    Screens(Vec<Vec<&'static str>>),
    /// 読込待ちがタイムアウトする
    NavigationTimeout,
    /// 遷移時にセッションが失われる
    SessionLost,
    /// スクリーンショットの取得に失敗する
    ScreenshotFails,
}

impl FakePage {
    /// `n` 画面目で初めて `text` が現れるページ
    pub fn appears_on(n: usize, text: &'static str) -> Self {
        let mut screens = vec![vec!["Subscribe", "Share"]; n - 1];
        screens.push(vec!["Subscribe", text]);
        FakePage::Screens(screens)
    }

    pub fn never() -> Self {
        FakePage::Screens(vec![vec!["Subscribe", "Share"]])
    }
}

#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    current: Option<String>,
    position: usize,
    pub navigations: Vec<String>,
    pub screenshots: usize,
    pub scrolls: usize,
    pub quit_called: bool,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    fn current_page(&self) -> Option<&FakePage> {
        self.current.as_ref().and_then(|url| self.pages.get(url))
    }
}

impl BrowserSession for FakeBrowser {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        self.current = Some(url.to_string());
        self.position = 0;
        match self.current_page() {
            Some(FakePage::SessionLost) => Err(ViewsError::Session("session deleted".into())),
            _ => Ok(()),
        }
    }

    async fn wait_ready(&mut self, _selector: &str, _timeout: Duration) -> Result<()> {
        match self.current_page() {
            Some(FakePage::NavigationTimeout) => Err(ViewsError::Navigation {
                url: self.current.clone().unwrap_or_default(),
                message: "timeout".into(),
            }),
            _ => Ok(()),
        }
    }

    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        self.screenshots += 1;
        if let Some(FakePage::ScreenshotFails) = self.current_page() {
            return Err(ViewsError::Page {
                url: self.current.clone().unwrap_or_default(),
                message: "スクリーンショット失敗: javascript error".into(),
            });
        }
        let lines = match self.current_page() {
            Some(FakePage::Screens(screens)) if !screens.is_empty() => {
                let idx = self.position.min(screens.len() - 1);
                screens[idx].join("\n")
            }
            _ => String::new(),
        };
        std::fs::write(path, lines)?;
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.scrolls += 1;
        self.position += 1;
        Ok(())
    }

    async fn quit(&mut self) -> Result<()> {
        self.quit_called = true;
        Ok(())
    }
}

/// スクリーンショットファイルの各行を認識断片として返す
#[derive(Default)]
pub struct FakeRecognizer {
    pub calls: Cell<usize>,
}

impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<Vec<RecognizedText>> {
        self.calls.set(self.calls.get() + 1);
        let content = std::fs::read_to_string(image_path)?;
        Ok(content
            .lines()
            .filter(|l| !l.is_empty())
            .map(RecognizedText::from_text)
            .collect())
    }
}

/// 読み込み前に他のタスクへ制御を譲るOCR
#[derive(Default)]
pub struct YieldingRecognizer {
    inner: FakeRecognizer,
}

impl TextRecognizer for YieldingRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<Vec<RecognizedText>> {
        tokio::task::yield_now().await;
        self.inner.recognize(image_path).await
    }
}

/// 常に失敗するOCR
pub struct BrokenRecognizer;

impl TextRecognizer for BrokenRecognizer {
    async fn recognize(&self, _image_path: &Path) -> Result<Vec<RecognizedText>> {
        Err(ViewsError::Recognition("engine crashed".into()))
    }
}

pub fn settings(screenshot_dir: &Path, max_attempts: usize) -> CaptureSettings {
    CaptureSettings {
        max_attempts,
        scroll_pause: Duration::ZERO,
        page_load_timeout: Duration::from_secs(1),
        marker: "Views".to_string(),
        screenshot_path: PathBuf::from(screenshot_dir).join("screenshot.png"),
    }
}
