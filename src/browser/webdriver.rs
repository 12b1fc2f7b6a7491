//! WebDriver（chromedriver等）によるブラウザセッション

use super::{write_screenshot, BrowserSession, SCROLL_TO_BOTTOM_JS};
use crate::config::Config;
use crate::error::{Result, ViewsError};
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use std::path::Path;
use std::time::Duration;

pub struct WebDriverSession {
    client: Client,
    grayscale: bool,
    current_url: String,
}

impl WebDriverSession {
    /// WebDriverに接続して新しいセッションを作成
    pub async fn connect(config: &Config) -> Result<Self> {
        log::info!("WebDriverに接続: {}", config.webdriver_url);

        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(config));
        let client = builder
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| ViewsError::Connect(format!("{} ({})", e, config.webdriver_url)))?;

        Ok(Self {
            client,
            grayscale: config.grayscale,
            current_url: String::new(),
        })
    }

    fn classify(&self, action: PageAction, err: CmdError) -> ViewsError {
        classify_cmd_error(&self.current_url, action, err)
    }
}

impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.current_url = url.to_string();
        self.client
            .goto(url)
            .await
            .map_err(|e| self.classify(PageAction::Navigate, e))
    }

    async fn wait_ready(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map(|_| ())
            .map_err(|e| self.classify(PageAction::WaitReady, e))
    }

    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        let png = self
            .client
            .screenshot()
            .await
            .map_err(|e| self.classify(PageAction::Screenshot, e))?;
        write_screenshot(&png, path, self.grayscale)
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.client
            .execute(SCROLL_TO_BOTTOM_JS, vec![])
            .await
            .map(|_| ())
            .map_err(|e| self.classify(PageAction::Scroll, e))
    }

    async fn quit(&mut self) -> Result<()> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| ViewsError::Session(e.to_string()))
    }
}

/// WebDriverへの操作種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageAction {
    Navigate,
    WaitReady,
    Screenshot,
    Scroll,
}

impl PageAction {
    fn label(&self) -> &'static str {
        match self {
            PageAction::Navigate => "ページ遷移",
            PageAction::WaitReady => "読込待ち",
            PageAction::Screenshot => "スクリーンショット",
            PageAction::Scroll => "スクロール",
        }
    }
}

/// WebDriverのエラーを分類
///
/// セッション自体が失われた場合だけ `Session`（バッチ中断）。
/// それ以外はそのURLだけの失敗として扱う。
fn classify_cmd_error(url: &str, action: PageAction, err: CmdError) -> ViewsError {
    if is_session_lost(&err) {
        return ViewsError::Session(format!("{}: {}", action.label(), err));
    }

    match (action, err) {
        (PageAction::Navigate | PageAction::WaitReady, CmdError::WaitTimeout) => {
            ViewsError::Navigation {
                url: url.to_string(),
                message: "読込待ちがタイムアウトしました".into(),
            }
        }
        (PageAction::Navigate | PageAction::WaitReady, err) => ViewsError::Navigation {
            url: url.to_string(),
            message: err.to_string(),
        },
        (action, err) => ViewsError::Page {
            url: url.to_string(),
            message: format!("{}失敗: {}", action.label(), err),
        },
    }
}

fn is_session_lost(err: &CmdError) -> bool {
    matches!(err, CmdError::Lost(_)) || is_session_lost_message(&err.to_string())
}

/// WebDriverのエラーメッセージがセッション喪失を示すか
fn is_session_lost_message(message: &str) -> bool {
    let msg = message.to_lowercase();
    msg.contains("invalid session id") || msg.contains("no such window")
}

/// Chrome起動オプション
pub fn chrome_args(config: &Config) -> Vec<String> {
    let mut args = vec![
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        format!("--window-size={},{}", config.window_width, config.window_height),
    ];
    if config.headless {
        args.push("--headless".to_string());
    }
    args.extend(
        [
            "--disable-gpu",
            "--disable-software-rasterizer",
            "--disable-extensions",
            "--log-level=3",
            "--disable-background-networking",
            "--disable-sync",
            "--disable-translate",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    args
}

fn chrome_capabilities(config: &Config) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert("browserName".into(), json!("chrome"));
    caps.insert(
        "goog:chromeOptions".into(),
        json!({
            "args": chrome_args(config),
            "excludeSwitches": ["enable-automation"],
            "useAutomationExtension": false,
        }),
    );
    caps
}
