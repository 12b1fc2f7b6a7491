//! ブラウザ操作
//!
//! スクロール撮影ループが必要とする最小限の操作だけを `BrowserSession` として切り出す。
//! 本番はWebDriver（`WebDriverSession`）、テストでは台本どおりに動く偽実装を使う。

mod screenshot;
mod webdriver;

pub use screenshot::write_screenshot;
pub use webdriver::{chrome_args, WebDriverSession};

use crate::error::Result;
use std::path::Path;
use std::time::Duration;

/// ページ読込完了とみなす要素
pub const READY_SELECTOR: &str = "body";

/// ページ末尾までスクロールするスクリプト
pub const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// バッチ中に共有されるブラウザセッション
#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// `selector` に一致する要素が現れるまで最大 `timeout` 待つ
    async fn wait_ready(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// 表示中のウィンドウをPNGで `path` に保存（上書き）
    async fn screenshot(&mut self, path: &Path) -> Result<()>;

    async fn scroll_to_bottom(&mut self) -> Result<()>;

    async fn quit(&mut self) -> Result<()>;
}
