//! Webフォーム
//!
//! `GET /` で入力フォーム、`POST /` でURL一覧を受け取り集計結果を返す。
//! 送信ごとにブラウザセッションを1つ作り、処理後に破棄する。

mod page;

pub use page::{format_views, render_error, render_form, render_results};

use crate::batch::parse_url_lines;
use crate::config::Config;
use crate::opener;
use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// 起動後にブラウザを開くまでの待ち
const OPEN_BROWSER_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
pub struct UrlForm {
    #[serde(default)]
    pub urls: String,
}

pub fn router(config: Config) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .with_state(Arc::new(config))
}

async fn index() -> Html<String> {
    Html(render_form(""))
}

async fn submit(
    State(config): State<Arc<Config>>,
    Form(form): Form<UrlForm>,
) -> (StatusCode, Html<String>) {
    let urls = parse_url_lines(&form.urls);
    if urls.is_empty() {
        return (
            StatusCode::OK,
            Html(render_error(&form.urls, "URLを1行に1つずつ入力してください")),
        );
    }

    log::info!("集計開始: {}件", urls.len());
    match crate::collect_views(&config, &urls).await {
        Ok(result) => (StatusCode::OK, Html(render_results(&form.urls, &result))),
        Err(e) => {
            log::error!("集計失敗: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_error(&form.urls, &e.to_string())),
            )
        }
    }
}

/// フォームサーバーを起動
///
/// `open_browser` 指定時は少し待ってから既定ブラウザでフォームを開く。
pub async fn serve(config: Config, open_browser: bool) -> anyhow::Result<()> {
    let port = config.port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("ポート{}で待ち受けできません", port))?;

    let local_url = format!("http://127.0.0.1:{}/", port);
    println!("✔ フォームを公開: {}", local_url);

    if open_browser {
        tokio::spawn(async move {
            tokio::time::sleep(OPEN_BROWSER_DELAY).await;
            if let Err(e) = opener::open_in_browser(&local_url).await {
                log::warn!("ブラウザを開けません: {}", e);
            }
        });
    }

    axum::serve(listener, router(config))
        .await
        .context("サーバーが異常終了しました")?;
    Ok(())
}
