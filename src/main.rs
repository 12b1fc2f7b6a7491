use anyhow::Context;
use clap::Parser;
use views_ocr_rust::{batch, cli, config, error, ocr, web};
use cli::{Cli, Commands};
use config::Config;
use ocr::{TesseractRecognizer, TextRecognizer};
use views_ocr_common::{locate_views_token, parse_views_or_zero};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Serve { port, no_open } => {
            println!("🌐 views-ocr - 再生回数集計フォーム\n");
            let mut config = Config::load_effective()?;
            if let Some(port) = port {
                config.port = port;
            }
            web::serve(config, !no_open).await?;
        }

        Commands::Run { urls, file, output, max_attempts } => {
            println!("🔎 views-ocr - 再生回数集計\n");

            let mut config = Config::load_effective()?;
            if let Some(n) = max_attempts {
                config.max_attempts = n;
            }

            let mut targets = urls;
            if let Some(path) = &file {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("URL一覧を読み込めません: {}", path.display()))?;
                targets.extend(batch::parse_url_lines(&content));
            }
            if targets.is_empty() {
                return Err(error::ViewsError::NoUrls.into());
            }

            // 1. 集計
            println!("[1/2] {}件のURLを順に処理中...", targets.len());
            let result = views_ocr_rust::collect_views(&config, &targets).await?;
            println!("✔ 集計完了\n");

            for entry in &result.entries {
                println!(
                    "  {:>12}  {}  ({})",
                    web::format_views(entry.views),
                    entry.url,
                    entry.outcome.label()
                );
            }
            println!(
                "\n  合計: {}  (取得 {}/{}件)\n",
                web::format_views(result.total),
                result.found_count(),
                result.len()
            );

            // 2. 結果保存
            if let Some(output) = output {
                println!("[2/2] 結果を保存中...");
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&output, json)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Ocr { image, marker } => {
            if !image.exists() {
                anyhow::bail!("画像ファイルが見つかりません: {}", image.display());
            }

            let config = Config::load_effective()?;
            let marker = marker.unwrap_or_else(|| config.marker.clone());
            let recognizer = TesseractRecognizer::from_config(&config);
            let fragments = recognizer.recognize(&image).await?;

            println!("認識結果: {}件", fragments.len());
            for (i, fragment) in fragments.iter().enumerate() {
                println!("  {:>3}. [{:>5.1}] {}", i + 1, fragment.confidence, fragment.text);
            }

            match locate_views_token(&fragments, &marker) {
                Some(token) => println!(
                    "\n✔ '{}' → {} → {}",
                    marker,
                    token,
                    web::format_views(parse_views_or_zero(&token))
                ),
                None => println!("\n'{}' を含む断片はありません", marker),
            }
        }

        Commands::Config { set_webdriver_url, set_lang, show } => {
            // 保存対象なので環境変数の上書きは反映しない
            let mut config = Config::load()?;

            if let Some(url) = set_webdriver_url {
                config.set_webdriver_url(url)?;
                println!("✔ WebDriverのURLを設定しました");
            }

            if let Some(lang) = set_lang {
                config.set_ocr_lang(lang)?;
                println!("✔ OCR言語を設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  WebDriver: {}", config.webdriver_url);
                println!("  ヘッドレス: {}", config.headless);
                println!("  ウィンドウ: {}x{}", config.window_width, config.window_height);
                println!("  読込タイムアウト: {}秒", config.page_load_timeout_secs);
                println!("  最大試行回数: {}", config.max_attempts);
                println!("  スクロール待ち: {}ms", config.scroll_pause_ms);
                println!("  マーカー: {}", config.marker);
                println!("  OCR: {} -l {}", config.ocr_command, config.ocr_lang);
                println!("  作業ディレクトリ: {}", config.screenshot_dir().display());
                println!("  ポート: {}", config.port);
            }
        }
    }

    Ok(())
}
