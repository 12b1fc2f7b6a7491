use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "views-ocr")]
#[command(about = "Webページの再生回数をスクリーンショット+OCRで集計するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// URL入力フォームを起動
    Serve {
        /// 待ち受けポート（省略時は設定値 / PORT環境変数）
        #[arg(short, long)]
        port: Option<u16>,

        /// 起動時にブラウザを開かない
        #[arg(long)]
        no_open: bool,
    },

    /// URL一覧の再生回数を集計
    Run {
        /// 対象URL
        urls: Vec<String>,

        /// URL一覧ファイル（1行に1つ）
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// スクロール+撮影の最大試行回数
        #[arg(long)]
        max_attempts: Option<usize>,
    },

    /// 画像ファイルにOCRをかけて再生回数を抽出（診断用）
    Ocr {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// マーカー文字列（省略時は設定値）
        #[arg(short, long)]
        marker: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// WebDriverのURLを設定
        #[arg(long)]
        set_webdriver_url: Option<String>,

        /// OCR言語を設定（tesseractの -l）
        #[arg(long)]
        set_lang: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from([
            "views-ocr", "run", "https://a.example", "https://b.example", "-o", "out.json", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Run { urls, output, file, max_attempts } => {
                assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(file.is_none());
                assert!(max_attempts.is_none());
            }
            _ => panic!("Expected Run"),
        }
    }

    #[test]
    fn test_parse_serve_command() {
        let cli = Cli::parse_from(["views-ocr", "serve", "--port", "8080", "--no-open"]);
        match cli.command {
            Commands::Serve { port, no_open } => {
                assert_eq!(port, Some(8080));
                assert!(no_open);
            }
            _ => panic!("Expected Serve"),
        }
    }

    #[test]
    fn test_ocr_requires_image() {
        assert!(Cli::try_parse_from(["views-ocr", "ocr"]).is_err());
    }
}
