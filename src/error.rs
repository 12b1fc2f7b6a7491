use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewsError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ページを開けません ({url}): {message}")]
    Navigation { url: String, message: String },

    #[error("ページ操作エラー ({url}): {message}")]
    Page { url: String, message: String },

    #[error("ブラウザセッションが使用できません: {0}")]
    Session(String),

    #[error("WebDriverに接続できません: {0}")]
    Connect(String),

    #[error("OCR実行エラー: {0}")]
    Recognition(String),

    #[error("画像処理エラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("URLが指定されていません")]
    NoUrls,
}

impl ViewsError {
    /// バッチ全体を中断すべきエラーか
    ///
    /// セッションは全URLで共有するため、セッション自体が壊れた場合は
    /// 以降のURLも処理できない。
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, ViewsError::Session(_) | ViewsError::Connect(_))
    }
}

pub type Result<T> = std::result::Result<T, ViewsError>;
