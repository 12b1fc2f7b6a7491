//! views-ocr Common Library
//!
//! CLIとWebフォームで共有される型と純粋ロジック:
//! - 再生回数文字列の数値変換（parser）
//! - OCR結果からの再生回数トークン抽出（locator）

pub mod types;
pub mod error;
pub mod parser;
pub mod locator;

pub use types::{BatchEntry, BatchResult, BoundingBox, RecognizedText, ViewsOutcome};
pub use error::{Error, Result};
pub use parser::{parse_views, parse_views_or_zero};
pub use locator::{locate_views_token, DEFAULT_MARKER};
