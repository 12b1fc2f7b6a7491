//! テキスト認識（OCR）
//!
//! 認識エンジンは `TextRecognizer` の裏に隠す。結果は
//! (領域, テキスト, 信頼度) の並びで、抽出側は並び順だけを使う。

mod tesseract;

pub use tesseract::{parse_tsv, TesseractRecognizer};

use crate::error::Result;
use std::path::Path;
use views_ocr_common::RecognizedText;

#[allow(async_fn_in_trait)]
pub trait TextRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<Vec<RecognizedText>>;
}
