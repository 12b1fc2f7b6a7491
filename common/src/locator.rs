//! OCR結果からの再生回数トークン抽出
//!
//! 認識断片はノイズが多く、ページ上の配置順とも一致しない。
//! マーカー文字列（既定 "Views"）を含む最初の断片を採用し、
//! その先頭トークンを再生回数の候補とする。

use crate::types::RecognizedText;

/// 既定のマーカー文字列
pub const DEFAULT_MARKER: &str = "Views";

/// マーカーを含む最初の断片から先頭トークンを取り出す
///
/// 信頼度による順位付けはせず、断片の並び順で最初に一致したものを返す。
/// マーカーを含む断片がなければ `None`。
///
/// # Examples
/// ```
/// use views_ocr_common::{locate_views_token, RecognizedText};
///
/// let fragments = vec![
///     RecognizedText::from_text("1,234 Views"),
///     RecognizedText::from_text("Subscribe"),
///     RecognizedText::from_text("Views 99"),
/// ];
/// assert_eq!(locate_views_token(&fragments, "Views").as_deref(), Some("1,234"));
/// ```
pub fn locate_views_token(fragments: &[RecognizedText], marker: &str) -> Option<String> {
    fragments
        .iter()
        .find(|fragment| fragment.text.contains(marker))
        .and_then(|fragment| fragment.text.split_whitespace().next())
        .map(str::to_string)
}
