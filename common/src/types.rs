//! 集計結果の型定義
//!
//! CLIとWebフォームで共有される型:
//! - RecognizedText: OCR 1回分の認識断片（位置・テキスト・信頼度）
//! - ViewsOutcome: 1 URLの取得結果（タグ付き）
//! - BatchResult: URL一覧に対する集計結果（入力順を保持）

use serde::{Deserialize, Serialize};

/// 認識領域（ピクセル座標）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    /// 2つの領域を包含する最小の領域
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// OCRの認識断片
///
/// 位置と信頼度は保持するだけで、抽出ロジックでは使わない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    pub bbox: BoundingBox,
    pub text: String,
    pub confidence: f32,
}

impl RecognizedText {
    /// テキストのみの断片（テスト・診断用）
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// 1 URLの再生回数取得結果
///
/// 画面上はすべて数値に丸められるが、内部では失敗理由を区別する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum ViewsOutcome {
    /// 再生回数を取得できた
    Found(f64),
    /// 試行回数内にマーカーが見つからなかった
    NotFound,
    /// マーカーは見つかったが数値に変換できなかった（候補文字列）
    ParseError(String),
    /// ページ遷移・OCRなどURL単位の失敗
    Failed(String),
}

impl ViewsOutcome {
    /// 画面表示用の数値（Found以外は0）
    pub fn views(&self) -> f64 {
        match self {
            ViewsOutcome::Found(v) => *v,
            _ => 0.0,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ViewsOutcome::Found(_))
    }

    /// 状態ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ViewsOutcome::Found(_) => "取得",
            ViewsOutcome::NotFound => "未検出",
            ViewsOutcome::ParseError(_) => "変換失敗",
            ViewsOutcome::Failed(_) => "取得失敗",
        }
    }
}

/// 集計結果の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub url: String,
    pub views: f64,
    pub outcome: ViewsOutcome,
}

impl BatchEntry {
    pub fn new(url: impl Into<String>, outcome: ViewsOutcome) -> Self {
        Self {
            url: url.into(),
            views: outcome.views(),
            outcome,
        }
    }
}

/// URL一覧の集計結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// 入力順の (url, 再生回数)
    pub entries: Vec<BatchEntry>,
    /// 再生回数の合計
    pub total: f64,
    /// 集計日時（RFC 3339）
    #[serde(default)]
    pub captured_at: String,
}

impl BatchResult {
    pub fn new(captured_at: impl Into<String>) -> Self {
        Self {
            captured_at: captured_at.into(),
            ..Default::default()
        }
    }

    /// 行を追加して合計を更新
    pub fn push(&mut self, entry: BatchEntry) {
        self.total += entry.views;
        self.entries.push(entry);
    }

    /// (url, 再生回数) の組を入力順で返す
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .map(|e| (e.url.as_str(), e.views))
            .collect()
    }

    /// 再生回数を取得できたURLの数
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_found()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_count_excludes_zero_outcomes() {
        let mut result = BatchResult::new("2026-01-01T00:00:00Z");
        result.push(BatchEntry::new("a", ViewsOutcome::Found(0.0)));
        result.push(BatchEntry::new("b", ViewsOutcome::NotFound));
        result.push(BatchEntry::new("c", ViewsOutcome::ParseError("x".into())));
        result.push(BatchEntry::new("d", ViewsOutcome::Failed("timeout".into())));
        result.push(BatchEntry::new("e", ViewsOutcome::Found(12.0)));

        assert_eq!(result.found_count(), 2);
        assert_eq!(result.len(), 5);
        assert!(ViewsOutcome::Found(0.0).is_found());
        assert!(!ViewsOutcome::NotFound.is_found());
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox { left: 10, top: 20, width: 30, height: 10 };
        let b = BoundingBox { left: 45, top: 18, width: 20, height: 14 };
        let u = a.union(&b);
        assert_eq!(u, BoundingBox { left: 10, top: 18, width: 55, height: 14 });
    }

    #[test]
    fn test_outcome_views_flattens_to_zero() {
        assert_eq!(ViewsOutcome::Found(1200.0).views(), 1200.0);
        assert_eq!(ViewsOutcome::NotFound.views(), 0.0);
        assert_eq!(ViewsOutcome::ParseError("abc".into()).views(), 0.0);
        assert_eq!(ViewsOutcome::Failed("timeout".into()).views(), 0.0);
    }

    #[test]
    fn test_batch_result_keeps_order_and_total() {
        let mut result = BatchResult::new("2026-10-16T00:00:00Z");
        result.push(BatchEntry::new("A", ViewsOutcome::Found(100.0)));
        result.push(BatchEntry::new("B", ViewsOutcome::NotFound));
        result.push(BatchEntry::new("C", ViewsOutcome::Found(2000.0)));

        assert_eq!(result.pairs(), vec![("A", 100.0), ("B", 0.0), ("C", 2000.0)]);
        assert_eq!(result.total, 2100.0);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_batch_result_serialize() {
        let mut result = BatchResult::new("2026-10-16T00:00:00Z");
        result.push(BatchEntry::new("https://example.com/a", ViewsOutcome::Found(12000.0)));
        result.push(BatchEntry::new("https://example.com/b", ViewsOutcome::NotFound));

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"capturedAt\":\"2026-10-16T00:00:00Z\""));
        assert!(json.contains("\"status\":\"found\",\"detail\":12000.0"));
        assert!(json.contains("\"status\":\"notFound\""));
        assert!(json.contains("\"total\":12000.0"));
    }

    #[test]
    fn test_batch_result_deserialize() {
        let json = r#"{
            "entries": [
                {"url": "https://example.com", "views": 5.0, "outcome": {"status": "found", "detail": 5.0}}
            ],
            "total": 5.0
        }"#;
        let result: BatchResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries[0].outcome, ViewsOutcome::Found(5.0));
        assert_eq!(result.captured_at, "");
    }
}
