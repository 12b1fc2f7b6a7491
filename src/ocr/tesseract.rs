//! tesseract CLI連携
//!
//! `tesseract <image> stdout -l <lang> tsv` を実行し、単語単位のTSVを
//! 行単位の認識断片にまとめる。

use super::TextRecognizer;
use crate::config::Config;
use crate::error::{Result, ViewsError};
use std::collections::HashMap;
use std::path::Path;
use tokio::process::Command;
use views_ocr_common::{BoundingBox, RecognizedText};

/// TSVの単語行レベル
const WORD_LEVEL: u32 = 5;
/// TSVの列数
const TSV_COLUMNS: usize = 12;

#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: String,
    lang: String,
}

impl TesseractRecognizer {
    pub fn new(command: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            lang: lang.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ocr_command.clone(), config.ocr_lang.clone())
    }
}

impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<Vec<RecognizedText>> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.lang, "tsv"])
            .output()
            .await
            .map_err(|e| ViewsError::Recognition(format!("{} 実行エラー: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ViewsError::Recognition(format!(
                "{} failed (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let fragments = parse_tsv(&tsv);
        log::debug!("OCR: {}件の断片 ({})", fragments.len(), image_path.display());
        Ok(fragments)
    }
}

/// 単語の所属する行 (page, block, paragraph, line)
type LineKey = (u32, u32, u32, u32);

struct LineAccumulator {
    words: Vec<String>,
    bbox: BoundingBox,
    confidence_sum: f32,
}

impl LineAccumulator {
    fn finish(self) -> RecognizedText {
        let count = self.words.len() as f32;
        RecognizedText {
            bbox: self.bbox,
            text: self.words.join(" "),
            confidence: self.confidence_sum / count,
        }
    }
}

/// tesseractのTSV出力を行単位の認識断片に変換
///
/// 列: level page_num block_num par_num line_num word_num left top width height conf text
///
/// 単語行（level 5）のうち空でないものだけを採用し、同じ行の単語を空白で連結する。
/// 断片の順序は各行が最初に現れた順。ヘッダ行や列数の合わない行は読み飛ばす。
pub fn parse_tsv(tsv: &str) -> Vec<RecognizedText> {
    let mut lines: Vec<LineAccumulator> = Vec::new();
    let mut index: HashMap<LineKey, usize> = HashMap::new();

    for row in tsv.lines() {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < TSV_COLUMNS {
            continue;
        }

        let nums: Option<Vec<u32>> = cols[..10].iter().map(|c| c.trim().parse().ok()).collect();
        let Some(nums) = nums else {
            continue; // ヘッダ行
        };
        if nums[0] != WORD_LEVEL {
            continue;
        }

        let text = cols[TSV_COLUMNS - 1..].join("\t");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let key = (nums[1], nums[2], nums[3], nums[4]);
        let bbox = BoundingBox {
            left: nums[6],
            top: nums[7],
            width: nums[8],
            height: nums[9],
        };
        let confidence: f32 = cols[10].trim().parse().unwrap_or(0.0);

        match index.get(&key) {
            Some(&i) => {
                let line = &mut lines[i];
                line.words.push(text.to_string());
                line.bbox = line.bbox.union(&bbox);
                line.confidence_sum += confidence;
            }
            None => {
                index.insert(key, lines.len());
                lines.push(LineAccumulator {
                    words: vec![text.to_string()],
                    bbox,
                    confidence_sum: confidence,
                });
            }
        }
    }

    lines.into_iter().map(LineAccumulator::finish).collect()
}
