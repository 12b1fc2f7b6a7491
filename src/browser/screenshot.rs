use crate::error::Result;
use image::ImageFormat;
use std::path::Path;

/// スクリーンショット（PNGバイト列）を保存
///
/// `grayscale` 指定時はOCR向けにグレースケール化してから書き出す。
pub fn write_screenshot(png: &[u8], path: &Path, grayscale: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if grayscale {
        let img = image::load_from_memory_with_format(png, ImageFormat::Png)?;
        img.grayscale().save_with_format(path, ImageFormat::Png)?;
    } else {
        std::fs::write(path, png)?;
    }

    Ok(())
}
