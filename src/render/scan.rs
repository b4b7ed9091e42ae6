use crate::error::{AppError, AppResult};
use image::{imageops, RgbImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 已裁边的卡图
#[derive(Debug)]
pub struct CroppedScan {
    pub image: RgbImage,
    /// 裁掉部分占原图宽、高的比例（单边）
    pub inset_x: f64,
    pub inset_y: f64,
}

impl CroppedScan {
    /// 从原图四边各裁掉 `border_crop` 像素；裁掉后不剩内容时保留原图
    pub fn from_image(image: RgbImage, border_crop: u32) -> Self {
        let (width, height) = image.dimensions();
        let trimmed = border_crop.saturating_mul(2);
        if border_crop == 0 || trimmed >= width || trimmed >= height {
            return Self {
                image,
                inset_x: 0.0,
                inset_y: 0.0,
            };
        }

        let cropped = imageops::crop_imm(
            &image,
            border_crop,
            border_crop,
            width - 2 * border_crop,
            height - 2 * border_crop,
        )
        .to_image();

        Self {
            image: cropped,
            inset_x: f64::from(border_crop) / f64::from(width),
            inset_y: f64::from(border_crop) / f64::from(height),
        }
    }
}

/// 同一文档内按路径复用已解码的卡图
pub struct ScanLibrary {
    border_crop: u32,
    loaded: HashMap<PathBuf, Arc<CroppedScan>>,
}

impl ScanLibrary {
    pub fn new(border_crop: u32) -> Self {
        Self {
            border_crop,
            loaded: HashMap::new(),
        }
    }

    pub fn load(&mut self, path: &Path) -> AppResult<Arc<CroppedScan>> {
        if let Some(scan) = self.loaded.get(path) {
            return Ok(Arc::clone(scan));
        }

        let image = image::open(path)
            .map_err(|e| AppError::image_load_failed(path.display().to_string(), e))?
            .to_rgb8();
        let scan = Arc::new(CroppedScan::from_image(image, self.border_crop));
        self.loaded.insert(path.to_path_buf(), Arc::clone(&scan));
        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn crops_every_edge() {
        let image = RgbImage::from_pixel(100, 140, Rgb([1, 2, 3]));
        let scan = CroppedScan::from_image(image, 10);
        assert_eq!(scan.image.dimensions(), (80, 120));
        assert!((scan.inset_x - 0.1).abs() < 1e-9);
        assert!((scan.inset_y - 10.0 / 140.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_crop_keeps_original() {
        let image = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let scan = CroppedScan::from_image(image, 5);
        assert_eq!(scan.image.dimensions(), (10, 10));
        assert_eq!(scan.inset_x, 0.0);
    }
}
