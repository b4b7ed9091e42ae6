use super::scan::ScanLibrary;
use super::RenderedFile;
use crate::error::{AppError, AppResult, RenderError};
use crate::layout::{Color, Grid, LayoutConfig, Segment};
use crate::orchestrator::output::numbered_sibling;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// 位图排版渲染
///
/// 每页输出一张图片；只有一页时沿用输出路径，多页时为 `stem_001.png`、`stem_002.png` ……
pub struct RasterRenderer {
    layout: LayoutConfig,
}

/// 目标像素区域
#[derive(Debug, Clone, Copy)]
struct PixelRect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl RasterRenderer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// 输出路径对应的图片格式，只支持 png 与 jpg
    pub fn output_format(output: &Path) -> AppResult<ImageFormat> {
        match ImageFormat::from_path(output) {
            Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(format),
            _ => Err(RenderError::UnsupportedFormat {
                path: output.display().to_string(),
            }
            .into()),
        }
    }

    pub fn render<P: AsRef<Path>>(
        &self,
        images: &[P],
        output: &Path,
    ) -> AppResult<Vec<RenderedFile>> {
        let format = Self::output_format(output)?;
        let grid = Grid::new(self.layout.paper, self.layout.card)?;
        let page_count = grid.page_count(images.len());

        let page_width = self.px(grid.paper.width).max(1);
        let page_height = self.px(grid.paper.height).max(1);
        let mut pages: Vec<RgbImage> = (0..page_count)
            .map(|_| RgbImage::from_pixel(page_width, page_height, to_rgb(Color::WHITE)))
            .collect();

        let mut library = ScanLibrary::new(self.layout.border_crop);
        let mut resized: HashMap<PathBuf, (RgbImage, u32, u32)> = HashMap::new();

        for (index, image) in images.iter().enumerate() {
            let path = image.as_ref();
            let slot = grid.slot(index);
            let cell = PixelRect {
                x: self.px(slot.x),
                y: self.px(slot.y),
                width: self.px(grid.card.width).max(1),
                height: self.px(grid.card.height).max(1),
            };
            let page = &mut pages[slot.page];

            if let Some(color) = self.layout.background {
                fill_rect(page, cell, to_rgb(color));
            }

            if !resized.contains_key(path) {
                let scan = library.load(path)?;
                let dx = (f64::from(cell.width) * scan.inset_x).round() as u32;
                let dy = (f64::from(cell.height) * scan.inset_y).round() as u32;
                let width = cell.width.saturating_sub(2 * dx).max(1);
                let height = cell.height.saturating_sub(2 * dy).max(1);
                let card = imageops::resize(&scan.image, width, height, FilterType::Triangle);
                resized.insert(path.to_path_buf(), (card, dx, dy));
            }
            if let Some((card, dx, dy)) = resized.get(path) {
                imageops::overlay(
                    page,
                    card,
                    i64::from(cell.x + dx),
                    i64::from(cell.y + dy),
                );
            }
        }

        if self.layout.cropmarks {
            let thickness = (self.layout.dpi / 150).max(1);
            for page in pages.iter_mut() {
                for mark in grid.crop_marks() {
                    self.draw_segment(page, mark, thickness);
                }
            }
        }

        let paths = page_paths(output, page_count);
        pages
            .into_iter()
            .zip(paths)
            .map(|(page, path)| -> AppResult<RenderedFile> {
                let mut bytes = Vec::new();
                DynamicImage::ImageRgb8(page)
                    .write_to(&mut Cursor::new(&mut bytes), format)
                    .map_err(AppError::encode_failed)?;
                Ok(RenderedFile { path, bytes })
            })
            .collect()
    }

    fn px(&self, inches: f64) -> u32 {
        (inches * f64::from(self.layout.dpi)).round().max(0.0) as u32
    }

    /// 只处理水平或竖直线段
    fn draw_segment(&self, page: &mut RgbImage, mark: Segment, thickness: u32) {
        let x1 = self.px(mark.x1.min(mark.x2));
        let x2 = self.px(mark.x1.max(mark.x2));
        let y1 = self.px(mark.y1.min(mark.y2));
        let y2 = self.px(mark.y1.max(mark.y2));

        let rect = if x1 == x2 {
            PixelRect {
                x: x1.saturating_sub(thickness / 2),
                y: y1,
                width: thickness,
                height: y2 - y1,
            }
        } else {
            PixelRect {
                x: x1,
                y: y1.saturating_sub(thickness / 2),
                width: x2 - x1,
                height: thickness,
            }
        };
        fill_rect(page, rect, to_rgb(Color::BLACK));
    }
}

fn to_rgb(color: Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}

fn fill_rect(page: &mut RgbImage, rect: PixelRect, color: Rgb<u8>) {
    let x_end = (rect.x + rect.width).min(page.width());
    let y_end = (rect.y + rect.height).min(page.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            page.put_pixel(x, y, color);
        }
    }
}

/// 多页位图的文件名
fn page_paths(output: &Path, page_count: usize) -> Vec<PathBuf> {
    if page_count == 1 {
        return vec![output.to_path_buf()];
    }
    (1..=page_count)
        .map(|page| numbered_sibling(output, &format!("{:03}", page)))
        .collect()
}
