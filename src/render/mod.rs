//! 排版渲染
//!
//! 根据输出扩展名选择 PDF 或位图渲染。渲染只在内存中进行，由调用方决定何时写盘。

pub mod pdf;
pub mod raster;
pub mod scan;

pub use pdf::PdfRenderer;
pub use raster::RasterRenderer;

use crate::error::AppResult;
use crate::layout::LayoutConfig;
use std::path::{Path, PathBuf};

/// 渲染完成、尚未写盘的文件
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// 输出是否为 PDF（扩展名不区分大小写）
pub fn is_pdf(output: &Path) -> bool {
    output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// 把一个卡图序列排版为一个或多个文件
pub fn render_sheets<P: AsRef<Path>>(
    images: &[P],
    output: &Path,
    layout: &LayoutConfig,
) -> AppResult<Vec<RenderedFile>> {
    if is_pdf(output) {
        let bytes = PdfRenderer::new(*layout).render(images)?;
        Ok(vec![RenderedFile {
            path: output.to_path_buf(),
            bytes,
        }])
    } else {
        RasterRenderer::new(*layout).render(images, output)
    }
}
