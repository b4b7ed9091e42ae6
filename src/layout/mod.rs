//! 排版参数与页面几何
//!
//! 所有长度以英寸为单位，坐标原点在页面左上角。

pub mod color;
pub mod grid;
pub mod paper;

pub use color::Color;
pub use grid::{Grid, Segment, Slot};
pub use paper::{CardSize, PaperSize};

/// 渲染一个卡图序列所需的全部排版参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub paper: PaperSize,
    pub card: CardSize,
    /// 每张卡图四边裁掉的像素
    pub border_crop: u32,
    /// 卡牌背后的底色，`None` 表示不填充
    pub background: Option<Color>,
    pub cropmarks: bool,
    /// 位图输出的分辨率
    pub dpi: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::a4(),
            card: CardSize {
                width: 2.5,
                height: 3.5,
            },
            border_crop: 14,
            background: None,
            cropmarks: true,
            dpi: 300,
        }
    }
}
