use super::{CardSize, PaperSize};
use crate::error::{AppResult, LayoutError};

/// 卡牌在页面上的位置（英寸，原点在左上角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub page: usize,
    pub x: f64,
    pub y: f64,
}

/// 轴对齐线段（英寸，原点在左上角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// 页面网格：尽可能多地排列卡牌，并整体居中
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub paper: PaperSize,
    pub card: CardSize,
    pub cols: usize,
    pub rows: usize,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Grid {
    pub fn new(paper: PaperSize, card: CardSize) -> AppResult<Self> {
        let cols = (paper.width / card.width).floor() as usize;
        let rows = (paper.height / card.height).floor() as usize;

        if cols == 0 || rows == 0 {
            return Err(LayoutError::CardTooLarge {
                card_width: card.width,
                card_height: card.height,
                paper_width: paper.width,
                paper_height: paper.height,
            }
            .into());
        }

        Ok(Self {
            paper,
            card,
            cols,
            rows,
            origin_x: (paper.width - cols as f64 * card.width) / 2.0,
            origin_y: (paper.height - rows as f64 * card.height) / 2.0,
        })
    }

    pub fn per_page(&self) -> usize {
        self.cols * self.rows
    }

    /// 排下 `count` 张卡需要的页数，空序列也输出一页空白页
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.per_page()).max(1)
    }

    /// 第 `index` 张卡的位置（逐行从左到右）
    pub fn slot(&self, index: usize) -> Slot {
        let page = index / self.per_page();
        let within = index % self.per_page();
        let col = within % self.cols;
        let row = within / self.cols;

        Slot {
            page,
            x: self.origin_x + col as f64 * self.card.width,
            y: self.origin_y + row as f64 * self.card.height,
        }
    }

    /// 裁切线：网格线延伸到页边空白处
    pub fn crop_marks(&self) -> Vec<Segment> {
        let right = self.origin_x + self.cols as f64 * self.card.width;
        let bottom = self.origin_y + self.rows as f64 * self.card.height;
        let mut marks = Vec::new();

        for col in 0..=self.cols {
            let x = self.origin_x + col as f64 * self.card.width;
            marks.push(Segment { x1: x, y1: 0.0, x2: x, y2: self.origin_y });
            marks.push(Segment { x1: x, y1: bottom, x2: x, y2: self.paper.height });
        }
        for row in 0..=self.rows {
            let y = self.origin_y + row as f64 * self.card.height;
            marks.push(Segment { x1: 0.0, y1: y, x2: self.origin_x, y2: y });
            marks.push(Segment { x1: right, y1: y, x2: self.paper.width, y2: y });
        }

        marks.retain(|s| (s.x2 - s.x1).abs() + (s.y2 - s.y1).abs() > f64::EPSILON);
        marks
    }
}
