use crate::error::{AppResult, LayoutError};

const CM_PER_INCH: f64 = 2.54;

/// 纸张尺寸（英寸）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub width: f64,
    pub height: f64,
}

impl PaperSize {
    pub fn a4() -> Self {
        Self {
            width: 21.0 / CM_PER_INCH,
            height: 29.7 / CM_PER_INCH,
        }
    }

    /// 解析 `a4` 或 `宽x高`（英寸），不区分大小写
    pub fn parse(value: &str) -> AppResult<Self> {
        let spec = value.trim().to_lowercase();
        if spec == "a4" {
            return Ok(Self::a4());
        }

        let invalid = || LayoutError::InvalidPaperSize {
            value: value.to_string(),
        };

        let (width, height) = spec.split_once('x').ok_or_else(invalid)?;
        let width: f64 = width.trim().parse().map_err(|_| invalid())?;
        let height: f64 = height.trim().parse().map_err(|_| invalid())?;

        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(invalid().into());
        }
        Ok(Self { width, height })
    }
}

/// 单张卡牌的打印尺寸（英寸）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

impl CardSize {
    /// 标准卡牌 2.5x3.5 英寸，乘以缩放比例
    pub fn standard(scale: f64) -> AppResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LayoutError::InvalidScale { value: scale }.into());
        }
        Ok(Self {
            width: 2.5 * scale,
            height: 3.5 * scale,
        })
    }
}
