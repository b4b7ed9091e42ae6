use crate::error::{AppResult, LayoutError};
use phf::phf_map;

/// RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// 常用 CSS 颜色名
static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "black" => (0, 0, 0),
    "white" => (255, 255, 255),
    "red" => (255, 0, 0),
    "green" => (0, 128, 0),
    "lime" => (0, 255, 0),
    "blue" => (0, 0, 255),
    "yellow" => (255, 255, 0),
    "cyan" => (0, 255, 255),
    "aqua" => (0, 255, 255),
    "magenta" => (255, 0, 255),
    "fuchsia" => (255, 0, 255),
    "gray" => (128, 128, 128),
    "grey" => (128, 128, 128),
    "darkgray" => (169, 169, 169),
    "darkgrey" => (169, 169, 169),
    "dimgray" => (105, 105, 105),
    "dimgrey" => (105, 105, 105),
    "lightgray" => (211, 211, 211),
    "lightgrey" => (211, 211, 211),
    "silver" => (192, 192, 192),
    "gainsboro" => (220, 220, 220),
    "whitesmoke" => (245, 245, 245),
    "maroon" => (128, 0, 0),
    "darkred" => (139, 0, 0),
    "brown" => (165, 42, 42),
    "firebrick" => (178, 34, 34),
    "crimson" => (220, 20, 60),
    "orange" => (255, 165, 0),
    "darkorange" => (255, 140, 0),
    "gold" => (255, 215, 0),
    "olive" => (128, 128, 0),
    "navy" => (0, 0, 128),
    "darkblue" => (0, 0, 139),
    "royalblue" => (65, 105, 225),
    "skyblue" => (135, 206, 235),
    "teal" => (0, 128, 128),
    "darkgreen" => (0, 100, 0),
    "forestgreen" => (34, 139, 34),
    "purple" => (128, 0, 128),
    "indigo" => (75, 0, 130),
    "violet" => (238, 130, 238),
    "pink" => (255, 192, 203),
    "beige" => (245, 245, 220),
    "ivory" => (255, 255, 240),
    "tan" => (210, 180, 140),
    "chocolate" => (210, 105, 30),
    "sienna" => (160, 82, 45),
    "slategray" => (112, 128, 144),
    "slategrey" => (112, 128, 144),
};

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// 解析颜色名或十六进制（`#rgb` / `#rrggbb`）
    pub fn parse(value: &str) -> AppResult<Self> {
        let spec = value.trim().to_lowercase();
        let invalid = || LayoutError::InvalidColor {
            value: value.to_string(),
        };

        if let Some(hex) = spec.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(|| invalid().into());
        }

        NAMED_COLORS
            .get(spec.as_str())
            .map(|&(r, g, b)| Self { r, g, b })
            .ok_or_else(|| invalid().into())
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let digit = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            6 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => None,
        }
    }

    /// PDF 使用 0..1 的分量
    pub fn to_unit_rgb(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}
