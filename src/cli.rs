use crate::error::AppResult;
use crate::layout::{CardSize, Color, LayoutConfig, PaperSize};
use clap::Parser;
use std::path::PathBuf;

/// 把卡表排版为可打印的代理卡页面
#[derive(Parser, Debug, Clone)]
#[command(name = "mtgproxies", version)]
#[command(about = "Prepare a decklist for printing.", long_about = None)]
pub struct Cli {
    /// 卡表文件路径（文本 / Arena 格式）
    #[arg(value_name = "DECKLIST_SPEC")]
    pub decklist: String,

    /// 输出文件，支持 pdf、png 和 jpg
    pub outfile: PathBuf,

    /// 位图输出的分辨率
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,

    /// 纸张尺寸：a4 或 宽x高（英寸）
    #[arg(long, default_value = "a4", value_name = "WIDTHxHEIGHT", value_parser = parse_paper)]
    pub paper: PaperSize,

    /// 卡牌缩放比例
    #[arg(long, default_value_t = 1.0, value_name = "FLOAT", value_parser = parse_scale)]
    pub scale: f64,

    /// 每张卡图四边裁掉的像素
    #[arg(long = "border_crop", default_value_t = 14, value_name = "PIXELS")]
    pub border_crop: u32,

    /// 背景色，颜色名或十六进制（例如 black 或 "#ff0000"）
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    pub background: Option<Color>,

    /// 所有卡牌使用的语言代码
    #[arg(long, default_value = "fr")]
    pub lang: String,

    /// 添加裁切线（默认）
    #[arg(long = "cropmarks", overrides_with = "no_cropmarks")]
    cropmarks: bool,

    /// 不添加裁切线
    #[arg(long = "no-cropmarks", overrides_with = "cropmarks")]
    no_cropmarks: bool,

    /// 按卡面分别输出文件，文件名为 <outfile>_<序号>.<扩展名>
    #[arg(long, overrides_with = "no_separate")]
    separate: bool,

    /// 所有卡面输出到同一个文件（默认）
    #[arg(long = "no-separate", overrides_with = "separate")]
    no_separate: bool,

    /// 详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn cropmarks(&self) -> bool {
        !self.no_cropmarks
    }

    pub fn separate(&self) -> bool {
        self.separate && !self.no_separate
    }

    /// 组装排版参数
    pub fn layout(&self) -> AppResult<LayoutConfig> {
        Ok(LayoutConfig {
            paper: self.paper,
            card: CardSize::standard(self.scale)?,
            border_crop: self.border_crop,
            background: self.background,
            cropmarks: self.cropmarks(),
            dpi: self.dpi,
        })
    }
}

fn parse_paper(value: &str) -> Result<PaperSize, String> {
    PaperSize::parse(value).map_err(|e| e.to_string())
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::parse(value).map_err(|e| e.to_string())
}

fn parse_scale(value: &str) -> Result<f64, String> {
    let scale: f64 = value.parse().map_err(|_| format!("无效的缩放比例: {}", value))?;
    CardSize::standard(scale)
        .map(|_| scale)
        .map_err(|e| e.to_string())
}
