//! # MTG Proxies
//!
//! 把卡表排版为可打印的代理卡页面
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - Scryfall HTTP 调用，负责频率限制
//!
//! ### ② 业务能力层（Services）
//! - `DecklistService` - 卡表 → 有序 `Decklist`
//! - `ImageResolver` / `ScanCache` - 图片地址 → 本地卡图（按地址缓存）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/scan_orchestrator` - 按数量复制、按卡面拆分卡图序列
//! - `orchestrator/sheet_processor` - 一次打印任务的完整流程
//!
//! ### ④ 排版层（Layout / Render）
//! - `layout/` - 纸张、卡牌尺寸、颜色与网格
//! - `render/` - PDF 与位图输出
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use cli::Cli;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CardEntry, CardFace, Decklist, ImageUris};
pub use orchestrator::{output_file_name, resolve, App, OutputSequence};
pub use services::{ImageResolver, ScanCache};
pub use utils::logging;
