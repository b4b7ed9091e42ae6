//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `scan_orchestrator` - 卡图编排
//! - 按卡表顺序、卡面顺序解析卡图
//! - 按数量复制解析结果
//! - 合并为一个序列，或按卡面拆分为多个序列
//!
//! ### `output` - 输出命名
//! - 第一个序列使用原路径，之后的序列加序号
//!
//! ### `sheet_processor` - 打印任务
//! - 持有客户端与缓存
//! - 串联 卡表 → 卡图 → 排版 → 写盘
//!
//! ## 层次关系
//!
//! ```text
//! sheet_processor (一次打印任务)
//!     ↓
//! scan_orchestrator (Decklist → Vec<OutputSequence>)
//!     ↓
//! services (能力层：decklist / image resolver)
//!     ↓
//! clients (Scryfall HTTP)
//! ```

pub mod output;
pub mod scan_orchestrator;
pub mod sheet_processor;

pub use output::{output_file_name, output_file_names};
pub use scan_orchestrator::{resolve, OutputSequence};
pub use sheet_processor::App;
