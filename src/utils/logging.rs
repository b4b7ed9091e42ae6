//! 日志工具模块
//!
//! 提供日志初始化以及运行过程中的格式化输出
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 info 或 debug。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(decklist_spec: &str, output: &Path, separate: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 卡牌代理打印");
    info!(
        "开始时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📋 卡表: {}", decklist_spec);
    info!("📄 输出: {}", output.display());
    if separate {
        info!("🔀 按卡面分开输出");
    }
    info!("{}", "=".repeat(60));
}

/// 记录卡表加载信息
///
/// # 参数
/// - `entries`: 卡表条目数
/// - `total_cards`: 实际张数（按数量展开）
pub fn log_decklist_loaded(entries: usize, total_cards: u64) {
    info!("✓ 卡表共 {} 个条目，{} 张卡", entries, total_cards);
}

/// 记录卡牌查询进度
pub fn log_card_progress(index: usize, total: usize, name: &str, faces: usize) {
    info!("[{}/{}] 查询卡牌: {} ({} 面)", index, total, name, faces);
}

/// 记录卡图获取进度
pub fn log_scan_progress(index: usize, total: usize, name: &str) {
    info!("[{}/{}] 🖼️ 获取卡图: {}", index, total, name);
}

/// 记录单个输出序列写入完成
pub fn log_sequence_written(index: usize, path: &Path, images: usize) {
    info!(
        "[序列 {}] ✓ 已写入 {} ({} 张卡图)",
        index,
        path.display(),
        images
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `sequences`: 输出序列数量
/// - `files`: 写入的文件列表
pub fn print_final_stats(sequences: usize, files: &[impl AsRef<Path>]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🗂️ 输出序列: {}", sequences);
    if files.is_empty() {
        warn!("⚠️ 没有生成任何文件");
    }
    for file in files {
        info!("✅ {}", file.as_ref().display());
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
