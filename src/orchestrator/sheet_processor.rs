//! 打印任务处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次打印任务的资源管理与流程调度。
//!
//! ## 核心流程
//!
//! 1. **卡表加载**：委托 `DecklistService` 把卡表转换为有序 `Decklist`
//! 2. **卡图解析**：委托 `scan_orchestrator::resolve` 得到一个或多个卡图序列
//! 3. **排版渲染**：每个序列在阻塞线程池中渲染，只在内存中生成文件
//! 4. **统一写盘**：所有序列都渲染成功后才写入文件，失败时不留下部分输出

use crate::cli::Cli;
use crate::clients::ScryfallClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::layout::LayoutConfig;
use crate::orchestrator::output::output_file_name;
use crate::orchestrator::scan_orchestrator::{resolve, OutputSequence};
use crate::render::{render_sheets, RenderedFile};
use crate::services::{DecklistService, ScanCache};
use crate::utils::logging::{
    log_decklist_loaded, log_sequence_written, log_startup, print_final_stats,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// 应用主结构
pub struct App {
    cli: Cli,
    decklists: DecklistService,
    scans: ScanCache,
}

/// 单个序列的渲染结果
#[derive(Debug)]
struct RenderedSequence {
    index: usize,
    images: usize,
    files: Vec<RenderedFile>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config, cli: Cli) -> Result<Self> {
        debug!("配置: {:?}", config);

        let client = Arc::new(ScryfallClient::new(&config)?);
        fs::create_dir_all(&config.cache_dir)
            .await
            .with_context(|| format!("无法创建缓存目录: {}", config.cache_dir.display()))?;

        Ok(Self {
            decklists: DecklistService::new(Arc::clone(&client)),
            scans: ScanCache::new(client, config.cache_dir.clone()),
            cli,
        })
    }

    /// 运行应用主逻辑，返回写入的文件
    pub async fn run(&self) -> Result<Vec<PathBuf>> {
        log_startup(&self.cli.decklist, &self.cli.outfile, self.cli.separate());

        // 排版参数在联网前校验
        let layout = self.cli.layout()?;

        let decklist = self
            .decklists
            .parse(&self.cli.decklist, &self.cli.lang)
            .await
            .with_context(|| format!("无法读取卡表: {}", self.cli.decklist))?;

        if decklist.is_empty() {
            warn!("⚠️ 卡表为空");
        }
        log_decklist_loaded(decklist.cards.len(), decklist.total_count());

        info!("\n🖼️ 正在获取卡图...");
        let sequences = resolve(&decklist, &self.scans, self.cli.separate())
            .await
            .context("获取卡图失败")?;

        let sequence_count = sequences.len();
        let written = render_and_write(sequences, self.cli.outfile.clone(), layout).await?;
        print_final_stats(sequence_count, &written);

        Ok(written)
    }
}

/// 在阻塞线程池中渲染全部序列，全部成功后才写盘
async fn render_and_write(
    sequences: Vec<OutputSequence<Arc<Path>>>,
    base: PathBuf,
    layout: LayoutConfig,
) -> Result<Vec<PathBuf>> {
    let rendered = tokio::task::spawn_blocking(move || render_all(&sequences, &base, &layout))
        .await
        .context("渲染任务异常退出")??;

    Ok(write_all(&rendered).await?)
}

/// 渲染全部序列，任何一个失败都不产生输出
fn render_all(
    sequences: &[OutputSequence<Arc<Path>>],
    base: &Path,
    layout: &LayoutConfig,
) -> AppResult<Vec<RenderedSequence>> {
    sequences
        .iter()
        .enumerate()
        .map(|(index, images)| -> AppResult<RenderedSequence> {
            let output = output_file_name(index, base);
            info!(
                "[序列 {}] 📄 排版 {} 张卡图 → {}",
                index + 1,
                images.len(),
                output.display()
            );
            Ok(RenderedSequence {
                index,
                images: images.len(),
                files: render_sheets(images, &output, layout)?,
            })
        })
        .collect()
}

async fn write_all(rendered: &[RenderedSequence]) -> AppResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    for sequence in rendered {
        for file in &sequence.files {
            if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
            }
            fs::write(&file.path, &file.bytes)
                .await
                .map_err(|e| AppError::file_write_failed(file.path.display().to_string(), e))?;
            log_sequence_written(sequence.index + 1, &file.path, sequence.images);
            written.push(file.path.clone());
        }
    }

    Ok(written)
}
