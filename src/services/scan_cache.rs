//! 卡图缓存 - 业务能力层
//!
//! 以地址为键，把下载过的卡图保存在磁盘上，同一次运行内再用内存表加速

use crate::clients::ScryfallClient;
use crate::error::{ApiError, AppError, AppResult};
use crate::services::ImageResolver;
use reqwest::Url;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// 磁盘卡图缓存
///
/// 解析结果是缓存文件的路径，多次引用同一张卡图时共享同一个 `Arc<Path>`。
pub struct ScanCache {
    client: Arc<ScryfallClient>,
    cache_dir: PathBuf,
    memory: Mutex<HashMap<String, Arc<Path>>>,
}

impl ScanCache {
    pub fn new(client: Arc<ScryfallClient>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
            memory: Mutex::new(HashMap::new()),
        }
    }

    /// 地址对应的缓存文件路径
    pub fn cache_path(&self, url: &str) -> AppResult<PathBuf> {
        Ok(self.cache_dir.join(cache_relative_path(url)?))
    }

    async fn fetch_into(&self, url: &str, path: &Path) -> AppResult<()> {
        let bytes = self.client.download(url).await?;
        if image::guess_format(&bytes).is_err() {
            return Err(ApiError::InvalidImage {
                url: url.to_string(),
            }
            .into());
        }

        let parent = path.parent().unwrap_or(self.cache_dir.as_path());
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;

        // 先写临时文件再改名，中断的下载不会留下半张图
        let tmp = path.with_file_name(format!(
            "{}.part",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| AppError::file_write_failed(tmp.display().to_string(), e))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("已缓存 {} ({} 字节)", path.display(), bytes.len());
        Ok(())
    }
}

impl ImageResolver for ScanCache {
    type Image = Arc<Path>;

    async fn get_image(&self, url: &str) -> AppResult<Arc<Path>> {
        if let Some(path) = self.memory.lock().await.get(url) {
            return Ok(Arc::clone(path));
        }

        let path = self.cache_path(url)?;
        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!("缓存命中: {}", path.display());
        } else {
            self.fetch_into(url, &path).await?;
        }

        let shared: Arc<Path> = Arc::from(path.as_path());
        self.memory
            .lock()
            .await
            .insert(url.to_string(), Arc::clone(&shared));
        Ok(shared)
    }
}

/// 根据地址生成缓存文件的相对路径（忽略查询串中的时间戳）
///
/// 主机名作为第一级目录，路径的每一段对应一级目录或文件名：
/// `https://cards.scryfall.io/png/front/6/d/abc.png?1562` → `cards.scryfall.io/png/front/6/d/abc.png`
pub fn cache_relative_path(url: &str) -> AppResult<PathBuf> {
    let parsed = Url::parse(url).map_err(|e| AppError::api_request_failed(url, e))?;

    let host = match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };

    let mut relative = PathBuf::from(escape_component(&host));
    if let Some(segments) = parsed.path_segments() {
        for segment in segments {
            relative.push(escape_component(segment));
        }
    }
    Ok(relative)
}

/// 把地址中的一段转换为安全的文件名，转换是可逆的，不同的段不会得到相同结果
///
/// 字母、数字和 `.-_` 保留，其余字节写成 `%XX`；空段写成单个 `%`，`.`/`..` 中的点也会转义。
fn escape_component(raw: &str) -> String {
    if raw.is_empty() {
        return "%".to_string();
    }
    let dots_only = raw.chars().all(|c| c == '.');

    let mut escaped = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        let keep = !dots_only
            && (byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-' | b'_'));
        if keep {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{:02X}", byte));
        }
    }
    escaped
}
