use crate::error::{AppError, AppResult, ConfigError, FileError};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// Scryfall API 地址
    pub scryfall_api_base_url: String,
    /// 请求时使用的 User-Agent
    pub user_agent: String,
    /// 卡图缓存目录
    pub cache_dir: PathBuf,
    /// 两次 API 请求之间的最小间隔（毫秒）
    pub request_delay_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scryfall_api_base_url: "https://api.scryfall.com".to_string(),
            user_agent: format!("mtgproxies/{}", env!("CARGO_PKG_VERSION")),
            cache_dir: default_cache_dir(),
            request_delay_ms: 100,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件内容，所有字段都可以省略
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    scryfall_api_base_url: Option<String>,
    user_agent: Option<String>,
    cache_dir: Option<PathBuf>,
    request_delay_ms: Option<u64>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 按 "默认值 → MTGPROXIES_CONFIG 指定的文件 → 环境变量" 的顺序合并配置
    pub fn resolve() -> AppResult<Self> {
        let path = match std::env::var("MTGPROXIES_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => return Ok(Self::from_env()),
        };
        if !path.exists() {
            return Err(ConfigError::ConfigFileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        Ok(Self::load(&path)?.with_env())
    }

    /// 只读取环境变量
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::File(FileError::TomlParseFailed { source, .. }) => {
                AppError::File(FileError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: String::new(),
                source: Box::new(e),
            })
        })?;

        let default = Self::default();
        Ok(Self {
            scryfall_api_base_url: file
                .scryfall_api_base_url
                .unwrap_or(default.scryfall_api_base_url),
            user_agent: file.user_agent.unwrap_or(default.user_agent),
            cache_dir: file.cache_dir.unwrap_or(default.cache_dir),
            request_delay_ms: file.request_delay_ms.unwrap_or(default.request_delay_ms),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    fn with_env(self) -> Self {
        Self {
            scryfall_api_base_url: std::env::var("SCRYFALL_API_BASE_URL")
                .unwrap_or(self.scryfall_api_base_url),
            user_agent: std::env::var("MTGPROXIES_USER_AGENT").unwrap_or(self.user_agent),
            cache_dir: std::env::var("MTGPROXIES_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.cache_dir),
            request_delay_ms: std::env::var("SCRYFALL_REQUEST_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.request_delay_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("", "", "mtgproxies")
        .map(|dirs| dirs.cache_dir().join("scans"))
        .unwrap_or_else(|| PathBuf::from(".mtgproxies-cache"))
}
