use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API / 网络相关错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 卡表解析错误
    #[error("卡表错误: {0}")]
    Decklist(#[from] DecklistError),
    /// 排版参数错误
    #[error("排版错误: {0}")]
    Layout(#[from] LayoutError),
    /// 渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: BoxedSource,
    },
    /// 服务端返回非成功状态码
    #[error("API返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 找不到对应的卡牌
    #[error("找不到卡牌: {query}")]
    CardNotFound { query: String },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: BoxedSource,
    },
    /// 下载内容不是可识别的图片
    #[error("下载内容不是有效图片: {url}")]
    InvalidImage { url: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
}

/// 卡表错误
#[derive(Debug, Error)]
pub enum DecklistError {
    /// 无法识别的行
    #[error("第 {line_no} 行无法解析: {line}")]
    InvalidLine { line_no: usize, line: String },
    /// 数量必须为正整数
    #[error("第 {line_no} 行的数量必须大于 0")]
    InvalidCount { line_no: usize },
    /// 不支持的卡表来源
    #[error("不支持的卡表来源: {spec}")]
    UnsupportedSource { spec: String },
    /// 卡牌没有任何可打印的面
    #[error("卡牌没有可用的图片: {name}")]
    NoFaces { name: String },
}

/// 排版参数错误
#[derive(Debug, Error)]
pub enum LayoutError {
    /// 纸张尺寸格式错误
    #[error("无效的纸张尺寸 '{value}'，应为 a4 或 宽x高（英寸）")]
    InvalidPaperSize { value: String },
    /// 颜色无法解析
    #[error("无效的颜色: {value}")]
    InvalidColor { value: String },
    /// 缩放比例必须为正数
    #[error("无效的缩放比例: {value}")]
    InvalidScale { value: f64 },
    /// 卡牌尺寸大于纸张
    #[error("卡牌尺寸 {card_width:.2}x{card_height:.2} 超出纸张 {paper_width:.2}x{paper_height:.2}")]
    CardTooLarge {
        card_width: f64,
        card_height: f64,
        paper_width: f64,
        paper_height: f64,
    },
}

/// 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 图片加载失败
    #[error("无法加载图片 ({path}): {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 输出编码失败
    #[error("输出编码失败: {source}")]
    Encode {
        #[source]
        source: BoxedSource,
    },
    /// 不支持的输出格式
    #[error("不支持的输出格式: {path}")]
    UnsupportedFormat { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    ConfigFileNotFound { path: String },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建图片加载错误
    pub fn image_load_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Render(RenderError::ImageLoad {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建编码错误
    pub fn encode_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Render(RenderError::Encode {
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
