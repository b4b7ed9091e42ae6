//! Scryfall API 客户端
//!
//! 封装卡牌查询与卡图下载
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, DecklistError};
use crate::models::{CardFace, ImageUris};
use crate::utils::logging::truncate_text;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Scryfall 返回的卡牌对象（只保留需要的字段）
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallCard {
    pub name: String,
    #[serde(default)]
    pub lang: Option<String>,
    pub set: String,
    pub collector_number: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub card_faces: Vec<ScryfallFace>,
}

/// 多面卡的单个面
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallFace {
    pub name: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

#[derive(Debug, Deserialize)]
struct ScryfallList {
    #[serde(default)]
    data: Vec<ScryfallCard>,
}

impl ScryfallCard {
    /// 按顺序提取可打印的卡面
    ///
    /// 单面卡（以及分割卡、冒险卡）在顶层带有 `image_uris`，
    /// 双面卡则每个面各自带有 `image_uris`。
    pub fn printable_faces(&self) -> AppResult<Vec<CardFace>> {
        if let Some(uris) = &self.image_uris {
            return Ok(vec![CardFace::new(self.name.clone(), uris.clone())]);
        }

        let faces: Vec<CardFace> = self
            .card_faces
            .iter()
            .filter_map(|face| {
                face.image_uris
                    .as_ref()
                    .map(|uris| CardFace::new(face.name.clone(), uris.clone()))
            })
            .collect();

        if faces.is_empty() {
            return Err(DecklistError::NoFaces {
                name: self.name.clone(),
            }
            .into());
        }
        Ok(faces)
    }
}

/// Scryfall 客户端
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
    request_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ScryfallClient {
    /// 创建新的 Scryfall 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json;q=0.9,*/*;q=0.8"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::api_request_failed(&config.scryfall_api_base_url, e))?;

        Ok(Self {
            http,
            base_url: config.scryfall_api_base_url.trim_end_matches('/').to_string(),
            request_delay: Duration::from_millis(config.request_delay_ms),
            last_request: Mutex::new(None),
        })
    }

    /// 按系列与收藏编号查询卡牌
    ///
    /// 先查询指定语言的版本，没有时退回默认（英文）版本。
    pub async fn card_by_print(
        &self,
        set: &str,
        collector_number: &str,
        lang: &str,
    ) -> AppResult<ScryfallCard> {
        let localized = format!("/cards/{}/{}/{}", set, collector_number, lang);
        if let Some(card) = self.get_json::<ScryfallCard>(&localized, &[]).await? {
            return Ok(card);
        }

        debug!("没有 {} 语言版本，改用默认版本: {} {}", lang, set, collector_number);
        let fallback = format!("/cards/{}/{}", set, collector_number);
        self.get_json::<ScryfallCard>(&fallback, &[])
            .await?
            .ok_or_else(|| {
                ApiError::CardNotFound {
                    query: format!("{} #{}", set, collector_number),
                }
                .into()
            })
    }

    /// 按卡名查询卡牌，可限定系列
    ///
    /// 先按语言搜索印刷版本，没有结果时按英文名精确查询。
    pub async fn card_by_name(
        &self,
        name: &str,
        set: Option<&str>,
        lang: &str,
    ) -> AppResult<ScryfallCard> {
        let mut query = format!("!\"{}\" lang:{}", name, lang);
        if let Some(set) = set {
            query.push_str(&format!(" set:{}", set));
        }
        let found = self
            .get_json::<ScryfallList>("/cards/search", &[("q", query.as_str()), ("unique", "prints")])
            .await?
            .and_then(|list| list.data.into_iter().next());
        if let Some(card) = found {
            return Ok(card);
        }

        debug!("没有 {} 语言版本，改用英文名查询: {}", lang, name);
        let mut named = vec![("exact", name)];
        if let Some(set) = set {
            named.push(("set", set));
        }
        self.get_json::<ScryfallCard>("/cards/named", &named)
            .await?
            .ok_or_else(|| {
                ApiError::CardNotFound {
                    query: name.to_string(),
                }
                .into()
            })
    }

    /// 下载原始图片数据（图片 CDN 不受 API 频率限制）
    pub async fn download(&self, url: &str) -> AppResult<Vec<u8>> {
        debug!("下载卡图: {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;
        Ok(bytes.to_vec())
    }

    /// 发送 GET 请求，404 视为 `None`
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Option<T>> {
        self.throttle().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: url,
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;
        debug!("响应: {}", truncate_text(&body, 200));

        Ok(Some(serde_json::from_str(&body)?))
    }

    /// 保证两次 API 请求之间至少间隔 `request_delay`
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            let elapsed = at.elapsed();
            if elapsed < self.request_delay {
                sleep(self.request_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
