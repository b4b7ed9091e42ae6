//! 卡表服务 - 业务能力层
//!
//! 读取卡表并为每个条目查询卡面图片地址

use crate::clients::{ScryfallCard, ScryfallClient};
use crate::error::{AppResult, DecklistError};
use crate::models::{load_decklist_file, CardEntry, Decklist, DecklistLine};
use crate::utils::logging::log_card_progress;
use std::path::Path;
use std::sync::Arc;

/// 暂不支持的在线卡表来源前缀
const REMOTE_SOURCES: &[&str] = &["manastack", "archidekt"];

/// 卡表服务
///
/// 职责：
/// - 把卡表说明（文件路径）转换为有序的 `Decklist`
/// - 保持卡表中的顺序与数量
/// - 为每个条目查询所有卡面的图片地址
pub struct DecklistService {
    client: Arc<ScryfallClient>,
}

impl DecklistService {
    pub fn new(client: Arc<ScryfallClient>) -> Self {
        Self { client }
    }

    /// 解析卡表
    ///
    /// # 参数
    /// - `spec`: 卡表文件路径
    /// - `lang`: 卡图语言代码（例如 `fr`）
    pub async fn parse(&self, spec: &str, lang: &str) -> AppResult<Decklist> {
        if is_remote_spec(spec) {
            return Err(DecklistError::UnsupportedSource {
                spec: spec.to_string(),
            }
            .into());
        }

        let lines = load_decklist_file(Path::new(spec)).await?;
        let total = lines.len();

        let mut cards = Vec::with_capacity(total);
        for (index, line) in lines.iter().enumerate() {
            let card = self.lookup(line, lang).await?;
            let entry = entry_from_card(line, card)?;
            log_card_progress(index + 1, total, &entry.name, entry.faces.len());
            cards.push(entry);
        }

        Ok(Decklist::new(cards))
    }

    async fn lookup(&self, line: &DecklistLine, lang: &str) -> AppResult<ScryfallCard> {
        match (&line.set, &line.collector_number) {
            (Some(set), Some(number)) => self.client.card_by_print(set, number, lang).await,
            (set, _) => {
                self.client
                    .card_by_name(&line.name, set.as_deref(), lang)
                    .await
            }
        }
    }
}

/// `manastack:123` 这类在线来源
fn is_remote_spec(spec: &str) -> bool {
    spec.split_once(':')
        .map(|(source, _)| REMOTE_SOURCES.contains(&source.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// 用卡表行的数量和查询到的卡牌组成条目
pub fn entry_from_card(line: &DecklistLine, card: ScryfallCard) -> AppResult<CardEntry> {
    let faces = card.printable_faces()?;
    Ok(CardEntry::new(line.count, card.name, faces).with_print(card.set, card.collector_number))
}
