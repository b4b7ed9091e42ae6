use serde::{Deserialize, Serialize};

/// 单个卡面可用的图片地址
///
/// 排版只使用 `png`，其余尺寸保留下来方便调试与扩展。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    pub png: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_crop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_crop: Option<String>,
}

impl ImageUris {
    /// 只有 png 地址的卡面
    pub fn png(url: impl Into<String>) -> Self {
        Self {
            png: url.into(),
            large: None,
            normal: None,
            small: None,
            art_crop: None,
            border_crop: None,
        }
    }
}

/// 卡牌的一个可打印面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    pub image_uris: ImageUris,
}

impl CardFace {
    pub fn new(name: impl Into<String>, image_uris: ImageUris) -> Self {
        Self {
            name: name.into(),
            image_uris,
        }
    }
}

/// 卡表中的一个条目
///
/// 条目在卡表中的位置决定打印顺序，同名卡可以出现多次。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEntry {
    /// 打印张数，由卡表来源保证大于 0
    pub count: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
    /// 按顺序排列的卡面（双面卡为正面、背面）
    pub faces: Vec<CardFace>,
}

impl CardEntry {
    pub fn new(count: u32, name: impl Into<String>, faces: Vec<CardFace>) -> Self {
        Self {
            count,
            name: name.into(),
            set: None,
            collector_number: None,
            faces,
        }
    }

    /// 附加系列与收藏编号
    pub fn with_print(mut self, set: impl Into<String>, collector_number: impl Into<String>) -> Self {
        self.set = Some(set.into());
        self.collector_number = Some(collector_number.into());
        self
    }
}

/// 有序卡表，顺序即打印顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decklist {
    pub cards: Vec<CardEntry>,
}

impl Decklist {
    pub fn new(cards: Vec<CardEntry>) -> Self {
        Self { cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 按数量展开后的卡牌总张数（不区分卡面）
    pub fn total_count(&self) -> u64 {
        self.cards.iter().map(|card| u64::from(card.count)).sum()
    }

    /// 所有条目中最多的卡面数
    pub fn max_faces(&self) -> usize {
        self.cards
            .iter()
            .map(|card| card.faces.len())
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<CardEntry> for Decklist {
    fn from_iter<T: IntoIterator<Item = CardEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
