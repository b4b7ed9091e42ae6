//! 卡图编排器 - 编排层
//!
//! ## 职责
//!
//! 把有序卡表展开为一个或多个有序的卡图序列，交给排版渲染。
//!
//! ## 排列规则
//!
//! - **合并模式**：只有一个序列，外层按卡表顺序，内层按卡面顺序，每个卡面连续重复 `count` 次
//! - **分面模式**：第 i 个序列收集所有卡牌的第 i 个面（按卡表顺序），序列在第一次遇到该面时创建
//!
//! 每个 (卡牌, 卡面) 只解析一次，重复只复制解析结果。任何一次解析失败都会中止整个调用。

use crate::error::AppResult;
use crate::models::Decklist;
use crate::services::ImageResolver;
use crate::utils::logging::log_scan_progress;
use std::iter;
use tracing::debug;

/// 一个可直接交给排版的有序卡图序列
pub type OutputSequence<T> = Vec<T>;

/// 展开卡表
///
/// # 参数
/// - `decklist`: 有序卡表
/// - `resolver`: 卡图解析器
/// - `separate`: 是否按卡面拆分为多个序列
///
/// # 返回
/// 合并模式下恰好一个序列；分面模式下序列数等于最大卡面数（空卡表为 0 个）
pub async fn resolve<R: ImageResolver>(
    decklist: &Decklist,
    resolver: &R,
    separate: bool,
) -> AppResult<Vec<OutputSequence<R::Image>>> {
    if separate {
        resolve_separate(decklist, resolver).await
    } else {
        Ok(vec![resolve_combined(decklist, resolver).await?])
    }
}

async fn resolve_combined<R: ImageResolver>(
    decklist: &Decklist,
    resolver: &R,
) -> AppResult<OutputSequence<R::Image>> {
    let mut sequence = Vec::new();
    let total = decklist.cards.len();

    for (card_index, card) in decklist.cards.iter().enumerate() {
        log_scan_progress(card_index + 1, total, &card.name);
        for (face_index, face) in card.faces.iter().enumerate() {
            debug!("解析卡图: {} 第 {} 面", card.name, face_index + 1);
            let image = resolver.get_image(&face.image_uris.png).await?;
            replicate(&mut sequence, image, card.count);
        }
    }

    Ok(sequence)
}

async fn resolve_separate<R: ImageResolver>(
    decklist: &Decklist,
    resolver: &R,
) -> AppResult<Vec<OutputSequence<R::Image>>> {
    let mut sequences: Vec<OutputSequence<R::Image>> = Vec::new();
    let total = decklist.cards.len();

    for (card_index, card) in decklist.cards.iter().enumerate() {
        log_scan_progress(card_index + 1, total, &card.name);
        for (face_index, face) in card.faces.iter().enumerate() {
            if face_index >= sequences.len() {
                sequences.push(Vec::new());
            }
            debug!("解析卡图: {} 第 {} 面", card.name, face_index + 1);
            let image = resolver.get_image(&face.image_uris.png).await?;
            replicate(&mut sequences[face_index], image, card.count);
        }
    }

    Ok(sequences)
}

/// 把同一个解析结果追加 `count` 次
fn replicate<T: Clone>(sequence: &mut OutputSequence<T>, image: T, count: u32) {
    sequence.extend(iter::repeat(image).take(count as usize));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardEntry, CardFace, ImageUris};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    struct EchoResolver;

    impl ImageResolver for EchoResolver {
        type Image = String;

        async fn get_image(&self, url: &str) -> AppResult<String> {
            Ok(url.to_string())
        }
    }

    fn card(count: u32, faces: &[&str]) -> CardEntry {
        CardEntry::new(
            count,
            faces.join(" // "),
            faces
                .iter()
                .map(|f| CardFace::new(*f, ImageUris::png(*f)))
                .collect(),
        )
    }

    #[test]
    fn zero_count_contributes_nothing() {
        let deck = Decklist::new(vec![card(0, &["a"]), card(1, &["b"])]);
        let result = tokio_test::block_on(resolve(&deck, &EchoResolver, false)).unwrap();
        assert_eq!(result, vec![vec!["b".to_string()]]);
    }

    #[test]
    fn faceless_entry_creates_no_sequence() {
        let deck = Decklist::new(vec![card(2, &[])]);
        let result = tokio_test::block_on(resolve(&deck, &EchoResolver, true)).unwrap();
        assert!(result.is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn reports_each_card_while_fetching() {
        let deck = Decklist::new(vec![card(2, &["a"]), card(1, &["b", "c"])]);

        for separate in [false, true] {
            let log = CapturedLog::default();
            let writer = log.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();

            tracing::subscriber::with_default(subscriber, || {
                tokio_test::block_on(resolve(&deck, &EchoResolver, separate)).unwrap()
            });

            let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
            assert!(output.contains("[1/2] 🖼️ 获取卡图: a"), "{}", output);
            assert!(output.contains("[2/2] 🖼️ 获取卡图: b // c"), "{}", output);
            assert!(!output.contains("解析卡图"), "{}", output);
        }
    }
}
