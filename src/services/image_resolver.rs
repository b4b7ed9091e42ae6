//! 卡图解析能力 - 业务能力层
//!
//! 只负责"给一个地址，拿到一张可排版的图片"，不关心卡表与顺序

use crate::error::AppResult;
use std::future::Future;

/// 卡图解析器
///
/// 职责：
/// - 把单个图片地址解析为可排版的图片句柄
/// - 自行决定缓存策略（按地址缓存）
/// - 失败时直接返回错误，不做重试
pub trait ImageResolver {
    /// 解析结果，对调用方不透明，只会被复制
    type Image: Clone;

    /// 解析单个图片地址
    fn get_image(&self, url: &str) -> impl Future<Output = AppResult<Self::Image>> + Send;
}
