//! 商品数据模型与批次变换

use serde::Deserialize;

use crate::ui::rows::GridEntry;

/// 接口返回的原始商品
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
}

/// 商品列表响应体
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<RawProduct>,
}

/// 展示用商品条目
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub thumbnail: String,
    /// 是否以通栏形态展示
    pub is_full_width: bool,
    /// 通栏条目附带的推荐文案
    pub description: Option<String>,
}

impl GridEntry for Product {
    fn is_full_width(&self) -> bool {
        self.is_full_width
    }
}

/// 批次内每第 5 个条目（批内下标 0、5、10…）标记为通栏
///
/// 标记按单个批次的下标计算，与条目在整个序列中的位置无关。
pub fn transform_batch(batch: Vec<RawProduct>) -> Vec<Product> {
    batch
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let is_full_width = index % 5 == 0;
            Product {
                id: raw.id,
                title: raw.title,
                price: raw.price,
                thumbnail: raw.thumbnail,
                is_full_width,
                description: if is_full_width {
                    Some("Featured product with full-width display!".to_string())
                } else {
                    None
                },
            }
        })
        .collect()
}
