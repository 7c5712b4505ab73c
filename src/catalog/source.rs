//! 商品数据源
//!
//! ProductSource 抽象一页商品的获取，HttpProductSource 对接
//! dummyjson 风格的 HTTP 接口（GET /products?limit=&skip=）。

use super::product::{ProductsResponse, RawProduct};

/// 分页商品数据源
pub trait ProductSource: Send + Sync {
    /// 获取一页商品：limit 条，跳过 skip 条
    fn fetch_page(&self, limit: u32, skip: u32) -> Result<Vec<RawProduct>, String>;
}

/// HTTP 商品数据源
pub struct HttpProductSource {
    base_url: String,
}

impl HttpProductSource {
    pub fn new() -> Self {
        Self::with_base_url("https://dummyjson.com/products")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpProductSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductSource for HttpProductSource {
    fn fetch_page(&self, limit: u32, skip: u32) -> Result<Vec<RawProduct>, String> {
        log::debug!("📡 请求商品: limit={} skip={}", limit, skip);

        let response = ureq::get(&self.base_url)
            .query("limit", &limit.to_string())
            .query("skip", &skip.to_string())
            .call()
            .map_err(|e| format!("请求失败: {}", e))?;

        let body: ProductsResponse = response
            .into_json()
            .map_err(|e| format!("解析响应失败: {}", e))?;

        Ok(body.products)
    }
}
