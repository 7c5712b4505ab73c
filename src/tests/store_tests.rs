//! 分页状态机测试
//!
//! 用假数据源驱动 CatalogStore，网络请求虽然仍在工作线程执行，
//! 但通过 wait_for_fetch 等待完成，测试是确定性的。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::catalog::{
    transform_batch, CatalogStore, ProductSource, RawProduct, BATCH_SIZE, DISPLAY_SIZE,
};

/// 假数据源：记录调用次数，可切换为失败模式
struct FakeSource {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl FakeSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl ProductSource for FakeSource {
    fn fetch_page(&self, limit: u32, skip: u32) -> Result<Vec<RawProduct>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err("网络不可用".to_string());
        }
        Ok((0..limit)
            .map(|i| RawProduct {
                id: (skip + i + 1) as u64,
                title: format!("商品 {}", skip + i + 1),
                price: 9.9,
                thumbnail: String::new(),
            })
            .collect())
    }
}

fn refreshed_store(source: &Arc<FakeSource>) -> CatalogStore {
    let mut store = CatalogStore::new(source.clone() as Arc<dyn ProductSource>);
    store.refresh();
    store.wait_for_fetch();
    store
}

#[test]
fn test_refresh_fills_cache_and_display_window() {
    let source = FakeSource::new();
    let store = refreshed_store(&source);

    assert_eq!(store.products().len(), DISPLAY_SIZE);
    assert_eq!(store.cached_remainder(), BATCH_SIZE as usize - DISPLAY_SIZE);
    assert_eq!(store.page(), 1);
    assert!(!store.is_loading());
    assert!(!store.is_fetching());
    assert_eq!(source.calls(), 1);
}

#[test]
fn test_refresh_marks_every_fifth_item_full_width() {
    let source = FakeSource::new();
    let store = refreshed_store(&source);

    let products = store.products();
    assert!(products[0].is_full_width);
    assert!(products[5].is_full_width);
    assert!(!products[1].is_full_width);
    assert!(!products[4].is_full_width);
    assert!(products[0].description.is_some());
    assert!(products[1].description.is_none());
}

#[test]
fn test_load_more_reveals_from_cache_then_prefetches() {
    let source = FakeSource::new();
    let mut store = refreshed_store(&source);

    // 缓存余量 8，揭示是同步的；余量见底后开始后台预取
    store.load_more();
    assert_eq!(store.products().len(), 16);
    assert!(!store.is_loading_more());
    assert!(store.is_fetching());

    store.wait_for_fetch();
    assert_eq!(store.products().len(), 16);
    assert_eq!(store.cached_remainder(), BATCH_SIZE as usize);
    assert_eq!(source.calls(), 2);
}

#[test]
fn test_no_prefetch_while_cache_remainder_is_large() {
    let source = FakeSource::new();
    let mut store = refreshed_store(&source);

    store.load_more();
    store.wait_for_fetch();
    store.load_more();
    store.wait_for_fetch();
    // 缓存 48 条、展示 24 条，余量 16 > DISPLAY_SIZE，不应发请求
    assert_eq!(store.products().len(), 24);
    assert_eq!(store.cached_remainder(), 24);

    let calls_before = source.calls();
    store.load_more();
    assert_eq!(store.products().len(), 32);
    assert!(!store.is_fetching());
    assert_eq!(source.calls(), calls_before);
}

#[test]
fn test_load_more_fetches_when_cache_exhausted() {
    let source = FakeSource::new();
    let mut store = refreshed_store(&source);

    // 预取失败，让缓存被展示窗口追平
    source.set_fail(true);
    store.load_more();
    store.wait_for_fetch();
    assert_eq!(store.products().len(), 16);
    assert_eq!(store.cached_remainder(), 0);

    // 缓存见底的加载更多：请求下一批并在到达后揭示
    source.set_fail(false);
    store.load_more();
    assert!(store.is_loading_more());
    assert_eq!(store.products().len(), 16);

    store.wait_for_fetch();
    assert!(!store.is_loading_more());
    assert_eq!(store.products().len(), 24);
    assert_eq!(store.cached_remainder(), 8);
}

#[test]
fn test_failed_refresh_leaves_data_unchanged() {
    let source = FakeSource::new();
    let mut store = refreshed_store(&source);
    let before: Vec<u64> = store.products().iter().map(|p| p.id).collect();

    source.set_fail(true);
    store.refresh();
    assert!(store.is_loading());
    store.wait_for_fetch();

    let after: Vec<u64> = store.products().iter().map(|p| p.id).collect();
    assert_eq!(before, after);
    assert!(!store.is_loading());
    assert!(!store.is_fetching());
}

#[test]
fn test_in_flight_guard_ignores_reentrant_calls() {
    let source = FakeSource::new();
    let mut store = CatalogStore::new(source.clone() as Arc<dyn ProductSource>);

    // 在途守卫在结果被应用前一直有效
    store.refresh();
    assert!(store.is_fetching());
    store.refresh();
    store.load_more();
    store.wait_for_fetch();

    assert_eq!(source.calls(), 1);
    assert_eq!(store.page(), 1);
}

#[test]
fn test_display_window_never_exceeds_cache() {
    let source = FakeSource::new();
    let mut store = refreshed_store(&source);

    let mut last_len = store.products().len();
    for _ in 0..6 {
        store.load_more();
        let len = store.products().len();
        // 每次最多多露出 DISPLAY_SIZE 条，且只增不减
        assert!(len >= last_len);
        assert!(len - last_len <= DISPLAY_SIZE);
        last_len = len;
        if store.is_fetching() {
            store.wait_for_fetch();
        }
    }
}

#[test]
fn test_poll_without_pending_fetch_is_noop() {
    let source = FakeSource::new();
    let mut store = CatalogStore::new(source.clone() as Arc<dyn ProductSource>);
    assert!(!store.poll());
    assert!(!store.wait_for_fetch());
}

#[test]
fn test_products_response_deserialization() {
    // dummyjson 风格响应，多余字段被忽略，缺失的 thumbnail 取默认
    let body = r#"{
        "products": [
            {"id": 1, "title": "iPhone 9", "price": 549.0, "thumbnail": "https://example.com/1.jpg", "stock": 94},
            {"id": 2, "title": "Laptop", "price": 1499.5}
        ],
        "total": 100,
        "skip": 0,
        "limit": 2
    }"#;

    let parsed: crate::catalog::ProductsResponse =
        serde_json::from_str(body).expect("响应应能解析");
    assert_eq!(parsed.products.len(), 2);
    assert_eq!(parsed.products[0].id, 1);
    assert_eq!(parsed.products[0].thumbnail, "https://example.com/1.jpg");
    assert_eq!(parsed.products[1].thumbnail, "");
    assert_eq!(parsed.products[1].price, 1499.5);
}

#[test]
fn test_transform_batch_marks_per_batch_indices() {
    let batch: Vec<RawProduct> = (0..BATCH_SIZE)
        .map(|i| RawProduct {
            id: 100 + i as u64,
            title: format!("P{}", i),
            price: 1.0,
            thumbnail: String::new(),
        })
        .collect();

    let products = transform_batch(batch);
    for (i, p) in products.iter().enumerate() {
        let expect_full = i % 5 == 0;
        assert_eq!(p.is_full_width, expect_full, "下标 {} 标记错误", i);
        assert_eq!(p.description.is_some(), expect_full);
    }
}

#[test]
fn test_transform_batch_indices_reset_per_batch() {
    // 第二批独立计数：批内下标 0 仍是通栏，与全局位置无关
    let second_batch: Vec<RawProduct> = (16..32)
        .map(|i| RawProduct {
            id: i as u64,
            title: format!("P{}", i),
            price: 1.0,
            thumbnail: String::new(),
        })
        .collect();

    let products = transform_batch(second_batch);
    assert!(products[0].is_full_width);
    assert!(products[5].is_full_width);
    assert!(!products[1].is_full_width);
}
