//! 目录分页状态机
//!
//! 维护「缓存」与「展示窗口」两层数据：每次从接口取 BATCH_SIZE
//! 条进缓存，界面一次只多露出 DISPLAY_SIZE 条。加载更多优先从
//! 缓存揭示，缓存见底才发起网络请求；缓存余量不足时在后台预取
//! 下一批。网络请求在工作线程执行，结果经 mpsc 通道回到 UI
//! 线程，由每帧的 poll 应用。
//!
//! 不变量：displayed ≤ cache.len()；任意时刻至多一个在途请求。

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use super::product::{transform_batch, Product};
use super::source::ProductSource;

/// 单次网络请求的批次大小
pub const BATCH_SIZE: u32 = 16;
/// 单次揭示的展示窗口步长
pub const DISPLAY_SIZE: usize = 8;

/// 在途请求的种类，决定结果如何应用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    /// 刷新：成功后整体替换缓存
    Refresh,
    /// 后台预取：只追加缓存，不动展示窗口
    Prefetch,
    /// 缓存见底的加载更多：追加缓存并揭示一段
    AppendReveal,
}

struct PendingFetch {
    rx: mpsc::Receiver<Result<Vec<Product>, String>>,
    kind: FetchKind,
}

/// 目录数据仓库
pub struct CatalogStore {
    source: Arc<dyn ProductSource>,
    /// 已取回的全部商品
    cache: Vec<Product>,
    /// 展示窗口大小（cache 前 displayed 条对外可见）
    displayed: usize,
    /// 下一批的页号（skip = page * BATCH_SIZE）
    page: u32,
    /// 在途请求守卫，防止重入
    is_fetching: bool,
    /// 刷新中（驱动顶部指示器）
    is_loading: bool,
    /// 加载更多中（驱动底部指示器）
    is_loading_more: bool,
    pending: Option<PendingFetch>,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            source,
            cache: Vec::new(),
            displayed: 0,
            page: 0,
            is_fetching: false,
            is_loading: false,
            is_loading_more: false,
            pending: None,
        }
    }

    /// 当前对外可见的商品
    pub fn products(&self) -> &[Product] {
        &self.cache[..self.displayed]
    }

    /// 缓存中尚未揭示的条数
    pub fn cached_remainder(&self) -> usize {
        self.cache.len() - self.displayed
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// 刷新：从第 0 页重新拉取，成功后替换全部状态
    pub fn refresh(&mut self) {
        if self.is_fetching {
            log::debug!("刷新被忽略: 已有在途请求");
            return;
        }
        self.is_loading = true;
        self.page = 0;
        self.spawn_fetch(FetchKind::Refresh);
    }

    /// 加载更多：优先揭示缓存，缓存见底才请求下一批
    pub fn load_more(&mut self) {
        if self.is_fetching {
            log::debug!("加载更多被忽略: 已有在途请求");
            return;
        }

        if self.cached_remainder() > 0 {
            // 缓存够用，同步揭示一段
            self.displayed = (self.displayed + DISPLAY_SIZE).min(self.cache.len());
            log::info!(
                "📄 从缓存揭示: 展示 {}/{} 条",
                self.displayed,
                self.cache.len()
            );
            // 余量见底时后台预取下一批
            if self.cached_remainder() <= DISPLAY_SIZE {
                self.spawn_fetch(FetchKind::Prefetch);
            }
            return;
        }

        // 缓存已用尽，请求下一批并在到达后揭示
        self.is_loading_more = true;
        self.spawn_fetch(FetchKind::AppendReveal);
    }

    /// 在工作线程发起一次批量请求
    fn spawn_fetch(&mut self, kind: FetchKind) {
        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let skip = self.page * BATCH_SIZE;
        self.page += 1;
        self.is_fetching = true;
        self.pending = Some(PendingFetch { rx, kind });

        thread::spawn(move || {
            let result = source
                .fetch_page(BATCH_SIZE, skip)
                .map(transform_batch);
            // 接收端可能已被丢弃
            let _ = tx.send(result);
        });
    }

    /// 每帧轮询在途请求，返回状态是否发生变化
    pub fn poll(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };

        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return false,
            Err(mpsc::TryRecvError::Disconnected) => {
                Err("工作线程在返回结果前退出".to_string())
            }
        };

        let kind = pending.kind;
        self.pending = None;
        self.apply_completion(kind, result);
        true
    }

    /// 阻塞等待当前在途请求完成（无头模式使用）
    pub fn wait_for_fetch(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let result = pending
            .rx
            .recv()
            .unwrap_or_else(|_| Err("工作线程在返回结果前退出".to_string()));
        self.apply_completion(pending.kind, result);
        true
    }

    /// 应用一次请求的结果；失败时记录日志，数据保持不变
    fn apply_completion(&mut self, kind: FetchKind, result: Result<Vec<Product>, String>) {
        self.is_fetching = false;
        self.is_loading = false;
        self.is_loading_more = false;

        let batch = match result {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!("❌ 商品请求失败: {}", e);
                return;
            }
        };

        match kind {
            FetchKind::Refresh => {
                self.cache = batch;
                self.displayed = DISPLAY_SIZE.min(self.cache.len());
                log::info!(
                    "🔄 刷新完成: 缓存 {} 条, 展示 {} 条",
                    self.cache.len(),
                    self.displayed
                );
            }
            FetchKind::Prefetch => {
                self.cache.extend(batch);
                log::info!("📦 预取完成: 缓存 {} 条", self.cache.len());
            }
            FetchKind::AppendReveal => {
                self.cache.extend(batch);
                self.displayed = (self.displayed + DISPLAY_SIZE).min(self.cache.len());
                log::info!(
                    "📄 加载更多完成: 展示 {}/{} 条",
                    self.displayed,
                    self.cache.len()
                );
            }
        }
    }
}
