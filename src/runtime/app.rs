//! 目录应用 - 把数据仓库、网格列表和画布接到一起
//!
//! 每帧流程：poll 仓库应用网络结果 → 推进列表动画 → 把列表
//! 发出的 EndReached / Refresh 转成仓库调用 → 按需同步展示
//! 数据和加载标志。仓库状态只在这条 UI 线程上变化。

use std::sync::Arc;

use crate::catalog::{CatalogStore, Product, ProductSource};
use crate::event::Event;
use crate::ui::component::Component;
use crate::ui::grid_list::{GridList, GridListConfig, GridListEvent};
use crate::ui::text::{FontWeight, Text, TextAlign};
use crate::runtime::cards::{FeaturedCard, ProductCard};
use crate::{Canvas, Color, Rect};

/// 页面背景色
const PAGE_BACKGROUND: Color = Color::rgb(0xF2, 0xF2, 0xF7);
/// 顶栏高度
const HEADER_HEIGHT: f32 = 56.0;

/// 窗口配置
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 390,
            height: 844,
            title: "商品目录".to_string(),
        }
    }
}

/// 目录应用
pub struct CatalogApp {
    width: u32,
    height: u32,
    canvas: Canvas,
    store: CatalogStore,
    list: GridList<Product>,
}

impl CatalogApp {
    pub fn new(width: u32, height: u32, source: Arc<dyn ProductSource>) -> Self {
        let config = GridListConfig {
            num_columns: 2,
            spacing: 8.0,
            item_height: Some(210.0),
            full_width_item_height: Some(260.0),
        };

        let list = GridList::new(
            config,
            Box::new(|product: &Product, _col| {
                Box::new(ProductCard::new(product)) as Box<dyn Component>
            }),
        )
        .with_full_width_builder(Box::new(|product: &Product| {
            Box::new(FeaturedCard::new(product)) as Box<dyn Component>
        }))
        .with_empty(Box::new(|width| {
            let mut text = Text::new("暂无商品")
                .with_font_size(16.0)
                .with_color(Color::rgb(0x8E, 0x8E, 0x93))
                .with_text_align(TextAlign::Center);
            text.style_mut().width = width;
            text.style_mut().height = 24.0;
            Box::new(text) as Box<dyn Component>
        }))
        .with_frame(0.0, HEADER_HEIGHT, width as f32, height as f32 - HEADER_HEIGHT);

        Self {
            width,
            height,
            canvas: Canvas::new(width, height),
            store: CatalogStore::new(source),
            list,
        }
    }

    /// 启动：发起首屏刷新
    pub fn start(&mut self) {
        log::info!("🚀 目录应用启动 {}x{}", self.width, self.height);
        self.store.refresh();
        self.sync_from_store();
    }

    /// 推进一帧，返回是否需要重绘
    pub fn update(&mut self, dt: f32) -> bool {
        let mut needs_redraw = self.store.poll();

        if self.list.update(dt) {
            needs_redraw = true;
        }

        for event in self.list.drain_events() {
            match event {
                GridListEvent::EndReached => self.store.load_more(),
                GridListEvent::Refresh => self.store.refresh(),
            }
        }

        // 缓存揭示是同步完成的，事件处理后立即同步
        if self.sync_from_store() {
            needs_redraw = true;
        }

        needs_redraw
    }

    /// 把仓库状态同步进列表，返回是否有变化
    fn sync_from_store(&mut self) -> bool {
        let mut changed = false;
        if self.list.items() != self.store.products() {
            self.list.set_items(self.store.products().to_vec());
            changed = true;
        }
        if self.list.is_loading() != self.store.is_loading() {
            self.list.set_loading(self.store.is_loading());
            changed = true;
        }
        if self.list.is_loading_more() != self.store.is_loading_more() {
            self.list.set_loading_more(self.store.is_loading_more());
            changed = true;
        }
        changed
    }

    /// 分发输入事件，返回是否被消费
    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.list.on_event(event)
    }

    /// 渲染整页
    pub fn render(&mut self) -> &Canvas {
        self.canvas.clear(PAGE_BACKGROUND);

        self.list.render(&mut self.canvas);

        // 顶栏盖在列表之上
        let header = Rect::new(0.0, 0.0, self.width as f32, HEADER_HEIGHT);
        self.canvas.fill_round_rect(&header, 0.0, Color::WHITE);
        let title = Text::new("商品目录")
            .with_frame(0.0, 0.0, self.width as f32, HEADER_HEIGHT)
            .with_font_size(18.0)
            .with_font_weight(FontWeight::Bold)
            .with_text_align(TextAlign::Center);
        title.render(&mut self.canvas);

        &self.canvas
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CatalogStore {
        &mut self.store
    }

    pub fn list(&self) -> &GridList<Product> {
        &self.list
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
