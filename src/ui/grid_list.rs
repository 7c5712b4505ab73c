//! GridList 组件 - 混合网格/通栏的窗口化列表
//!
//! 每帧用行分组算法把展示条目切成行，按前缀和预计算各行偏移，
//! 只渲染与视口相交的行。向外暴露两类集成事件：触底加载
//! （EndReached，同一次接近只触发一次，加载中被抑制）和下拉
//! 刷新（Refresh）。加载状态由调用方通过 is_loading /
//! is_loading_more 写入，驱动顶部与底部指示器。

use crate::event::Event;
use crate::ui::component::{Component, ComponentId, ComponentTree, Style};
use crate::ui::grid::{GridColumn, GridRow};
use crate::ui::rows::{group_rows, GridEntry, RowGroup};
use crate::ui::scroll_controller::{ScrollController, ScrollEvent};
use crate::{Canvas, Color};

/// 默认网格条目高度（未配置 item_height 时）
const DEFAULT_ITEM_HEIGHT: f32 = 200.0;
/// 默认通栏条目高度
const DEFAULT_FULL_WIDTH_HEIGHT: f32 = 280.0;
/// 内容区内边距
const CONTENT_PADDING: f32 = 16.0;
/// 加载指示器占位高度
const LOADING_FOOTER_HEIGHT: f32 = 40.0;

/// 网格列表配置
#[derive(Debug, Clone)]
pub struct GridListConfig {
    /// 网格列数（≥ 1）
    pub num_columns: usize,
    /// 行内与行间间距
    pub spacing: f32,
    /// 网格条目高度，配置后行偏移可精确预计算
    pub item_height: Option<f32>,
    /// 通栏条目高度
    pub full_width_item_height: Option<f32>,
}

impl Default for GridListConfig {
    fn default() -> Self {
        Self {
            num_columns: 2,
            spacing: 8.0,
            item_height: None,
            full_width_item_height: None,
        }
    }
}

/// 列表对外事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridListEvent {
    /// 滚动接近底部，需要加载更多
    EndReached,
    /// 下拉刷新手势完成
    Refresh,
}

/// 网格条目渲染回调：(条目, 行内列序号) -> 组件
pub type ItemBuilder<T> = Box<dyn Fn(&T, usize) -> Box<dyn Component> + Send + Sync>;
/// 通栏条目渲染回调
pub type FullWidthBuilder<T> = Box<dyn Fn(&T) -> Box<dyn Component> + Send + Sync>;
/// 空态/页眉/页脚渲染回调：可用宽度 -> 组件（组件自带高度）
pub type SlotBuilder = Box<dyn Fn(f32) -> Box<dyn Component> + Send + Sync>;

/// GridList - 窗口化网格列表
pub struct GridList<T: GridEntry + Send + Sync> {
    id: ComponentId,
    style: Style,
    config: GridListConfig,
    items: Vec<T>,
    render_item: ItemBuilder<T>,
    render_full_width: Option<FullWidthBuilder<T>>,
    header: Option<SlotBuilder>,
    footer: Option<SlotBuilder>,
    empty: Option<SlotBuilder>,
    is_loading: bool,
    is_loading_more: bool,
    scroll: ScrollController,
    events: Vec<GridListEvent>,
    /// 指示器动画相位
    spinner_phase: f32,
}

impl<T: GridEntry + Send + Sync + 'static> GridList<T> {
    pub fn new(config: GridListConfig, render_item: ItemBuilder<T>) -> Self {
        let mut config = config;
        config.num_columns = config.num_columns.max(1);
        Self {
            id: ComponentId::new(),
            style: Style::default(),
            config,
            items: Vec::new(),
            render_item,
            render_full_width: None,
            header: None,
            footer: None,
            empty: None,
            is_loading: false,
            is_loading_more: false,
            scroll: ScrollController::new(0.0, 0.0),
            events: Vec::new(),
            spinner_phase: 0.0,
        }
    }

    pub fn with_frame(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.style.x = x;
        self.style.y = y;
        self.style.width = width;
        self.style.height = height;
        self.scroll = ScrollController::new(self.content_height(), height);
        self
    }

    pub fn with_full_width_builder(mut self, builder: FullWidthBuilder<T>) -> Self {
        self.render_full_width = Some(builder);
        self
    }

    pub fn with_header(mut self, builder: SlotBuilder) -> Self {
        self.header = Some(builder);
        self
    }

    pub fn with_footer(mut self, builder: SlotBuilder) -> Self {
        self.footer = Some(builder);
        self
    }

    pub fn with_empty(mut self, builder: SlotBuilder) -> Self {
        self.empty = Some(builder);
        self
    }

    /// 替换展示条目，重算内容高度并重新武装触底事件
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let content_height = self.content_height();
        self.scroll.update_content_height(content_height, self.style.height);
        self.scroll.reset_reach_bottom();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_loading_more(&mut self, loading_more: bool) {
        self.is_loading_more = loading_more;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// 取走累计的对外事件
    pub fn drain_events(&mut self) -> Vec<GridListEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    /// 内容区可用宽度
    fn content_width(&self) -> f32 {
        (self.style.width - CONTENT_PADDING * 2.0).max(0.0)
    }

    /// 单个网格单元格宽度
    fn column_width(&self) -> f32 {
        let cols = self.config.num_columns as f32;
        ((self.content_width() - self.config.spacing * (cols - 1.0)) / cols).max(0.0)
    }

    /// 某一行的高度
    pub fn row_height(&self, row: &RowGroup) -> f32 {
        match row {
            RowGroup::Full(_) => self
                .config
                .full_width_item_height
                .unwrap_or(DEFAULT_FULL_WIDTH_HEIGHT),
            RowGroup::Grid(_) => self.config.item_height.unwrap_or(DEFAULT_ITEM_HEIGHT),
        }
    }

    /// 页眉高度（构建一次读取其样式高度）
    fn header_height(&self) -> f32 {
        match &self.header {
            Some(builder) => builder(self.content_width()).style().height + self.config.spacing,
            None => 0.0,
        }
    }

    /// 各行相对内容起点的偏移（前缀和），行高已配置时为精确值
    pub fn row_offsets(&self, rows: &[RowGroup]) -> Vec<f32> {
        let mut offsets = Vec::with_capacity(rows.len());
        let mut y = CONTENT_PADDING + self.header_height();
        for row in rows {
            offsets.push(y);
            y += self.row_height(row) + self.config.spacing;
        }
        offsets
    }

    /// 总内容高度，驱动滚动范围
    pub fn content_height(&self) -> f32 {
        let rows = group_rows(&self.items, self.config.num_columns);
        let mut height = CONTENT_PADDING + self.header_height();
        for row in &rows {
            height += self.row_height(row) + self.config.spacing;
        }
        height += LOADING_FOOTER_HEIGHT + CONTENT_PADDING;
        height
    }

    /// 推进动画并收集边缘事件，返回是否仍需重绘
    pub fn update(&mut self, dt: f32) -> bool {
        let (animating, event) = self.scroll.update(dt);
        match event {
            Some(ScrollEvent::ReachBottom) => self.push_end_reached(),
            Some(ScrollEvent::ReachTop) => {
                if !self.is_loading {
                    self.events.push(GridListEvent::Refresh);
                }
            }
            None => {}
        }

        if self.is_loading || self.is_loading_more {
            self.spinner_phase += dt;
        }

        animating || self.is_loading || self.is_loading_more
    }

    /// 触底事件：加载中一律丢弃，由守卫位防止重复触发
    fn push_end_reached(&mut self) {
        if self.is_loading || self.is_loading_more || self.items.is_empty() {
            return;
        }
        self.events.push(GridListEvent::EndReached);
    }

    /// 构建某一行的组件树
    fn build_row(&self, row: &RowGroup, y: f32) -> Box<dyn Component> {
        let content_x = self.style.x + CONTENT_PADDING;
        let content_width = self.content_width();
        let height = self.row_height(row);

        match row {
            RowGroup::Full(index) => {
                let item = &self.items[*index];
                let mut comp = match &self.render_full_width {
                    Some(builder) => builder(item),
                    // 未提供通栏渲染时退回普通渲染
                    None => (self.render_item)(item, 0),
                };
                {
                    let style = comp.style_mut();
                    style.x = content_x;
                    style.y = y;
                    style.width = content_width;
                    style.height = height;
                }
                comp.layout_children();
                comp
            }
            RowGroup::Grid(range) => {
                let mut grid_row = GridRow::new(self.config.spacing)
                    .with_frame(content_x, y, content_width, height);
                let column_width = self.column_width();
                for (col_index, item_index) in range.clone().enumerate() {
                    let child = (self.render_item)(&self.items[item_index], col_index);
                    let column = GridColumn::new(column_width, height).with_child(child);
                    grid_row.add_child(Box::new(column));
                }
                Box::new(grid_row)
            }
        }
    }

    /// 绘制加载指示器（三点动画）
    fn draw_spinner(&self, canvas: &mut Canvas, cx: f32, cy: f32) {
        let phase = self.spinner_phase * 6.0;
        for i in 0..3 {
            let offset = (phase + i as f32 * 0.8).sin() * 0.5 + 0.5;
            let alpha = (80.0 + offset * 175.0) as u8;
            let x = cx + (i as f32 - 1.0) * 12.0;
            canvas.fill_circle(x, cy, 3.5, Color::new(0x00, 0x7A, 0xFF, alpha));
        }
    }

    /// 空态渲染
    fn render_empty(&self, canvas: &mut Canvas) {
        if let Some(builder) = &self.empty {
            let mut comp = builder(self.content_width());
            let height = comp.style().height;
            {
                let style = comp.style_mut();
                style.x = self.style.x + CONTENT_PADDING;
                style.y = self.style.y + (self.style.height - height) / 2.0;
                style.width = self.content_width();
            }
            comp.layout_children();
            ComponentTree::render_component(comp.as_ref(), canvas);
        }
    }
}

impl<T: GridEntry + Send + Sync + 'static> Component for GridList<T> {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn render(&self, canvas: &mut Canvas) {
        let bounds = self.style.bounds();

        // 背景
        if let Some(bg) = self.style.background_color {
            canvas.fill_round_rect(&bounds, 0.0, bg);
        }

        canvas.save();
        canvas.clip_rect(bounds);

        if self.items.is_empty() && !self.is_loading {
            self.render_empty(canvas);
            canvas.restore();
            return;
        }

        let scroll_y = self.scroll.position();
        canvas.translate(0.0, -scroll_y);

        let rows = group_rows(&self.items, self.config.num_columns);
        let offsets = self.row_offsets(&rows);

        // 页眉
        if let Some(builder) = &self.header {
            let mut comp = builder(self.content_width());
            {
                let style = comp.style_mut();
                style.x = bounds.x + CONTENT_PADDING;
                style.y = bounds.y + CONTENT_PADDING;
                style.width = self.content_width();
            }
            comp.layout_children();
            ComponentTree::render_component(comp.as_ref(), canvas);
        }

        // 只渲染与视口相交的行
        let viewport_top = bounds.y + scroll_y;
        let viewport_bottom = viewport_top + bounds.height;
        for (row, offset) in rows.iter().zip(offsets.iter()) {
            let row_top = bounds.y + offset;
            let row_bottom = row_top + self.row_height(row);
            if row_bottom < viewport_top || row_top > viewport_bottom {
                continue;
            }
            let comp = self.build_row(row, row_top);
            ComponentTree::render_component(comp.as_ref(), canvas);
        }

        // 页脚：加载更多时显示指示器，否则渲染自定义页脚
        let footer_y = bounds.y + offsets.last().map_or(CONTENT_PADDING, |last| {
            last + self.row_height(&rows[rows.len() - 1]) + self.config.spacing
        });
        if self.is_loading_more {
            self.draw_spinner(canvas, bounds.x + bounds.width / 2.0, footer_y + LOADING_FOOTER_HEIGHT / 2.0);
        } else if let Some(builder) = &self.footer {
            let mut comp = builder(self.content_width());
            {
                let style = comp.style_mut();
                style.x = bounds.x + CONTENT_PADDING;
                style.y = footer_y;
                style.width = self.content_width();
            }
            comp.layout_children();
            ComponentTree::render_component(comp.as_ref(), canvas);
        }

        canvas.restore();

        // 下拉刷新指示器画在滚动空间之外
        let pull = self.scroll.pull_distance();
        if self.is_loading || pull > 8.0 {
            self.draw_spinner(canvas, bounds.x + bounds.width / 2.0, bounds.y + 24.0 + pull * 0.3);
        }
    }

    fn on_event(&mut self, event: &Event) -> bool {
        match event {
            Event::TouchStart(touch) => {
                if let Some(t) = touch.touches.first() {
                    if self.hit_test(&t.position()) {
                        self.scroll.begin_drag(t.y, touch.timestamp);
                        return true;
                    }
                }
            }
            Event::TouchMove(touch) => {
                if self.scroll.is_dragging {
                    if let Some(t) = touch.touches.first() {
                        self.scroll.update_drag(t.y, touch.timestamp);
                        return true;
                    }
                }
            }
            Event::TouchEnd(_) | Event::TouchCancel(_) => {
                if self.scroll.is_dragging {
                    self.scroll.end_drag();
                    return true;
                }
            }
            Event::Scroll(delta) => {
                self.scroll.handle_scroll(delta.dy, delta.precise);
                if self.scroll.check_reach_bottom() {
                    self.push_end_reached();
                }
                return true;
            }
        }
        false
    }

    fn type_name(&self) -> &'static str {
        "GridList"
    }
}
