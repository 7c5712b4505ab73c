//! 网格行/列布局原语
//!
//! GridRow 把子组件从左到右排进一行，GridColumn 是固定宽度的
//! 单元格，把唯一的子组件在格内居中。两者只做坐标分配，不做
//! 弹性协商。

use crate::{Canvas, Color, Paint, PaintStyle};
use super::component::{Component, ComponentId, Style};

/// GridColumn - 固定宽度的网格单元格
pub struct GridColumn {
    id: ComponentId,
    style: Style,
    children: Vec<Box<dyn Component>>,
}

impl GridColumn {
    pub fn new(width: f32, height: f32) -> Self {
        let mut style = Style::default();
        style.width = width;
        style.height = height;
        Self {
            id: ComponentId::new(),
            style,
            children: Vec::new(),
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.style.x = x;
        self.style.y = y;
        self
    }

    pub fn with_child(mut self, child: Box<dyn Component>) -> Self {
        self.children.push(child);
        self.layout();
        self
    }

    /// 子组件在格内居中
    pub fn layout(&mut self) {
        let bounds = self.style.bounds();
        for child in &mut self.children {
            let cs = child.style_mut();
            // 子组件未指定尺寸时占满整格
            if cs.width <= 0.0 { cs.width = bounds.width; }
            if cs.height <= 0.0 { cs.height = bounds.height; }
            cs.x = bounds.x + (bounds.width - cs.width) / 2.0;
            cs.y = bounds.y + (bounds.height - cs.height) / 2.0;
        }
    }
}

impl Component for GridColumn {
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
        if let Some(bg) = self.style.background_color {
            let paint = Paint::new().with_color(bg).with_style(PaintStyle::Fill);
            canvas.draw_rect(&self.style.bounds(), &paint);
        }
    }

    fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Box<dyn Component>>> {
        Some(&mut self.children)
    }

    fn add_child(&mut self, child: Box<dyn Component>) {
        self.children.push(child);
        self.layout();
    }

    fn layout_children(&mut self) {
        self.layout();
    }

    fn type_name(&self) -> &'static str {
        "GridColumn"
    }
}

/// GridRow - 水平网格行，子组件按既有宽度从左到右排列
pub struct GridRow {
    id: ComponentId,
    style: Style,
    children: Vec<Box<dyn Component>>,
    spacing: f32,
}

impl GridRow {
    pub fn new(spacing: f32) -> Self {
        Self {
            id: ComponentId::new(),
            style: Style::default(),
            children: Vec::new(),
            spacing,
        }
    }

    pub fn with_frame(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.style.x = x;
        self.style.y = y;
        self.style.width = width;
        self.style.height = height;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.style.background_color = Some(color);
        self
    }

    pub fn with_child(mut self, child: Box<dyn Component>) -> Self {
        self.children.push(child);
        self.layout();
        self
    }

    /// 从左到右分配子组件位置，顶对齐
    pub fn layout(&mut self) {
        let bounds = self.style.bounds();
        let mut cursor_x = bounds.x;
        for child in &mut self.children {
            let cs = child.style_mut();
            cs.x = cursor_x;
            cs.y = bounds.y;
            cursor_x += cs.width + self.spacing;
        }
        // 子组件被移动后需要各自重排内部
        for child in &mut self.children {
            child.layout_children();
        }
    }
}

impl Component for GridRow {
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
        if let Some(bg) = self.style.background_color {
            let paint = Paint::new().with_color(bg).with_style(PaintStyle::Fill);
            canvas.draw_rect(&self.style.bounds(), &paint);
        }
    }

    fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Box<dyn Component>>> {
        Some(&mut self.children)
    }

    fn add_child(&mut self, child: Box<dyn Component>) {
        self.children.push(child);
        self.layout();
    }

    fn layout_children(&mut self) {
        self.layout();
    }

    fn type_name(&self) -> &'static str {
        "GridRow"
    }
}
