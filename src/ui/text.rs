//! Text 组件 - 文本显示

use crate::{text, Canvas, Color, Paint, PaintStyle, Rect};
use super::component::{Component, ComponentId, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Text - 文本组件
pub struct Text {
    id: ComponentId,
    style: Style,
    content: String,
    font_size: f32,
    text_color: Color,
    font_weight: FontWeight,
    text_align: TextAlign,
    /// 超出宽度时自动换行（否则单行绘制）
    wrap: bool,
}

impl Text {
    pub fn new(content: &str) -> Self {
        Self {
            id: ComponentId::new(),
            style: Style::default(),
            content: content.to_string(),
            font_size: 16.0,
            text_color: Color::BLACK,
            font_weight: FontWeight::Normal,
            text_align: TextAlign::Left,
            wrap: false,
        }
    }

    pub fn with_frame(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.style.x = x;
        self.style.y = y;
        self.style.width = width;
        self.style.height = height;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 无字体环境下的占位渲染（每个字符一个小矩形）
    fn render_placeholder(&self, canvas: &mut Canvas) {
        let bounds = self.style.content_bounds();
        let char_width = self.font_size * 0.6;
        let char_height = self.font_size;

        let total_width = self.content.chars().count() as f32 * char_width;
        let start_x = match self.text_align {
            TextAlign::Left => bounds.x,
            TextAlign::Center => bounds.x + (bounds.width - total_width) / 2.0,
            TextAlign::Right => bounds.x + bounds.width - total_width,
        };
        let start_y = bounds.y + (bounds.height - char_height) / 2.0;

        let paint = Paint::new()
            .with_color(self.text_color)
            .with_style(PaintStyle::Fill);

        for (i, _ch) in self.content.chars().enumerate() {
            let x = start_x + i as f32 * char_width;
            let char_rect = Rect::new(
                x + 1.0,
                start_y + 2.0,
                char_width - 2.0,
                char_height - 4.0,
            );
            canvas.draw_rect(&char_rect, &paint);
        }
    }
}

impl Component for Text {
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
        let renderer = match text::shared() {
            Some(r) => r,
            None => {
                self.render_placeholder(canvas);
                return;
            }
        };

        let bounds = self.style.content_bounds();
        let paint = Paint::new().with_color(self.text_color.with_opacity(self.style.opacity));

        if self.wrap {
            // 换行文本从内容区顶部排版
            let baseline = bounds.y + self.font_size;
            renderer.draw_text_wrapped(
                canvas, &self.content, bounds.x, baseline, self.font_size, bounds.width, &paint,
            );
            return;
        }

        let text_width = renderer.measure_text(&self.content, self.font_size);
        let start_x = match self.text_align {
            TextAlign::Left => bounds.x,
            TextAlign::Center => bounds.x + (bounds.width - text_width) / 2.0,
            TextAlign::Right => bounds.x + bounds.width - text_width,
        };
        // 垂直居中的基线位置
        let baseline = bounds.y + (bounds.height + self.font_size * 0.7) / 2.0;

        renderer.draw_text(canvas, &self.content, start_x, baseline, self.font_size, &paint);

        // 粗体：偏移 1px 重绘
        if self.font_weight == FontWeight::Bold {
            renderer.draw_text(canvas, &self.content, start_x + 0.8, baseline, self.font_size, &paint);
        }
    }

    fn type_name(&self) -> &'static str {
        "Text"
    }
}
