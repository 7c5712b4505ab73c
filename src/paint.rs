//! 画笔模块

use crate::Color;

/// 画笔样式
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
}

/// 画笔
#[derive(Debug, Clone)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub anti_alias: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 1.0,
            anti_alias: true,
        }
    }
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }
}
