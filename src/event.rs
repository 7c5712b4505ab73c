//! 事件系统 - 处理用户交互

use crate::Point;

/// 事件类型
#[derive(Debug, Clone)]
pub enum Event {
    // 触摸/鼠标事件
    TouchStart(TouchEvent),
    TouchMove(TouchEvent),
    TouchEnd(TouchEvent),
    TouchCancel(TouchEvent),

    /// 滚轮/触控板滚动
    Scroll(ScrollDelta),
}

/// 触摸事件
#[derive(Debug, Clone)]
pub struct TouchEvent {
    pub touches: Vec<Touch>,
    pub timestamp: u64,
}

impl TouchEvent {
    pub fn single(touch: Touch, timestamp: u64) -> Self {
        Self { touches: vec![touch], timestamp }
    }
}

/// 单个触摸点
#[derive(Debug, Clone)]
pub struct Touch {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl Touch {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// 滚动增量
#[derive(Debug, Clone, Copy)]
pub struct ScrollDelta {
    pub dy: f32,
    /// 触控板精确滚动（跟手，不叠加惯性）
    pub precise: bool,
}
