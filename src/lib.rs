//! Mini Catalog Engine - 商品目录页渲染引擎
//! 软件光栅画布 + UI 组件树 + 网格列表 + 分页缓存控制器

mod canvas;
mod color;
mod geometry;
mod paint;
pub mod text;

pub use canvas::{Canvas, ImageFit};
pub use color::Color;
pub use geometry::{Point, Rect};
pub use paint::{Paint, PaintStyle};
pub use text::TextRenderer;

// UI 组件系统
pub mod ui;

// 事件系统
pub mod event;

// 商品目录数据层（网络 + 分页缓存）
pub mod catalog;

// 应用运行时
pub mod runtime;

// 单元测试
#[cfg(test)]
mod tests;
