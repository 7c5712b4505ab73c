//! UI 组件模块

pub mod component;
pub mod view;
pub mod text;
pub mod image;
pub mod grid;
pub mod rows;
pub mod scroll_controller;
pub mod grid_list;

pub use component::{Component, ComponentId, ComponentTree, Style};
pub use view::View;
pub use text::{FontWeight, Text, TextAlign};
pub use image::{Image, ImageData};
pub use grid::{GridColumn, GridRow};
pub use rows::{group_rows, GridEntry, RowGroup};
pub use scroll_controller::{ScrollController, ScrollEvent};
pub use grid_list::{GridList, GridListConfig, GridListEvent};
